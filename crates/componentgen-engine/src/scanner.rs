//! Component descriptor discovery across scope code sources.
//!
//! Directory artifacts are walked recursively; zip/jar containers are read
//! through the shared archive codec. Only paths named in the scope
//! manifest are ever touched; the scanner has no view of the host scope.

use crate::descriptor::{ComponentDescriptor, DESCRIPTOR_SUFFIX};
use componentgen_core::error::{GenerateError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DiscoveredComponent {
    pub descriptor: ComponentDescriptor,
    /// File path or `container!entry` label, used in error messages.
    pub origin: String,
}

/// Scan every code source for component descriptors. Results are sorted
/// by origin so repeated runs over the same inputs discover components in
/// the same order.
pub fn scan_code_sources(sources: &[PathBuf]) -> Result<Vec<DiscoveredComponent>> {
    let mut found = Vec::new();
    for source in sources {
        if source.is_dir() {
            scan_directory(source, &mut found)?;
        } else if is_container(source) {
            scan_container(source, &mut found)?;
        } else {
            tracing::debug!(source = %source.display(), "skipping non-container artifact");
        }
    }
    found.sort_by(|a, b| a.origin.cmp(&b.origin));
    tracing::debug!(components = found.len(), "descriptor scan complete");
    Ok(found)
}

fn is_container(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("zip") | Some("jar")
    )
}

fn scan_directory(dir: &Path, found: &mut Vec<DiscoveredComponent>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        GenerateError::Generation(format!("cannot read {}: {}", dir.display(), e))
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            scan_directory(&path, found)?;
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(DESCRIPTOR_SUFFIX))
        {
            let origin = path.display().to_string();
            let bytes = fs::read(&path).map_err(|e| {
                GenerateError::Generation(format!("cannot read {}: {}", origin, e))
            })?;
            found.push(DiscoveredComponent {
                descriptor: ComponentDescriptor::parse(&origin, &bytes)?,
                origin,
            });
        }
    }
    Ok(())
}

fn scan_container(container: &Path, found: &mut Vec<DiscoveredComponent>) -> Result<()> {
    componentgen_archive::read::for_each_entry(container, |name, bytes| {
        if name.ends_with(DESCRIPTOR_SUFFIX) {
            let origin = format!("{}!{}", container.display(), name);
            found.push(DiscoveredComponent {
                descriptor: ComponentDescriptor::parse(&origin, bytes)?,
                origin,
            });
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use componentgen_archive::ArchiveWriter;

    const BANNER: &[u8] = b"name: Image Banner\nwidgets:\n  - field: title\n    kind: textfield\n";
    const TEASER: &[u8] = b"name: Teaser\n";

    #[test]
    fn test_scan_directory_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("ui/components");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("banner.component.yaml"), BANNER).unwrap();
        fs::write(tmp.path().join("teaser.component.yaml"), TEASER).unwrap();
        fs::write(tmp.path().join("README.md"), b"not a descriptor").unwrap();

        let found = scan_code_sources(&[tmp.path().to_path_buf()]).unwrap();
        let names: Vec<&str> = found.iter().map(|c| c.descriptor.name.as_str()).collect();
        assert_eq!(names, vec!["Teaser", "Image Banner"]);
    }

    #[test]
    fn test_scan_zip_container() {
        let tmp = tempfile::tempdir().unwrap();
        let container = tmp.path().join("vendor-components.zip");
        let mut writer = ArchiveWriter::create(&container).unwrap();
        writer
            .add_entry("lib/banner.component.yaml", BANNER)
            .unwrap();
        writer.add_entry("lib/notes.txt", b"ignored").unwrap();
        writer.finish().unwrap();

        let found = scan_code_sources(&[container]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].descriptor.name, "Image Banner");
        assert!(found[0].origin.ends_with("!lib/banner.component.yaml"));
    }

    #[test]
    fn test_scan_order_is_stable() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.component.yaml"), TEASER).unwrap();
        fs::write(tmp.path().join("a.component.yaml"), BANNER).unwrap();

        let first = scan_code_sources(&[tmp.path().to_path_buf()]).unwrap();
        let second = scan_code_sources(&[tmp.path().to_path_buf()]).unwrap();
        let origins = |v: &[DiscoveredComponent]| {
            v.iter().map(|c| c.origin.clone()).collect::<Vec<_>>()
        };
        assert_eq!(origins(&first), origins(&second));
    }

    #[test]
    fn test_malformed_descriptor_names_its_origin() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("bad.component.yaml"), b"{oops").unwrap();

        let err = scan_code_sources(&[tmp.path().to_path_buf()]).unwrap_err();
        assert!(err.to_string().contains("bad.component.yaml"));
    }
}
