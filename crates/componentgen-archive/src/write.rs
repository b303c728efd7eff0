//! Deterministic zip writing.

use componentgen_core::error::{GenerateError, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zip writer producing reproducible archives: fixed entry timestamps and
/// a single compression method, so unchanged inputs yield byte-identical
/// output. Callers are expected to add entries in sorted order.
pub struct ArchiveWriter {
    inner: ZipWriter<File>,
    path: PathBuf,
}

impl ArchiveWriter {
    /// Create (or truncate) the archive at `path`, creating parent
    /// directories as needed.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| archive_error(path, e))?;
        }
        let file = File::create(path).map_err(|e| archive_error(path, e))?;
        Ok(Self {
            inner: ZipWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    pub fn add_entry(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());
        self.inner
            .start_file(name, options)
            .map_err(|e| zip_error(&self.path, e))?;
        self.inner
            .write_all(bytes)
            .map_err(|e| archive_error(&self.path, e))?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.inner.finish().map_err(|e| zip_error(&self.path, e))?;
        Ok(())
    }
}

pub(crate) fn archive_error(path: &Path, e: std::io::Error) -> GenerateError {
    GenerateError::Archive {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

pub(crate) fn zip_error(path: &Path, e: zip::result::ZipError) -> GenerateError {
    GenerateError::Archive {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_sample(path: &Path) {
        let mut writer = ArchiveWriter::create(path).unwrap();
        writer.add_entry("a/one.yaml", b"name: one\n").unwrap();
        writer.add_entry("b/two.yaml", b"name: two\n").unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_written_entries_are_readable() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.zip");
        write_sample(&path);

        let names = crate::read::list_entries(&path).unwrap();
        assert_eq!(names, vec!["a/one.yaml", "b/two.yaml"]);
        let bytes = crate::read::read_entry(&path, "a/one.yaml").unwrap();
        assert_eq!(bytes, b"name: one\n");
    }

    #[test]
    fn test_identical_inputs_produce_identical_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("first.zip");
        let second = tmp.path().join("second.zip");
        write_sample(&first);
        write_sample(&second);

        let a = std::fs::read(&first).unwrap();
        let b = std::fs::read(&second).unwrap();
        assert_eq!(a, b);
    }
}
