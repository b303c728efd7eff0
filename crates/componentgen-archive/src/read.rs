//! Reading zip and jar-like containers.
//!
//! Used by the engine-side scanner to look inside dependency artifacts and
//! by tests to inspect produced archives: the same codec on both sides of
//! the scope boundary.

use crate::write::{archive_error, zip_error};
use componentgen_core::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Visit every file entry, in archive order, yielding name and bytes.
pub fn for_each_entry<F>(path: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(&str, &[u8]) -> Result<()>,
{
    let file = File::open(path).map_err(|e| archive_error(path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| zip_error(path, e))?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| zip_error(path, e))?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| archive_error(path, e))?;
        visit(&name, &bytes)?;
    }
    Ok(())
}

/// File entry names in archive order.
pub fn list_entries(path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for_each_entry(path, |name, _| {
        names.push(name.to_string());
        Ok(())
    })?;
    Ok(names)
}

/// Bytes of a single named entry.
pub fn read_entry(path: &Path, name: &str) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| archive_error(path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| zip_error(path, e))?;
    let mut entry = archive.by_name(name).map_err(|e| zip_error(path, e))?;
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| archive_error(path, e))?;
    Ok(bytes)
}
