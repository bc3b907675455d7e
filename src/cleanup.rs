//! Staging directory cleanup
//!
//! Removes everything inside a staging directory without removing the
//! directory itself. Finished clips live elsewhere and are never touched.
//! Do not run while another render is still writing into the directory.

use std::fs;
use std::path::Path;

use log::info;
use walkdir::WalkDir;

use crate::error::Result;

/// Delete all files and subdirectories inside `dir`, keeping `dir`
///
/// A missing directory is a no-op. Returns the number of files removed.
pub fn clear_staging(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut removed = 0_usize;
    for entry in WalkDir::new(dir).min_depth(1).contents_first(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }

    info!("cleared {} staged files from {}", removed, dir.display());
    Ok(removed)
}
