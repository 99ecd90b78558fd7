//! File writes with atomic replace
//!
//! Rendered files are written to a temp file in the same directory and
//! renamed into place, so a reader sees either the old file or the new one.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::RenderError;

/// Write bytes to a file atomically (write to temp, then rename)
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), RenderError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            RenderError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);

    write_temp_file(&temp_path, |writer| writer.write_all(contents))
        .map_err(|e| RenderError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        RenderError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Create, fill and sync the temp file; it is removed again on any failure
fn write_temp_file<F>(temp_path: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let result = File::create(temp_path).and_then(|file| {
        let mut writer = BufWriter::new(file);
        fill(&mut writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()
    });

    if result.is_err() {
        let _ = fs::remove_file(temp_path);
    }
    result
}

/// Delete a file if it is there; returns whether anything was removed
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<bool, RenderError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(RenderError::Io(format!(
            "Failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}

fn temp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
