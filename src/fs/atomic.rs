//! Atomic file writes.
//!
//! Content goes to `.{filename}.tmp` next to the target, is synced, and then
//! renamed over the target. A stored prompt is therefore either the old
//! version or the new one, never a torn write. Source and target share a
//! directory, so the rename stays on one filesystem.
//!
//! `std::fs::rename` replaces an existing target on both POSIX and Windows.

use crate::error::{Result, ScoopError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
///
/// # Example
///
/// ```no_run
/// use scoop::fs::atomic_write;
/// use std::path::Path;
///
/// atomic_write(Path::new(".scoop/ws-1/nuggets.yaml"), b"agentType: nuggets\n")?;
/// # Ok::<(), scoop::error::ScoopError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            ScoopError::StoreError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ScoopError::StoreError(format!("failed to replace '{}': {}", path.display(), e))
    })?;

    sync_parent(path);
    Ok(())
}

/// Persist the directory entry of a renamed file.
#[cfg(unix)]
fn sync_parent(path: &Path) {
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) {}

/// String convenience wrapper around [`atomic_write`].
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ScoopError::StoreError(format!("invalid file path '{}'", target.display()))
        })?;
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        ScoopError::StoreError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    if let Err(e) = file.write_all(content).and_then(|()| file.sync_all()) {
        let _ = fs::remove_file(path);
        return Err(ScoopError::StoreError(format!(
            "failed to write temporary file '{}': {}",
            path.display(),
            e
        )));
    }

    Ok(())
}
