//! Output tree helpers. Every failure is reported as
//! [`AssembleError::WriteFailed`] against the path that could not be handled.
use std::path::Path;

use crate::error::AssembleError;

/// Ensure the parent directory of `path` exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), AssembleError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AssembleError::write(parent, e))?;
    }
    Ok(())
}

/// Write `contents` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the parent or the file cannot be written.
pub fn write_file(path: &Path, contents: &str) -> Result<(), AssembleError> {
    ensure_parent_dir(path)?;
    std::fs::write(path, contents).map_err(|e| AssembleError::write(path, e))
}

/// Recursively copy a directory tree.
///
/// `.git` directories are skipped when `skip_git` is set. Symlinks are
/// followed, so linked directories are materialised in the copy.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or read, or a file
/// cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path, skip_git: bool) -> Result<(), AssembleError> {
    std::fs::create_dir_all(dst).map_err(|e| AssembleError::write(dst, e))?;
    let entries = std::fs::read_dir(src).map_err(|e| AssembleError::write(src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| AssembleError::write(src, e))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            if skip_git && entry.file_name() == ".git" {
                continue;
            }
            copy_dir_recursive(&src_path, &dst_path, skip_git)?;
        } else {
            std::fs::copy(&src_path, &dst_path).map_err(|e| AssembleError::write(&dst_path, e))?;
        }
    }
    Ok(())
}

/// Remove a directory tree if it exists.
///
/// # Errors
///
/// Returns an error if the tree exists but cannot be removed.
pub fn remove_dir_if_exists(path: &Path) -> Result<(), AssembleError> {
    if path.symlink_metadata().is_ok() {
        std::fs::remove_dir_all(path).map_err(|e| AssembleError::write(path, e))?;
    }
    Ok(())
}
