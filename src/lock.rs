//! Advisory write lock for the vault file.
//!
//! The lock lives on a sidecar `<vault>.lock` file rather than on the vault
//! itself, because rewrites replace the vault's inode via rename.

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::Path;

use crate::error::Result;

/// Exclusive lock held for the duration of a write transaction.
///
/// Released when dropped.
#[derive(Debug)]
pub struct VaultLock {
    file: File,
}

impl VaultLock {
    /// Block until the exclusive lock on `path` is acquired.
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        FileExt::lock_exclusive(&file)?;
        tracing::debug!(lock = %path.display(), "acquired vault lock");
        Ok(Self { file })
    }
}

impl Drop for VaultLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(error = %e, "failed to release vault lock");
        }
    }
}
