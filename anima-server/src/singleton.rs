//! Single-instance lock over the data directory.
//!
//! The per-user JSON files have no locking of their own, so one server
//! process per data directory is what keeps concurrent sessions from
//! clobbering each other's writes. The lock file lives next to the
//! documents it guards.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::Path;

/// A lock guard that releases the lock when dropped
pub struct LockGuard {
    _file: File,
}

/// Acquire an exclusive lock on the data directory, failing if another
/// instance already serves it.
pub fn acquire_lock(data_dir: &Path) -> Result<LockGuard> {
    fs::create_dir_all(data_dir)?;

    let path = data_dir.join(".server.lock");
    let file = File::create(&path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another anima-server instance is already serving {}.\n\
            If you believe this is an error, remove: {}",
            data_dir.display(),
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}
