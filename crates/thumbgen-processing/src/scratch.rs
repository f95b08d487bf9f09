//! Invocation-scoped scratch storage.
//!
//! One `ScratchArea` exists per pipeline invocation and owns a dedicated
//! temporary directory. The directory name carries a fresh uuid so
//! concurrent invocations processing same-named objects never share a path.
//! Removal is guaranteed by `Drop` on every exit path; an explicit
//! [`ScratchArea::close`] exists so the success path can log cleanup
//! problems instead of silently ignoring them.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

/// RAII handle to a per-invocation scratch directory.
pub struct ScratchArea {
    dir: TempDir,
}

impl ScratchArea {
    /// Allocate a scratch directory under `root`, creating `root` if needed.
    pub fn allocate(root: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(root)?;
        let dir = tempfile::Builder::new()
            .prefix(&format!("thumbgen-{}-", Uuid::new_v4()))
            .tempdir_in(root)?;
        Ok(ScratchArea { dir })
    }

    /// Path for a staged file inside the scratch area. Any directory
    /// components in `file_name` are stripped; only the base name is used.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        let base = file_name
            .rsplit(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("staged");
        self.dir.path().join(base)
    }

    /// Delete the scratch directory, logging on failure. Dropping the area
    /// has the same effect minus the log; failure paths rely on `Drop`.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove scratch directory");
        }
    }
}
