//! Workspace - a disposable directory for one synthesis/build cycle.
//!
//! Creating a [`Workspace`] makes a fresh, uniquely named temporary
//! directory. Dropping it removes the directory again, on every exit path,
//! unless the workspace was created with retention enabled, in which case
//! the location is logged for inspection.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::errors::{ExtractError, Result};

/// Exclusively owned temporary directory tree.
///
/// Not `Clone`: moving a workspace moves ownership of the directory, and only
/// the current owner deletes it.
#[derive(Debug)]
pub struct Workspace {
    dir: Option<TempDir>,
    path: PathBuf,
    keep: bool,
}

impl Workspace {
    /// Create a fresh workspace under the system temporary directory.
    pub fn new(keep: bool) -> Result<Self> {
        Self::new_in(std::env::temp_dir(), keep)
    }

    /// Create a fresh workspace under `parent`.
    pub fn new_in(parent: impl AsRef<Path>, keep: bool) -> Result<Self> {
        let parent = parent.as_ref();
        let dir = tempfile::Builder::new()
            .prefix("wyvern-")
            .tempdir_in(parent)
            .map_err(|e| ExtractError::fs("create directory", parent, e))?;
        let path = dir.path().to_path_buf();

        tracing::debug!("created workspace {}", path.display());

        Ok(Workspace {
            dir: Some(dir),
            path,
            keep,
        })
    }

    /// Absolute path of the workspace root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the directory outlives this workspace.
    pub fn is_kept(&self) -> bool {
        self.keep
    }

    /// Release the workspace now, reporting removal failures.
    ///
    /// Dropping does the same but can only log a failure.
    pub fn release(mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) if !self.keep => dir
                .close()
                .map_err(|e| ExtractError::fs("remove directory", &self.path, e)),
            Some(dir) => {
                retain(dir);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[allow(deprecated)]
fn retain(dir: TempDir) {
    let path = dir.into_path();
    tracing::info!("kept generated project at {}", path.display());
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };

        if self.keep {
            retain(dir);
        } else if let Err(e) = dir.close() {
            tracing::warn!("failed to remove workspace {}: {}", self.path.display(), e);
        }
    }
}
