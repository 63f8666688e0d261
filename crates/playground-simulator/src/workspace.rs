//! Per-request scratch directories.

use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("Failed to create workspace {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read manifest template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to remove workspace {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A uniquely named directory holding one Move package for the duration of a request.
///
/// Dropping the workspace removes the directory, so it cannot outlive the request
/// even when the owning future is cancelled or panics. Prefer [`ScratchWorkspace::remove`]
/// on the normal path to surface removal errors.
#[derive(Debug)]
pub struct ScratchWorkspace {
    id: Uuid,
    path: PathBuf,
    removed: bool,
}

impl ScratchWorkspace {
    pub const SOURCE_FILE: &'static str = "sources/main.move";
    pub const MANIFEST_FILE: &'static str = "Move.toml";

    /// Creates `<root>/<uuid>`, creating `root` first if needed.
    ///
    /// The leaf directory is created with `create_dir`, so a name collision fails
    /// instead of silently sharing a directory with another request.
    pub async fn create(root: &Path) -> Result<Self, WorkspaceError> {
        tokio::fs::create_dir_all(root)
            .await
            .map_err(|source| WorkspaceError::Create {
                path: root.to_path_buf(),
                source,
            })?;
        let id = Uuid::new_v4();
        let path = root.join(id.to_string());
        tokio::fs::create_dir(&path)
            .await
            .map_err(|source| WorkspaceError::Create {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(workspace = %path.display(), "Created scratch workspace");
        Ok(Self {
            id,
            path,
            removed: false,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source_path(&self) -> PathBuf {
        self.path.join(Self::SOURCE_FILE)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(Self::MANIFEST_FILE)
    }

    /// Writes the submitted Move source to `sources/main.move`.
    pub async fn write_source(&self, code: &str) -> Result<(), WorkspaceError> {
        let path = self.source_path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| WorkspaceError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        write_file(path, code).await
    }

    pub async fn write_manifest(&self, manifest: &str) -> Result<(), WorkspaceError> {
        write_file(self.manifest_path(), manifest).await
    }

    /// Removes the directory tree and disarms the drop guard.
    ///
    /// On failure the guard stays armed and tries once more when dropped.
    pub async fn remove(mut self) -> Result<(), WorkspaceError> {
        tokio::fs::remove_dir_all(&self.path)
            .await
            .map_err(|source| WorkspaceError::Remove {
                path: self.path.clone(),
                source,
            })?;
        self.removed = true;
        tracing::debug!(workspace = %self.path.display(), "Removed scratch workspace");
        Ok(())
    }
}

impl Drop for ScratchWorkspace {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(workspace = %self.path.display(), error = %e, "Failed to remove scratch workspace on drop");
            }
        }
    }
}

async fn write_file(path: PathBuf, contents: &str) -> Result<(), WorkspaceError> {
    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| WorkspaceError::Write { path, source })
}
