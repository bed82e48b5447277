//! Filesystem adapter for the OpenRPC release plugin.
//!
//! Implements the [`plugin::DocumentStore`] trait over `tokio::fs`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Path probing, UTF-8 reads, atomic replacement, and the
//! optional I/O timeout all live here. The [`plugin`] crate sees only
//! [`plugin::DocumentStore`].
//!
//! ## Writes
//!
//! A write goes to a temporary file in the target's directory, is flushed to
//! disk, and is then renamed over the target. An interrupted release leaves
//! either the old document or the new one, never a truncated file. The
//! original file's permissions are carried over, and a symlinked target is
//! replaced at the path it points to.

use std::future::Future;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use plugin::{DocumentStore, Presence};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

/// [`DocumentStore`] backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentStore {
    timeout: Option<Duration>,
}

impl FsDocumentStore {
    /// Creates a store with no I/O timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds every probe, read, and write by `timeout`.
    ///
    /// An elapsed timeout surfaces as an [`io::ErrorKind::TimedOut`] error.
    /// A write that times out may still complete in the background; the
    /// rename keeps the document whole either way.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        path: &Path,
        operation: impl Future<Output = io::Result<T>>,
    ) -> io::Result<T> {
        let Some(limit) = self.timeout else {
            return operation.await;
        };
        tokio::time::timeout(limit, operation)
            .await
            .map_err(|_| {
                io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("no response from `{}` within {limit:?}", path.display()),
                )
            })?
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    #[instrument(skip_all, fields(path = %path.display()))]
    async fn probe(&self, path: &Path) -> io::Result<Presence> {
        self.bounded(path, async {
            let metadata = match tokio::fs::metadata(path).await {
                Ok(metadata) => metadata,
                // A file where a parent directory should be means nothing lives here.
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                    ) =>
                {
                    return Ok(Presence::Absent)
                }
                Err(e) => return Err(e),
            };
            if !metadata.is_file() {
                return Ok(Presence::NotAFile);
            }
            // Metadata is visible without read permission; opening is not.
            tokio::fs::File::open(path).await?;
            Ok(Presence::Readable)
        })
        .await
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    async fn read(&self, path: &Path) -> io::Result<String> {
        let contents = self.bounded(path, tokio::fs::read_to_string(path)).await?;
        debug!(bytes = contents.len(), "document read");
        Ok(contents)
    }

    #[instrument(skip_all, fields(path = %path.display(), bytes = contents.len()))]
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let target = path.to_path_buf();
        let contents = contents.to_owned();
        self.bounded(path, async move {
            tokio::task::spawn_blocking(move || replace_atomically(&target, &contents))
                .await
                .map_err(io::Error::other)?
        })
        .await?;
        debug!("document replaced");
        Ok(())
    }
}

fn replace_atomically(path: &Path, contents: &str) -> io::Result<()> {
    let target = resolve_symlink(path);
    let dir = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    if let Ok(metadata) = std::fs::metadata(&target) {
        tmp.as_file().set_permissions(metadata.permissions())?;
    }
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

fn resolve_symlink(path: &Path) -> PathBuf {
    match std::fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}
