//! Port traits.
//!
//! [`Verifier`] and [`Writer`] are the capability pair the host pipeline
//! invokes. [`DocumentStore`] is the single seam through which the steps touch
//! the filesystem; the `document-store` crate implements it over `tokio::fs`.
//!
//! All traits use `async_trait` so they stay dyn-compatible.

use std::io;
use std::path::Path;

use async_trait::async_trait;

use crate::{PluginConfig, PluginError, ReleaseContext};

/// What a probe found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// A regular file that could be opened for reading.
    Readable,
    /// Nothing exists at the path.
    Absent,
    /// Something exists but it is not a regular file (e.g. a directory).
    NotAFile,
}

/// Whole-file access to documents.
///
/// Errors keep their [`io::ErrorKind`] so callers can tell a permission
/// failure from anything else. A probe reports absence as
/// [`Presence::Absent`], never as an error.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Checks what is at `path` without modifying it.
    async fn probe(&self, path: &Path) -> io::Result<Presence>;

    /// Reads the whole file as UTF-8.
    async fn read(&self, path: &Path) -> io::Result<String>;

    /// Replaces the whole file with `contents`.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Pre-flight check: the document must exist before a release starts.
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Resolves to `true` when the document is present and readable.
    async fn verify_conditions(
        &self,
        config: &PluginConfig,
        context: &ReleaseContext,
    ) -> Result<bool, PluginError>;
}

/// Prepare step: write the resolved version into the document.
#[async_trait]
pub trait Writer: Send + Sync {
    /// Resolves to `true` once the document has been durably updated.
    async fn prepare(
        &self,
        config: &PluginConfig,
        context: &ReleaseContext,
    ) -> Result<bool, PluginError>;
}
