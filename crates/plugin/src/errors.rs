//! Error types for the release plugin.
//!
//! [`ReleaseError`] is the error signal handed to the host pipeline for
//! conditions a user can act on (missing document, no next version). It carries
//! a machine-readable [`ErrorCode`] for the host's error catalog and renders as
//! a short notice.
//!
//! [`PluginError`] is what the steps return. It wraps a [`ReleaseError`] or
//! carries an underlying I/O, parse, or serialisation failure with its cause
//! intact, so the host can print the full chain for those instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentShapeError;
use crate::resolution::CandidatePaths;
use crate::DocumentLocation;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Machine-readable tag for a [`ReleaseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The plugin configuration has no `documentLocation`.
    MissingDocumentLocation,
    /// No document exists at any candidate path.
    MissingDocument,
    /// A document exists but cannot be opened (e.g. permission denied).
    UnreadableDocument,
    /// The release context carries no `nextRelease.version`.
    NoNextReleaseVersion,
}

impl ErrorCode {
    /// Returns the catalog code (e.g. `"EMISSINGDOCUMENT"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingDocumentLocation => "EMISSINGDOCUMENTLOCATION",
            ErrorCode::MissingDocument => "EMISSINGDOCUMENT",
            ErrorCode::UnreadableDocument => "EUNREADABLEDOCUMENT",
            ErrorCode::NoNextReleaseVersion => "ENONEXTVERSION",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Release error signal
// ---------------------------------------------------------------------------

/// An actionable failure reported to the host pipeline.
///
/// Immutable once built. The plugin never retries or recovers from one.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ReleaseError {
    code: ErrorCode,
    message: String,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ReleaseError {
    /// Creates a signal with no underlying cause.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Attaches the lower-level error that triggered this signal.
    pub fn with_cause(
        mut self,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Returns the catalog code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn missing_document_location() -> Self {
        Self::new(
            ErrorCode::MissingDocumentLocation,
            "No `documentLocation` configured. Set it to the path of the OpenRPC document.",
        )
    }

    pub(crate) fn missing_document(location: &DocumentLocation, searched: &CandidatePaths) -> Self {
        Self::new(
            ErrorCode::MissingDocument,
            format!(
                "Missing `{}` document file. Initialise the document first, then re-run the release \
                 (looked in: {}).",
                location.file_name(),
                searched,
            ),
        )
    }

    pub(crate) fn unreadable_document(
        location: &DocumentLocation,
        path: &std::path::Path,
        cause: std::io::Error,
    ) -> Self {
        Self::new(
            ErrorCode::UnreadableDocument,
            format!(
                "Document file `{}` exists at `{}` but cannot be read.",
                location.file_name(),
                path.display(),
            ),
        )
        .with_cause(cause)
    }

    pub(crate) fn no_next_release_version() -> Self {
        Self::new(
            ErrorCode::NoNextReleaseVersion,
            "No nextRelease version available; the document version cannot be updated.",
        )
    }
}

// ---------------------------------------------------------------------------
// Plugin errors
// ---------------------------------------------------------------------------

/// The file operation that failed inside a [`PluginError::Io`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Probe,
    Read,
    Write,
}

impl std::fmt::Display for IoOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            IoOperation::Probe => "inspect",
            IoOperation::Read => "read",
            IoOperation::Write => "write",
        };
        f.write_str(verb)
    }
}

/// Every way a plugin step can fail.
#[derive(Debug, Error)]
pub enum PluginError {
    /// An actionable signal for the user.
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// A lower-level file operation failed.
    #[error("Failed to {operation} document `{}`", .path.display())]
    Io {
        operation: IoOperation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document text is not valid JSON.
    #[error("Document `{}` is not valid JSON", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document is valid JSON but has nowhere to put a version.
    #[error("Document `{}` cannot carry a version", .path.display())]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: DocumentShapeError,
    },

    /// The updated document could not be rendered back to text.
    #[error("Failed to serialise document `{}`", .path.display())]
    Serialise {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PluginError {
    /// Returns `true` if this is a [`ReleaseError`] signal.
    ///
    /// Hosts print a short notice for these and the full cause chain for
    /// everything else.
    pub fn is_release_error(&self) -> bool {
        matches!(self, PluginError::Release(_))
    }

    /// Returns the catalog code when this is a [`ReleaseError`].
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            PluginError::Release(signal) => Some(signal.code()),
            _ => None,
        }
    }
}
