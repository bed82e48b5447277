//! The two plugin steps.
//!
//! [`DocumentVersionSync`] implements [`Verifier`] and [`Writer`] over any
//! [`DocumentStore`]. The trait methods reduce the richer outcomes of
//! [`DocumentVersionSync::locate`] and [`DocumentVersionSync::update_version`]
//! to the boolean the host contract asks for.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::errors::IoOperation;
use crate::resolution::CandidatePaths;
use crate::{
    DocumentStore, PluginConfig, PluginError, PrepareOutcome, Presence, ReleaseContext,
    ReleaseError, ResolvedDocument, SpecificationDocument, Verifier, Writer,
};

/// Keeps a document's `info.version` in step with the release version.
#[derive(Debug, Clone, Default)]
pub struct DocumentVersionSync<S> {
    store: S,
}

impl<S: DocumentStore> DocumentVersionSync<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Finds the document the configuration points at.
    ///
    /// Candidates are probed in order and the first readable regular file
    /// wins. A permission failure on any candidate stops the search with an
    /// unreadable-document signal rather than reporting the file as missing.
    #[instrument(skip_all, fields(location = ?config.document_location))]
    pub async fn locate(
        &self,
        config: &PluginConfig,
        context: &ReleaseContext,
    ) -> Result<ResolvedDocument, PluginError> {
        let location = config
            .document_location()
            .ok_or_else(ReleaseError::missing_document_location)?;
        let candidates = config.candidates(&location, context.working_directory());

        match self.first_readable(&candidates).await {
            Ok(Some(path)) => Ok(ResolvedDocument { location, path }),
            Ok(None) => Err(ReleaseError::missing_document(&location, &candidates).into()),
            Err((path, source)) if source.kind() == io::ErrorKind::PermissionDenied => {
                Err(ReleaseError::unreadable_document(&location, &path, source).into())
            }
            Err((path, source)) => Err(PluginError::Io {
                operation: IoOperation::Probe,
                path,
                source,
            }),
        }
    }

    /// Writes the context's next version into the document.
    ///
    /// Fails before any I/O when the context has no version. When no candidate
    /// holds a file the primary path is read anyway, so the caller sees the
    /// underlying not-found error rather than a missing-document signal.
    #[instrument(skip_all, fields(location = ?config.document_location))]
    pub async fn update_version(
        &self,
        config: &PluginConfig,
        context: &ReleaseContext,
    ) -> Result<PrepareOutcome, PluginError> {
        let version = context
            .next_version()
            .ok_or_else(ReleaseError::no_next_release_version)?;
        let location = config
            .document_location()
            .ok_or_else(ReleaseError::missing_document_location)?;
        let candidates = config.candidates(&location, context.working_directory());

        let path = match self.first_readable(&candidates).await {
            Ok(found) => found.unwrap_or_else(|| candidates.primary().to_path_buf()),
            Err((path, source)) => {
                return Err(PluginError::Io {
                    operation: IoOperation::Probe,
                    path,
                    source,
                })
            }
        };

        let original = self
            .store
            .read(&path)
            .await
            .map_err(|source| PluginError::Io {
                operation: IoOperation::Read,
                path: path.clone(),
                source,
            })?;

        let mut document =
            SpecificationDocument::parse(&original).map_err(|source| PluginError::Parse {
                path: path.clone(),
                source,
            })?;
        let previous_version = document.version().map(str::to_owned);
        document
            .set_version(&version)
            .map_err(|source| PluginError::InvalidDocument {
                path: path.clone(),
                source,
            })?;
        let rendered = document
            .to_pretty_string()
            .map_err(|source| PluginError::Serialise {
                path: path.clone(),
                source,
            })?;

        let written = rendered != original;
        if written {
            self.store
                .write(&path, &rendered)
                .await
                .map_err(|source| PluginError::Io {
                    operation: IoOperation::Write,
                    path: path.clone(),
                    source,
                })?;
        } else {
            debug!(path = %path.display(), "document already up to date");
        }

        Ok(PrepareOutcome {
            path,
            previous_version,
            version,
            written,
        })
    }

    async fn first_readable(
        &self,
        candidates: &CandidatePaths,
    ) -> Result<Option<PathBuf>, (PathBuf, io::Error)> {
        for path in candidates.iter() {
            match self.store.probe(path).await {
                Ok(Presence::Readable) => return Ok(Some(path.to_path_buf())),
                Ok(presence) => debug!(path = %path.display(), ?presence, "candidate skipped"),
                Err(source) => return Err((path.to_path_buf(), source)),
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl<S: DocumentStore> Verifier for DocumentVersionSync<S> {
    async fn verify_conditions(
        &self,
        config: &PluginConfig,
        context: &ReleaseContext,
    ) -> Result<bool, PluginError> {
        let resolved = self.locate(config, context).await?;
        info!(path = %resolved.path.display(), "document found");
        Ok(true)
    }
}

#[async_trait]
impl<S: DocumentStore> Writer for DocumentVersionSync<S> {
    async fn prepare(
        &self,
        config: &PluginConfig,
        context: &ReleaseContext,
    ) -> Result<bool, PluginError> {
        let outcome = self.update_version(config, context).await?;
        info!(
            path = %outcome.path.display(),
            previous = outcome.previous_version.as_deref().unwrap_or("<none>"),
            version = %outcome.version,
            written = outcome.written,
            "document version updated"
        );
        Ok(true)
    }
}
