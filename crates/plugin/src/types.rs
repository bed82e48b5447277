//! Plugin configuration, release context, and step outcomes.
//!
//! [`PluginConfig`] and [`ReleaseContext`] are the two records the host passes
//! to every step. Both deserialise from the camelCase JSON a release pipeline
//! hands to its plugins and ignore fields the plugin does not recognise.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::resolution::{CandidatePaths, DEFAULT_FALLBACK_DIRECTORY};
use crate::{DocumentLocation, ReleaseVersion};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Plugin options supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// Path to the OpenRPC document, relative to the working directory.
    ///
    /// There is no default; an unset or empty location fails the step.
    #[serde(default)]
    pub document_location: Option<String>,

    /// Subdirectory probed when the document is not at `document_location`.
    ///
    /// Defaults to `src`; an explicit `null` disables the fallback.
    #[serde(default = "default_fallback_directory")]
    pub fallback_directory: Option<String>,
}

fn default_fallback_directory() -> Option<String> {
    Some(DEFAULT_FALLBACK_DIRECTORY.to_owned())
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            document_location: None,
            fallback_directory: default_fallback_directory(),
        }
    }
}

impl PluginConfig {
    /// Creates a configuration for `location` with the default fallback.
    pub fn for_location(location: impl Into<String>) -> Self {
        Self {
            document_location: Some(location.into()),
            ..Self::default()
        }
    }

    /// Returns the configured location, or `None` if unset or empty.
    pub fn document_location(&self) -> Option<DocumentLocation> {
        self.document_location.clone().and_then(DocumentLocation::new)
    }

    /// Builds the ordered candidate paths for `location` under `working_dir`.
    pub fn candidates(&self, location: &DocumentLocation, working_dir: &Path) -> CandidatePaths {
        CandidatePaths::resolve(
            location,
            working_dir,
            self.fallback_directory.as_deref().map(Path::new),
        )
    }
}

// ---------------------------------------------------------------------------
// Release context
// ---------------------------------------------------------------------------

/// The release the host has decided to publish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRelease {
    #[serde(default)]
    pub version: Option<String>,
}

/// Per-attempt record supplied by the host. Read-only to the plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseContext {
    /// Directory relative locations resolve against.
    ///
    /// When absent, relative paths are handed to the filesystem as-is and so
    /// resolve against the process working directory.
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// Present once the host has resolved the next version.
    #[serde(default)]
    pub next_release: Option<NextRelease>,
}

impl ReleaseContext {
    /// Creates a context rooted at `cwd` with no next release.
    pub fn in_directory(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
            next_release: None,
        }
    }

    /// Sets the resolved next version.
    pub fn with_next_version(mut self, version: impl Into<String>) -> Self {
        self.next_release = Some(NextRelease {
            version: Some(version.into()),
        });
        self
    }

    /// Returns the resolved version, treating an empty string as absent.
    pub fn next_version(&self) -> Option<ReleaseVersion> {
        self.next_release
            .as_ref()
            .and_then(|release| release.version.clone())
            .and_then(ReleaseVersion::new)
    }

    pub fn working_directory(&self) -> &Path {
        self.cwd.as_deref().unwrap_or_else(|| Path::new(""))
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// A document the verifier found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDocument {
    pub location: DocumentLocation,
    /// The first candidate path holding a readable regular file.
    pub path: PathBuf,
}

/// What [`crate::DocumentVersionSync::update_version`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareOutcome {
    pub path: PathBuf,
    /// The `info.version` string before the update, if there was one.
    pub previous_version: Option<String>,
    pub version: ReleaseVersion,
    /// `false` when the rendered document matched the file byte-for-byte and
    /// no write was issued.
    pub written: bool,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn config_deserialises_camel_case_with_default_fallback() {
        let config: PluginConfig =
            serde_json::from_str(r#"{"documentLocation":"./openrpc.json"}"#).unwrap();

        assert_eq!(config.document_location.as_deref(), Some("./openrpc.json"));
        assert_eq!(config.fallback_directory.as_deref(), Some("src"));
    }

    #[test]
    fn config_fallback_can_be_disabled() {
        let config: PluginConfig =
            serde_json::from_str(r#"{"documentLocation":"a.json","fallbackDirectory":null}"#)
                .unwrap();

        assert_eq!(config.fallback_directory, None);
    }

    #[test]
    fn empty_config_has_no_location() {
        let config: PluginConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.document_location(), None);

        let config = PluginConfig::for_location("");
        assert_eq!(config.document_location(), None);
    }

    #[test]
    fn context_ignores_unknown_fields() {
        let context: ReleaseContext = serde_json::from_str(
            r#"{"cwd":"/repo","nextRelease":{"version":"1.2.3","gitTag":"v1.2.3"},"branch":"main"}"#,
        )
        .unwrap();

        assert_eq!(context.working_directory(), Path::new("/repo"));
        assert_eq!(context.next_version(), ReleaseVersion::new("1.2.3"));
    }

    #[test]
    fn empty_version_counts_as_absent() {
        let context = ReleaseContext::default().with_next_version("");
        assert_eq!(context.next_version(), None);

        let context: ReleaseContext = serde_json::from_str(r#"{"nextRelease":{}}"#).unwrap();
        assert_eq!(context.next_version(), None);
    }

    #[test]
    fn missing_cwd_yields_empty_working_directory() {
        assert_eq!(ReleaseContext::default().working_directory(), Path::new(""));
    }
}
