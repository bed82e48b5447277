//! Newtype domain identifiers.
//!
//! Strings that mean different things to the plugin (a configured document
//! location, a resolved release version) are distinct newtypes so one cannot
//! be passed where the other is expected.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// The configured path to the OpenRPC document, absolute or relative to
    /// the release working directory (e.g. `"./openrpc.json"`).
    DocumentLocation
}

impl DocumentLocation {
    /// Returns the file name component of the location (e.g. `"openrpc.json"`).
    ///
    /// Falls back to the full location when it has no file name component
    /// (e.g. `".."`).
    pub fn file_name(&self) -> String {
        Path::new(&self.0)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.clone())
    }
}

string_id! {
    /// The version the host pipeline resolved for the current release attempt
    /// (e.g. `"1.4.0"`). The plugin never computes or validates it.
    ReleaseVersion
}

// ---------------------------------------------------------------------------

/// Identifies a single release attempt (one invocation of the host harness).
///
/// Generated fresh for every CLI invocation and recorded on its tracing span so
/// all activity from one attempt can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseAttemptId(Uuid);

impl ReleaseAttemptId {
    /// Generates a new random attempt identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ReleaseAttemptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
