//! Core domain for the OpenRPC release plugin.
//!
//! The plugin keeps the `info.version` field of an OpenRPC document in step
//! with the version a release pipeline has resolved. The host pipeline calls
//! two operations: [`Verifier::verify_conditions`] during pre-flight, and
//! [`Writer::prepare`] once it has decided to release.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! Every file access goes through the [`DocumentStore`] port; the
//! `document-store` crate supplies the filesystem implementation and
//! [`fakes`] supplies an in-memory one for tests.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`DocumentLocation`, `ReleaseVersion`, `ReleaseAttemptId`) |
//! | [`types`] | Plugin configuration, release context, and step outcomes |
//! | [`errors`] | The release error signal and the wider plugin error type |
//! | [`resolution`] | Ordered candidate paths for a document location |
//! | [`document`] | Generic JSON document with a settable `info.version` |
//! | [`ports`] | `DocumentStore`, `Verifier`, and `Writer` traits |
//! | [`version_sync`] | `DocumentVersionSync`, the implementation of both steps |
//! | [`fakes`] | In-memory `DocumentStore` for tests |

pub mod document;
pub mod errors;
pub mod fakes;
pub mod identifiers;
pub mod ports;
pub mod resolution;
pub mod types;
pub mod version_sync;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use document::{DocumentShapeError, SpecificationDocument};
pub use errors::{ErrorCode, IoOperation, PluginError, ReleaseError};
pub use identifiers::{DocumentLocation, ReleaseAttemptId, ReleaseVersion};
pub use ports::{DocumentStore, Presence, Verifier, Writer};
pub use resolution::{CandidatePaths, DEFAULT_FALLBACK_DIRECTORY};
pub use types::{NextRelease, PluginConfig, PrepareOutcome, ReleaseContext, ResolvedDocument};
pub use version_sync::DocumentVersionSync;
