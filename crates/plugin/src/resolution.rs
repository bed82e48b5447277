//! Candidate paths for a configured document location.
//!
//! A location resolves to an explicit, ordered list of paths:
//!
//! 1. the location joined to the working directory;
//! 2. the location joined to the fallback subdirectory of the working
//!    directory (`src` unless configured otherwise).
//!
//! Absolute locations have a single candidate. Callers probe the list in order
//! and stop at the first regular file, so the primary path always wins when
//! both exist.

use std::path::{Component, Path, PathBuf};

use crate::DocumentLocation;

/// Fallback subdirectory probed when the configuration does not name one.
pub const DEFAULT_FALLBACK_DIRECTORY: &str = "src";

/// Ordered, de-duplicated candidate paths. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePaths(Vec<PathBuf>);

impl CandidatePaths {
    /// Builds the candidate list for `location`.
    ///
    /// `working_dir` may be empty, in which case relative candidates stay
    /// relative and the operating system resolves them against the process
    /// working directory.
    pub fn resolve(
        location: &DocumentLocation,
        working_dir: &Path,
        fallback_dir: Option<&Path>,
    ) -> Self {
        let relative = Path::new(location.as_str());
        let mut paths = vec![normalise(&working_dir.join(relative))];

        if relative.is_relative() {
            if let Some(dir) = fallback_dir.filter(|dir| !dir.as_os_str().is_empty()) {
                let fallback = normalise(&working_dir.join(dir).join(relative));
                if !paths.contains(&fallback) {
                    paths.push(fallback);
                }
            }
        }

        Self(paths)
    }

    /// The first candidate: the location as configured.
    pub fn primary(&self) -> &Path {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }
}

impl std::fmt::Display for CandidatePaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "`{}`", path.display())?;
        }
        Ok(())
    }
}

// Drops `.` components so `./openrpc.json` and `openrpc.json` compare equal.
// `..` is left alone: collapsing it lexically is wrong across symlinks.
fn normalise(path: &Path) -> PathBuf {
    let normalised: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    if normalised.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalised
    }
}
