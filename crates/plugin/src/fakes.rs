//! In-memory fakes for the port traits (testing only)
//!
//! [`MemoryDocumentStore`] satisfies the [`DocumentStore`] contract without
//! touching the filesystem, and can simulate directories and unreadable files.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{DocumentStore, Presence};

#[derive(Debug, Clone)]
enum Entry {
    File(String),
    Directory,
    Unreadable,
}

/// In-memory document store keyed by path.
///
/// Paths are compared exactly as given; no normalisation is applied.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    entries: Mutex<HashMap<PathBuf, Entry>>,
    writes: Mutex<Vec<PathBuf>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryDocumentStore::insert_file`].
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert_file(path, contents);
        self
    }

    pub fn insert_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.entries
            .lock()
            .unwrap()
            .insert(path.into(), Entry::File(contents.into()));
    }

    pub fn insert_directory(&self, path: impl Into<PathBuf>) {
        self.entries
            .lock()
            .unwrap()
            .insert(path.into(), Entry::Directory);
    }

    /// Adds a file whose probe and read fail with `PermissionDenied`.
    pub fn insert_unreadable(&self, path: impl Into<PathBuf>) {
        self.entries
            .lock()
            .unwrap()
            .insert(path.into(), Entry::Unreadable);
    }

    /// Returns the contents of the file at `path`, if any.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.entries.lock().unwrap().get(path.as_ref()) {
            Some(Entry::File(contents)) => Some(contents.clone()),
            _ => None,
        }
    }

    /// Paths written so far, in order.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn probe(&self, path: &Path) -> io::Result<Presence> {
        match self.entries.lock().unwrap().get(path) {
            Some(Entry::File(_)) => Ok(Presence::Readable),
            Some(Entry::Directory) => Ok(Presence::NotAFile),
            Some(Entry::Unreadable) => Err(io::Error::from(io::ErrorKind::PermissionDenied)),
            None => Ok(Presence::Absent),
        }
    }

    async fn read(&self, path: &Path) -> io::Result<String> {
        match self.entries.lock().unwrap().get(path) {
            Some(Entry::File(contents)) => Ok(contents.clone()),
            Some(Entry::Directory) => Err(io::Error::other(format!(
                "{} is a directory",
                path.display()
            ))),
            Some(Entry::Unreadable) => Err(io::Error::from(io::ErrorKind::PermissionDenied)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Entry::File(contents.to_owned()));
        self.writes.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
