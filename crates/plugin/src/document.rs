//! The OpenRPC document as a generic JSON tree.
//!
//! Only `info.version` is interpreted. Every other field round-trips through
//! [`serde_json::Value`] untouched, in its original key order.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::ReleaseVersion;

const INDENT: &[u8] = b"    ";

/// Why a parsed document has nowhere to store a version.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentShapeError {
    #[error("the top-level value is not an object")]
    RootNotObject,
    #[error("the document has no `info` object")]
    MissingInfo,
    #[error("`info` is not an object")]
    InfoNotObject,
}

/// A parsed specification document.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificationDocument {
    root: Value,
    trailing_newline: bool,
}

impl SpecificationDocument {
    /// Parses document text.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let root = serde_json::from_str(text)?;
        Ok(Self {
            root,
            trailing_newline: text.ends_with('\n'),
        })
    }

    /// Returns the current `info.version` if it is a string.
    pub fn version(&self) -> Option<&str> {
        self.root.get("info")?.get("version")?.as_str()
    }

    /// Sets `info.version`, returning the value it replaced.
    ///
    /// The key is inserted if `info` has no version yet; `info` itself is
    /// never created.
    pub fn set_version(
        &mut self,
        version: &ReleaseVersion,
    ) -> Result<Option<Value>, DocumentShapeError> {
        let info = self.info_mut()?;
        Ok(info.insert(
            "version".to_owned(),
            Value::String(version.as_str().to_owned()),
        ))
    }

    /// Renders the document as 4-space indented JSON, keeping a trailing
    /// newline if the parsed text had one.
    pub fn to_pretty_string(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.root.serialize(&mut serializer)?;
        if self.trailing_newline {
            buf.push(b'\n');
        }
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    fn info_mut(&mut self) -> Result<&mut Map<String, Value>, DocumentShapeError> {
        let root = self
            .root
            .as_object_mut()
            .ok_or(DocumentShapeError::RootNotObject)?;
        match root.get_mut("info") {
            Some(Value::Object(info)) => Ok(info),
            Some(_) => Err(DocumentShapeError::InfoNotObject),
            None => Err(DocumentShapeError::MissingInfo),
        }
    }
}
