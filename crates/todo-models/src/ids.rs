//! Type-safe item identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const PREFIX: &str = "item";

/// Opaque, immutable identifier of an [`Item`](crate::Item).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new random ID.
    pub fn new() -> Self {
        Self(format!("{}-{}", PREFIX, Uuid::new_v4()))
    }

    /// Returns the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the ID is safe to use as a document file stem.
    ///
    /// Only ASCII alphanumerics, `-` and `_` are accepted.
    pub fn is_document_safe(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
