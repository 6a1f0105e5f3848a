//! Validated item text.
//!
//! Every path that writes an item's text goes through [`ItemValue::parse`],
//! so the length bounds hold whether the input arrived over HTTP or from a
//! direct library call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{Result, ValidationError};

/// Minimum item text length in characters.
pub const MIN_VALUE_LEN: usize = 1;

/// Maximum item text length in characters.
pub const MAX_VALUE_LEN: usize = 50;

const FIELD: &str = "value";

/// Item text that has passed the 1-50 character check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemValue(String);

impl ItemValue {
    /// Validates a candidate string.
    ///
    /// Length is measured in Unicode scalar values, not bytes.
    pub fn parse(candidate: impl Into<String>) -> Result<Self> {
        let text = candidate.into();
        let len = text.chars().count();
        if len < MIN_VALUE_LEN {
            return Err(ValidationError::TooShort {
                field: FIELD,
                min: MIN_VALUE_LEN,
            });
        }
        if len > MAX_VALUE_LEN {
            return Err(ValidationError::TooLong {
                field: FIELD,
                max: MAX_VALUE_LEN,
            });
        }
        Ok(Self(text))
    }

    /// Validates an untyped JSON field: present, a string, within bounds.
    pub fn from_json(candidate: Option<&Value>) -> Result<Self> {
        match candidate {
            None | Some(Value::Null) => Err(ValidationError::Missing(FIELD)),
            Some(Value::String(s)) => Self::parse(s.as_str()),
            Some(_) => Err(ValidationError::WrongType {
                field: FIELD,
                expected: "string",
            }),
        }
    }

    /// Returns the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value, returning the text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ItemValue {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<ItemValue> for String {
    fn from(v: ItemValue) -> Self {
        v.0
    }
}

impl fmt::Display for ItemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
