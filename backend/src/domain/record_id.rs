//! Store-assigned record identifier in its wire form.
//!
//! MongoDB assigns every document a 12-byte ObjectId. The domain and the
//! HTTP surface only ever see the 24-character lowercase hex rendering; the
//! persistence adapter converts back to the native type at the edge.

use std::fmt;

use thiserror::Error;

const RECORD_ID_LEN: usize = 24;

/// Validated string identifier of a stored item or clock-in record.
///
/// # Examples
/// ```
/// use pantry::domain::RecordId;
///
/// let id = RecordId::new("65f1a2b3c4d5e6f708192a3b").expect("valid id");
/// assert_eq!(id.as_str(), "65f1a2b3c4d5e6f708192a3b");
/// assert!(RecordId::new("42").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

/// Reasons a string cannot be used as a [`RecordId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordIdValidationError {
    /// Wrong number of characters.
    #[error("record id must be {RECORD_ID_LEN} characters, got {0}")]
    Length(usize),
    /// Non-hexadecimal character present.
    #[error("record id must be hexadecimal")]
    NotHex,
}

impl RecordId {
    /// Validate and wrap a hex identifier. Upper-case input is normalised.
    pub fn new(value: impl AsRef<str>) -> Result<Self, RecordIdValidationError> {
        let raw = value.as_ref();
        if raw.len() != RECORD_ID_LEN {
            return Err(RecordIdValidationError::Length(raw.chars().count()));
        }
        if !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RecordIdValidationError::NotHex);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Borrow the hex form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}
