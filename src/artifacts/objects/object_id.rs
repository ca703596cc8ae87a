//! Object identifier (SHA-1 fingerprint)
//!
//! Fingerprints are 40-character hexadecimal strings computed over an
//! object's canonical serialized content. They identify every persisted
//! object (blobs and commit nodes) and double as the storage file name.
//!
//! ## Format
//!
//! - Full: 40 hex characters
//! - Short: first 8 characters, accepted wherever a commit ID is expected

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};

/// Fingerprint of a stored object
///
/// A 40-character hexadecimal string that uniquely identifies an object
/// by its content. Two logically equal objects always share a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Get abbreviated form of the object ID
    ///
    /// # Returns
    ///
    /// First 8 characters of the fingerprint
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
