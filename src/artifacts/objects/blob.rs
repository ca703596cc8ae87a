//! Blob object
//!
//! A blob is an immutable snapshot of one file's content at the moment it
//! was read. Blobs carry no name or metadata; names live in commit file
//! mappings and in the staging area.
//!
//! The fingerprint of a blob is the SHA-1 of its textual content, so
//! identical file contents always resolve to the same stored object.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Immutable snapshot of a file's content
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Blob {
    content: String,
}

impl Blob {
    /// Decoded text view of the snapshot
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Raw byte view of the snapshot
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(Bytes::copy_from_slice(self.content.as_bytes()))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        Ok(Self::new(content))
    }
}

impl Object for Blob {}
