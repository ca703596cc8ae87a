use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    /// Content fingerprint of the object
    ///
    /// The fingerprint is the SHA-1 digest of the canonical serialized form,
    /// so logically equal objects always hash identically regardless of how
    /// they were constructed.
    fn fingerprint(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }
}
