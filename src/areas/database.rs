//! Content-addressed object store
//!
//! Persists blobs and commit nodes keyed by their fingerprints, plus the
//! transient staging copies of blobs awaiting their first commit.
//!
//! ## Layout
//!
//! ```text
//! .vit/commits/<fingerprint>   one object per commit node, never deleted
//! .vit/files/<fingerprint>     permanent blob store
//! .vit/staging/<fingerprint>   blobs staged but not yet committed
//! ```
//!
//! Objects are zlib-compressed and written through a temp-file rename, so
//! a store is either complete or absent. Re-storing identical content is a
//! no-op.

use crate::artifacts::core::UserError;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{CommitNode, Parents, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    /// Commits already parsed this invocation; the graph walks of merge
    /// and log would otherwise re-read the same objects over and over
    commit_cache: RefCell<HashMap<ObjectId, CommitNode>>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            path,
            commit_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join("commits")
    }

    pub fn files_path(&self) -> PathBuf {
        self.path.join("files")
    }

    pub fn staging_path(&self) -> PathBuf {
        self.path.join("staging")
    }

    /// Create the object directories; used when a repository is initialized
    pub fn create_layout(&self) -> anyhow::Result<()> {
        for dir in [self.commits_path(), self.files_path(), self.staging_path()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Unable to create object directory {}", dir.display()))?;
        }

        Ok(())
    }

    /// Persist a blob into the permanent store, idempotently
    pub fn store_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        self.store_object(self.files_path(), blob)
    }

    /// Persist a blob into the transient staging store
    pub fn store_staged_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        self.store_object(self.staging_path(), blob)
    }

    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let content = self.read_object(self.files_path().join(oid.as_ref()))?;
        Blob::deserialize(Cursor::new(content))
    }

    pub fn load_staged_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let content = self.read_object(self.staging_path().join(oid.as_ref()))?;
        Blob::deserialize(Cursor::new(content))
    }

    /// Whether a blob with this fingerprint is permanently stored
    pub fn contains_blob(&self, oid: &ObjectId) -> bool {
        self.files_path().join(oid.as_ref()).exists()
    }

    /// Move one staged blob into the permanent store
    pub fn promote_staged(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let staged_path = self.staging_path().join(oid.as_ref());
        let permanent_path = self.files_path().join(oid.as_ref());

        if permanent_path.exists() {
            // identical content was committed before; the staged copy is redundant
            if staged_path.exists() {
                std::fs::remove_file(&staged_path).with_context(|| {
                    format!("Unable to remove staged object {}", staged_path.display())
                })?;
            }
            return Ok(());
        }

        std::fs::rename(&staged_path, &permanent_path).with_context(|| {
            format!(
                "Unable to promote staged object {} to {}",
                staged_path.display(),
                permanent_path.display()
            )
        })
    }

    /// Drop every remaining staged blob
    pub fn wipe_staging(&self) -> anyhow::Result<()> {
        let staging_path = self.staging_path();
        if staging_path.exists() {
            std::fs::remove_dir_all(&staging_path).with_context(|| {
                format!("Unable to clear staging directory {}", staging_path.display())
            })?;
        }
        std::fs::create_dir_all(&staging_path).with_context(|| {
            format!("Unable to recreate staging directory {}", staging_path.display())
        })
    }

    pub fn store_commit(&self, commit: &CommitNode) -> anyhow::Result<ObjectId> {
        let oid = self.store_object(self.commits_path(), commit)?;
        self.commit_cache
            .borrow_mut()
            .insert(oid.clone(), commit.clone());

        Ok(oid)
    }

    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<CommitNode> {
        if let Some(commit) = self.commit_cache.borrow().get(oid) {
            return Ok(commit.clone());
        }

        let content = self.read_object(self.commits_path().join(oid.as_ref()))?;
        let commit = CommitNode::deserialize(Cursor::new(content))?;
        self.commit_cache
            .borrow_mut()
            .insert(oid.clone(), commit.clone());

        Ok(commit)
    }

    /// Parent-link view of a commit, for graph walks
    pub fn slim_commit(&self, oid: &ObjectId) -> anyhow::Result<SlimCommit> {
        let commit = self.load_commit(oid)?;
        let parents = match commit.parents() {
            Parents::Root => Vec::new(),
            Parents::Normal(parent) => vec![parent.clone()],
            Parents::Merge(first, second) => vec![first.clone(), second.clone()],
        };

        Ok(SlimCommit {
            oid: oid.clone(),
            parents,
        })
    }

    /// Every persisted commit fingerprint, sorted
    pub fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.commits_path();
        let mut ids = std::fs::read_dir(&commits_path)
            .with_context(|| format!("Unable to read {}", commits_path.display()))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                ObjectId::try_parse(entry.file_name().to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();
        ids.sort();

        Ok(ids)
    }

    /// Resolve a full or abbreviated commit ID
    ///
    /// Abbreviated IDs must match exactly one stored commit; zero or many
    /// matches report the same user-facing condition.
    pub fn resolve_commit_id(&self, raw: &str) -> anyhow::Result<ObjectId> {
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(UserError::NoCommitWithId.into());
        }

        if raw.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(raw.to_string())?;
            if !self.commits_path().join(oid.as_ref()).exists() {
                return Err(UserError::NoCommitWithId.into());
            }
            return Ok(oid);
        }

        let matches = self
            .list_commit_ids()?
            .into_iter()
            .filter(|oid| oid.as_ref().starts_with(raw))
            .collect::<Vec<_>>();

        match matches.len() {
            1 => Ok(matches.into_iter().next().context("unreachable: one match")?),
            _ => Err(UserError::NoCommitWithId.into()),
        }
    }

    fn store_object(&self, dir: PathBuf, object: &impl Object) -> anyhow::Result<ObjectId> {
        let oid = object.fingerprint()?;
        let object_path = dir.join(oid.as_ref());

        // write the object to disk unless it already exists
        if !object_path.exists() {
            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(oid)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).with_context(|| {
            format!("Unable to read object file {}", object_path.display())
        })?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!("Unable to open object file {}", temp_object_path.display())
            })?;

        file.write_all(&object_content).with_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
