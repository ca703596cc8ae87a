//! Commit node object
//!
//! A commit node is one point in history. It carries:
//! - A formatted timestamp (wall clock, except the root node which is
//!   pinned to the Unix epoch)
//! - A log message
//! - Zero, one, or two parent fingerprints
//! - The complete file-name -> blob-fingerprint snapshot of the tracked
//!   tree (never a delta)
//! - The ordered transitive-ancestor list of the node
//!
//! ## Format
//!
//! On disk (zlib-compressed, keyed by the node's own fingerprint):
//! ```text
//! timestamp <unix-seconds> <utc-offset>
//! parent <fingerprint>
//! ancestor <fingerprint>
//! file <fingerprint> <name>
//!
//! <message>
//! ```
//!
//! The encoding is canonical: file lines are sorted by name, ancestor lines
//! follow the deterministic inheritance order, and the fingerprint of the
//! node is the SHA-1 of this serialized form. Any field difference,
//! including message or timestamp, therefore yields a distinct identity.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;

/// Environment variable overriding the commit wall-clock timestamp
///
/// Expected format: `%Y-%m-%d %H:%M:%S %z`. Used to make command runs
/// reproducible in tests.
pub const COMMIT_DATE_ENV: &str = "VIT_COMMIT_DATE";

/// Message of the root commit every repository starts from
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Parent links of a commit node
///
/// Commit arity is a closed set: only the root commit has no parent and
/// only merge commits have two, so the variants make exhaustive handling
/// checkable at compile time instead of threading nullable fields around.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Parents {
    Root,
    Normal(ObjectId),
    Merge(ObjectId, ObjectId),
}

impl Parents {
    /// First parent, if any (the commit the owning branch grew from)
    pub fn first(&self) -> Option<&ObjectId> {
        match self {
            Parents::Root => None,
            Parents::Normal(parent) => Some(parent),
            Parents::Merge(parent, _) => Some(parent),
        }
    }

    /// Second parent of a merge commit
    pub fn second(&self) -> Option<&ObjectId> {
        match self {
            Parents::Merge(_, second) => Some(second),
            _ => None,
        }
    }
}

/// Slim representation of a commit
///
/// Contains only what the merge base search needs: the node's fingerprint
/// and its parent fingerprints.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
}

/// One immutable point in history
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CommitNode {
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    message: String,
    parents: Parents,
    /// Complete snapshot of tracked file names to blob fingerprints
    files: BTreeMap<String, ObjectId>,
    /// Every transitive ancestor, nearest-root first; list order doubles as
    /// the depth measure used by merge base selection
    ancestors: Vec<ObjectId>,
}

impl CommitNode {
    pub fn new(
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        message: String,
        parents: Parents,
        files: BTreeMap<String, ObjectId>,
        ancestors: Vec<ObjectId>,
    ) -> Self {
        CommitNode {
            timestamp,
            message,
            parents,
            files,
            ancestors,
        }
    }

    /// The root commit: no parents, no files, epoch timestamp
    pub fn root() -> Self {
        CommitNode {
            timestamp: chrono::DateTime::UNIX_EPOCH.fixed_offset(),
            message: ROOT_COMMIT_MESSAGE.to_string(),
            parents: Parents::Root,
            files: BTreeMap::new(),
            ancestors: Vec::new(),
        }
    }

    /// Wall-clock timestamp for a new commit
    ///
    /// Honors the `VIT_COMMIT_DATE` override when set, otherwise the local
    /// time at the moment of the call.
    pub fn timestamp_now() -> chrono::DateTime<chrono::FixedOffset> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date| {
                chrono::DateTime::parse_from_str(&date, "%Y-%m-%d %H:%M:%S %z").ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    /// Ancestor list a child commit inherits from its parent(s)
    ///
    /// The parent's ancestors come first, then the parent itself; a merge
    /// commit appends the second parent's ancestors and the second parent.
    /// First occurrence wins, so shared history keeps its original depth.
    pub fn inherit_ancestors(
        first: (&ObjectId, &CommitNode),
        second: Option<(&ObjectId, &CommitNode)>,
    ) -> Vec<ObjectId> {
        fn push_unique(oid: &ObjectId, ancestors: &mut Vec<ObjectId>) {
            if !ancestors.contains(oid) {
                ancestors.push(oid.clone());
            }
        }

        let mut ancestors = Vec::new();

        for oid in &first.1.ancestors {
            push_unique(oid, &mut ancestors);
        }
        push_unique(first.0, &mut ancestors);

        if let Some((second_oid, second_node)) = second {
            for oid in &second_node.ancestors {
                push_unique(oid, &mut ancestors);
            }
            push_unique(second_oid, &mut ancestors);
        }

        ancestors
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    pub fn files(&self) -> &BTreeMap<String, ObjectId> {
        &self.files
    }

    pub fn ancestors(&self) -> &[ObjectId] {
        &self.ancestors
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn file_fingerprint(&self, name: &str) -> Option<&ObjectId> {
        self.files.get(name)
    }

    pub fn is_ancestor(&self, oid: &ObjectId) -> bool {
        self.ancestors.contains(oid)
    }

    /// Index of an ancestor within the linear ancestor list
    ///
    /// Larger means closer to this node; absent ancestors have no depth.
    pub fn ancestor_depth(&self, oid: &ObjectId) -> Option<usize> {
        self.ancestors.iter().position(|ancestor| ancestor == oid)
    }

    /// Format timestamp in the fixed-width log form
    ///
    /// # Returns
    ///
    /// String like "Thu Nov 9 20:00:05 2017 -0800"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl Packable for CommitNode {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )];

        for parent in [self.parents.first(), self.parents.second()]
            .into_iter()
            .flatten()
        {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        for ancestor in &self.ancestors {
            lines.push(format!("ancestor {}", ancestor.as_ref()));
        }
        for (name, oid) in &self.files {
            lines.push(format!("file {} {}", oid.as_ref(), name));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        Ok(Bytes::from(lines.join("\n")))
    }
}

impl Unpackable for CommitNode {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let timestamp_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = timestamp_line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let timestamp = chrono::DateTime::parse_from_str(timestamp, "%s %z")
            .context("Invalid commit object: unparsable timestamp")?;

        let mut parents = Vec::new();
        let mut ancestors = Vec::new();
        let mut files = BTreeMap::new();

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(ancestor) = line.strip_prefix("ancestor ") {
                ancestors.push(ObjectId::try_parse(ancestor.to_string())?);
            } else if let Some(file) = line.strip_prefix("file ") {
                let (oid, name) = file
                    .split_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                files.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        let parents = match parents.len() {
            0 => Parents::Root,
            1 => Parents::Normal(parents.remove(0)),
            2 => {
                let first = parents.remove(0);
                Parents::Merge(first, parents.remove(0))
            }
            n => anyhow::bail!("Invalid commit object: {} parents", n),
        };

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(timestamp, message, parents, files, ancestors))
    }
}

impl Object for CommitNode {}
