//! Staging area
//!
//! Transient record of the next commit's adjustments: blobs staged for
//! addition and file names marked for removal. A name is never in both
//! collections at once.
//!
//! Staged blob contents live in the transient staging store so they
//! survive between invocations; `clear` promotes them into the permanent
//! store after a successful commit and empties both collections.

use crate::areas::database::Database;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
pub struct Staging {
    /// Files staged for addition, name to snapshot
    additions: BTreeMap<String, Blob>,
    /// File names marked for removal
    removals: BTreeSet<String>,
}

impl Staging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a file for addition, replacing any previous staged version
    ///
    /// Re-adding a name clears its removal marking.
    pub fn stage_add(&mut self, name: String, blob: Blob) {
        self.removals.remove(&name);
        self.additions.insert(name, blob);
    }

    /// Drop a name from the addition mapping
    pub fn unstage(&mut self, name: &str) {
        self.additions.remove(name);
    }

    /// Mark a tracked file name for removal
    pub fn mark_removed(&mut self, name: String) {
        self.additions.remove(&name);
        self.removals.insert(name);
    }

    /// Drop a name from both collections
    pub fn unstage_completely(&mut self, name: &str) {
        self.additions.remove(name);
        self.removals.remove(name);
    }

    pub fn is_staged(&self, name: &str) -> bool {
        self.additions.contains_key(name)
    }

    pub fn is_marked_removed(&self, name: &str) -> bool {
        self.removals.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn additions(&self) -> &BTreeMap<String, Blob> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    /// Post-commit clear
    ///
    /// Promotes every staged blob into the permanent store, drops whatever
    /// else is left in the staging store, and empties both collections.
    pub fn clear(&mut self, database: &Database) -> anyhow::Result<()> {
        for blob in self.additions.values() {
            database.promote_staged(&blob.fingerprint()?)?;
        }
        database.wipe_staging()?;

        self.additions.clear();
        self.removals.clear();

        Ok(())
    }
}
