//! Branch table
//!
//! Maps branch names to the commit fingerprints they point at, plus the
//! distinguished current branch. The head of the repository is always the
//! commit the current branch points at.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::UserError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTable {
    branches: BTreeMap<BranchName, ObjectId>,
    current: BranchName,
}

impl BranchTable {
    /// Create a table with a single branch, which becomes current
    pub fn new(current: BranchName, tip: ObjectId) -> Self {
        let mut branches = BTreeMap::new();
        branches.insert(current.clone(), tip);

        BranchTable { branches, current }
    }

    /// Rebuild a table from persisted parts
    pub fn from_parts(
        branches: BTreeMap<BranchName, ObjectId>,
        current: BranchName,
    ) -> anyhow::Result<Self> {
        if !branches.contains_key(&current) {
            anyhow::bail!("current branch {} missing from branch table", current);
        }

        Ok(BranchTable { branches, current })
    }

    pub fn current(&self) -> &BranchName {
        &self.current
    }

    /// Fingerprint of the commit the current branch points at
    pub fn head_oid(&self) -> anyhow::Result<&ObjectId> {
        self.branches
            .get(&self.current)
            .with_context(|| format!("current branch {} missing from branch table", self.current))
    }

    pub fn get(&self, name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    pub fn contains(&self, name: &BranchName) -> bool {
        self.branches.contains_key(name)
    }

    /// All branches in name order
    pub fn iter(&self) -> impl Iterator<Item = (&BranchName, &ObjectId)> {
        self.branches.iter()
    }

    pub fn create(&mut self, name: BranchName, tip: ObjectId) -> Result<(), UserError> {
        if self.branches.contains_key(&name) {
            return Err(UserError::DuplicateBranch);
        }
        self.branches.insert(name, tip);

        Ok(())
    }

    pub fn remove(&mut self, name: &BranchName) -> Result<(), UserError> {
        if !self.branches.contains_key(name) {
            return Err(UserError::UnknownBranch);
        }
        if name == &self.current {
            return Err(UserError::CannotRemoveCurrentBranch);
        }
        self.branches.remove(name);

        Ok(())
    }

    /// Move the current branch's pointer to a new commit
    pub fn retarget_current(&mut self, tip: ObjectId) {
        self.branches.insert(self.current.clone(), tip);
    }

    /// Make another existing branch current; callers validate existence
    pub fn switch_to(&mut self, name: BranchName) {
        debug_assert!(self.branches.contains_key(&name));
        self.current = name;
    }
}
