//! Working tree status
//!
//! Classifies every file across the three areas (working directory,
//! staging, head commit) into the five status sections. Computation is
//! read-only; rendering belongs to the status command.
//!
//! Terminology:
//! - untracked files: on disk, not staged, content absent from the
//!   permanent object store
//! - modified files: working content differs from its staged or tracked
//!   counterpart
//! - deleted files: staged or tracked but missing from the working
//!   directory (and not already marked for removal)

use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Modified,
    Deleted,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Modified => write!(f, "(modified)"),
            ChangeKind::Deleted => write!(f, "(deleted)"),
        }
    }
}

/// The five status sections, each sorted lexicographically
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub current_branch: BranchName,
    pub branches: Vec<BranchName>,
    pub staged_files: Vec<String>,
    pub removed_files: Vec<String>,
    pub unstaged_changes: Vec<(String, ChangeKind)>,
    pub untracked_files: Vec<String>,
}

/// Read-only classifier over a repository and its working directory
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl Inspector<'_> {
    pub async fn report(&self) -> anyhow::Result<StatusReport> {
        let staging = self.repository.staging();
        let staging = staging.lock().await;

        let head = self.repository.head_commit()?;
        let workspace = self.repository.workspace();

        // one snapshot of the working directory, names to content hashes
        let mut disk_fingerprints = BTreeMap::<String, ObjectId>::new();
        for name in workspace.list_files()? {
            let fingerprint = workspace.parse_blob(&name)?.fingerprint()?;
            disk_fingerprints.insert(name, fingerprint);
        }

        let branches = self.repository.branches();
        let current_branch = branches.current().clone();
        let branch_names = branches.iter().map(|(name, _)| name.clone()).collect();
        drop(branches);

        let staged_files = staging.additions().keys().cloned().collect();
        let removed_files = staging.removals().iter().cloned().collect();

        let mut unstaged = BTreeMap::<String, ChangeKind>::new();

        for (name, fingerprint) in &disk_fingerprints {
            if let Some(tracked) = head.file_fingerprint(name) {
                if tracked != fingerprint && !staging.is_staged(name) {
                    unstaged.insert(name.clone(), ChangeKind::Modified);
                }
            } else if let Some(staged_blob) = staging.additions().get(name) {
                if &staged_blob.fingerprint()? != fingerprint {
                    unstaged.insert(name.clone(), ChangeKind::Modified);
                }
            }
        }
        for name in staging.additions().keys() {
            if !disk_fingerprints.contains_key(name) {
                unstaged.insert(name.clone(), ChangeKind::Deleted);
            }
        }
        for name in head.files().keys() {
            if !staging.is_marked_removed(name) && !disk_fingerprints.contains_key(name) {
                unstaged.insert(name.clone(), ChangeKind::Deleted);
            }
        }

        let untracked_files = disk_fingerprints
            .iter()
            .filter(|(name, fingerprint)| {
                !staging.is_staged(name) && !self.repository.database().contains_blob(fingerprint)
            })
            .map(|(name, _)| name.clone())
            .collect();

        Ok(StatusReport {
            current_branch,
            branches: branch_names,
            staged_files,
            removed_files,
            unstaged_changes: unstaged.into_iter().collect(),
            untracked_files,
        })
    }
}
