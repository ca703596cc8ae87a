use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::UserError;
use crate::artifacts::objects::commit::CommitNode;

impl Repository {
    pub async fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name =
            BranchName::try_parse(name.to_string()).map_err(|_| UserError::NoSuchBranch)?;
        let target_oid = self
            .branches()
            .get(&branch_name)
            .cloned()
            .ok_or(UserError::NoSuchBranch)?;
        if self.branches().current() == &branch_name {
            return Err(UserError::AlreadyOnBranch.into());
        }

        let head = self.head_commit()?;
        let target = self.database().load_commit(&target_oid)?;
        self.apply_tree_switch(&head, &target)?;

        self.branches_mut().switch_to(branch_name);

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.clear(self.database())
    }

    pub fn checkout_head_file(&mut self, name: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        self.checkout_file(&head, name)
    }

    pub fn checkout_commit_file(&mut self, commit_id: &str, name: &str) -> anyhow::Result<()> {
        let oid = self.database().resolve_commit_id(commit_id)?;
        let commit = self.database().load_commit(&oid)?;
        self.checkout_file(&commit, name)
    }

    /// Write one tracked file from a commit into the working directory,
    /// bypassing staging
    pub(crate) fn checkout_file(&self, commit: &CommitNode, name: &str) -> anyhow::Result<()> {
        let oid = commit
            .file_fingerprint(name)
            .ok_or(UserError::FileNotInCommit)?;
        let blob = self.database().load_blob(oid)?;

        self.workspace().write_file(name, blob.content())
    }

    /// Replace the tree of `head` in the working directory with the tree
    /// of `target`
    ///
    /// The overwrite check is a separate read-only pass: a partial switch
    /// must never happen, so nothing is deleted or written until every
    /// working file has been cleared against the target tree. Only files
    /// the target would actually overwrite make an untracked file fatal.
    pub(crate) fn apply_tree_switch(
        &self,
        head: &CommitNode,
        target: &CommitNode,
    ) -> anyhow::Result<()> {
        for name in self.workspace().list_files()? {
            if !head.tracks(&name) && target.tracks(&name) {
                return Err(UserError::WouldOverwriteUntracked.into());
            }
        }

        for name in head.files().keys() {
            if !target.tracks(name) {
                self.workspace().remove_file(name)?;
            }
        }
        for name in target.files().keys() {
            self.checkout_file(target, name)?;
        }

        Ok(())
    }
}
