use crate::areas::repository::Repository;

impl Repository {
    /// Move the current branch onto an arbitrary commit
    ///
    /// Accepts abbreviated commit IDs. Applies the same untracked-file
    /// guard and tree replacement as a branch checkout, but retargets only
    /// the current branch's pointer instead of switching branches.
    pub async fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let oid = self.database().resolve_commit_id(commit_id)?;
        let target = self.database().load_commit(&oid)?;
        let head = self.head_commit()?;

        self.apply_tree_switch(&head, &target)?;
        self.branches_mut().retarget_current(oid);

        let staging = self.staging();
        let mut staging = staging.lock().await;
        staging.clear(self.database())
    }
}
