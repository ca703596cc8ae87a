use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::UserError;

impl Repository {
    /// Create a branch pointing at the head commit
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())?;
        let head_oid = self.head_oid()?;

        self.branches_mut().create(branch_name, head_oid)?;

        Ok(())
    }

    pub fn remove_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name =
            BranchName::try_parse(name.to_string()).map_err(|_| UserError::UnknownBranch)?;

        self.branches_mut().remove(&branch_name)?;

        Ok(())
    }
}
