use crate::areas::repository::Repository;
use crate::areas::staging::Staging;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::core::UserError;
use crate::artifacts::objects::commit::CommitNode;
use crate::artifacts::objects::object::Object;
use std::path::Path;

impl Repository {
    /// Create a new repository in the given directory
    ///
    /// Every repository starts from the same root commit on the default
    /// branch, so histories that never diverge share their first node.
    pub async fn init(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Repository> {
        let path = Path::new(path).canonicalize()?.into_boxed_path();
        if Repository::is_initialized(&path) {
            return Err(UserError::RepositoryExists.into());
        }

        let root = CommitNode::root();
        let branches = BranchTable::new(
            BranchName::try_parse(DEFAULT_BRANCH.to_string())?,
            root.fingerprint()?,
        );

        let repository = Repository::assemble(path, writer, Staging::new(), branches);
        repository.database().create_layout()?;
        repository.database().store_commit(&root)?;
        repository.save().await?;

        Ok(repository)
    }
}
