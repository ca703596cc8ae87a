use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;
use crate::artifacts::objects::commit::{CommitNode, Parents};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if message.trim().is_empty() {
            return Err(UserError::EmptyMessage.into());
        }

        {
            let staging = self.staging();
            let staging = staging.lock().await;
            if staging.is_empty() {
                return Err(UserError::NothingToCommit.into());
            }
        }

        let head_oid = self.head_oid()?;
        self.write_commit(Parents::Normal(head_oid), message.trim().to_string())
            .await?;

        Ok(())
    }

    /// Build, persist, and advance onto a new commit node
    ///
    /// The snapshot starts from the first parent's complete file mapping,
    /// applies every staged addition, then deletes every name marked for
    /// removal; it is never a delta. The ancestor list extends over all
    /// parents. On success the current branch points at the new node and
    /// the staging area is cleared, promoting staged blobs into the
    /// permanent store.
    pub(crate) async fn write_commit(
        &mut self,
        parents: Parents,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let staging = self.staging();
        let mut staging = staging.lock().await;

        let first_parent_oid = parents
            .first()
            .context("a non-root commit needs a parent")?
            .clone();
        let first_parent = self.database().load_commit(&first_parent_oid)?;

        let mut files = first_parent.files().clone();
        for (name, blob) in staging.additions() {
            files.insert(name.clone(), blob.fingerprint()?);
        }
        for name in staging.removals() {
            files.remove(name);
        }

        let ancestors = match parents.second() {
            Some(second_oid) => {
                let second_parent = self.database().load_commit(second_oid)?;
                CommitNode::inherit_ancestors(
                    (&first_parent_oid, &first_parent),
                    Some((second_oid, &second_parent)),
                )
            }
            None => CommitNode::inherit_ancestors((&first_parent_oid, &first_parent), None),
        };

        let commit = CommitNode::new(
            CommitNode::timestamp_now(),
            message,
            parents,
            files,
            ancestors,
        );
        let oid = self.database().store_commit(&commit)?;

        staging.clear(self.database())?;
        self.branches_mut().retarget_current(oid.clone());

        Ok(oid)
    }
}
