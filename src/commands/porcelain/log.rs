use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::CommitNode;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Walk the first-parent chain from head down to the root commit
    pub fn log(&self) -> anyhow::Result<()> {
        let mut cursor = Some(self.head_oid()?);

        while let Some(oid) = cursor {
            let commit = self.database().load_commit(&oid)?;
            self.show_commit(&oid, &commit)?;

            cursor = commit.parents().first().cloned();
        }

        Ok(())
    }

    /// Show every persisted commit, reachable or not, in fingerprint order
    pub fn global_log(&self) -> anyhow::Result<()> {
        for oid in self.database().list_commit_ids()? {
            let commit = self.database().load_commit(&oid)?;
            self.show_commit(&oid, &commit)?;
        }

        Ok(())
    }

    pub(crate) fn show_commit(&self, oid: &ObjectId, commit: &CommitNode) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "commit {}", oid)?;
        writeln!(self.writer(), "Date: {}", commit.readable_timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
