use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;
use std::io::Write;

impl Repository {
    /// Print the fingerprint of every commit whose message matches exactly
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for oid in self.database().list_commit_ids()? {
            let commit = self.database().load_commit(&oid)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", oid)?;
                found = true;
            }
        }

        if found {
            Ok(())
        } else {
            Err(UserError::NoCommitWithMessage.into())
        }
    }
}
