use crate::areas::repository::Repository;
use crate::areas::staging::Staging;
use crate::artifacts::core::UserError;
use crate::artifacts::objects::commit::CommitNode;
use crate::artifacts::objects::object::Object;

impl Repository {
    pub async fn add(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.workspace().contains(name) {
            return Err(UserError::FileNotInWorkspace.into());
        }

        let head = self.head_commit()?;
        let staging = self.staging();
        let mut staging = staging.lock().await;

        self.stage_file(&mut staging, &head, name)
    }

    /// Stage a working file for addition
    ///
    /// Content equality with the head commit's tracked version
    /// short-circuits staging: the name is dropped from both the addition
    /// mapping and the removal marking instead of being re-added.
    pub(crate) fn stage_file(
        &self,
        staging: &mut Staging,
        head: &CommitNode,
        name: &str,
    ) -> anyhow::Result<()> {
        let blob = self.workspace().parse_blob(name)?;
        let fingerprint = blob.fingerprint()?;

        match head.file_fingerprint(name) {
            Some(tracked) if tracked == &fingerprint => staging.unstage_completely(name),
            _ => {
                self.database().store_staged_blob(&blob)?;
                staging.stage_add(name.to_string(), blob);
            }
        }

        Ok(())
    }
}
