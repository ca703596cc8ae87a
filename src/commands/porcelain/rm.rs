use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;

impl Repository {
    pub async fn rm(&mut self, name: &str) -> anyhow::Result<()> {
        let staging = self.staging();
        let mut staging = staging.lock().await;

        if staging.is_staged(name) {
            staging.unstage(name);
            return Ok(());
        }

        let head = self.head_commit()?;
        if head.tracks(name) {
            staging.mark_removed(name.to_string());
            self.workspace().remove_file(name)
        } else {
            Err(UserError::NothingToRemove.into())
        }
    }
}
