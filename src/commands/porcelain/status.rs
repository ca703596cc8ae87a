use crate::areas::repository::Repository;
use crate::artifacts::status::report::Inspector;
use std::io::Write;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let report = Inspector::new(self).report().await?;

        writeln!(self.writer(), "=== Branches ===")?;
        for branch in &report.branches {
            if branch == &report.current_branch {
                writeln!(self.writer(), "*{}", branch)?;
            } else {
                writeln!(self.writer(), "{}", branch)?;
            }
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Staged Files ===")?;
        for name in &report.staged_files {
            writeln!(self.writer(), "{}", name)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Removed Files ===")?;
        for name in &report.removed_files {
            writeln!(self.writer(), "{}", name)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Modifications Not Staged For Commit ===")?;
        for (name, kind) in &report.unstaged_changes {
            writeln!(self.writer(), "{}{}", name, kind)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Untracked Files ===")?;
        for name in &report.untracked_files {
            writeln!(self.writer(), "{}", name)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
