use crate::areas::repository::Repository;
use crate::areas::staging::Staging;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::UserError;
use crate::artifacts::merge::base_finder::{BranchTip, MergeBase, MergeBaseFinder};
use crate::artifacts::merge::conflict::conflict_markers;
use crate::artifacts::objects::commit::{CommitNode, Parents};
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Merge the target branch into the current branch
    ///
    /// Runs as a sequence of phases; any precondition failure aborts
    /// before a single file is touched:
    ///
    /// 1. Preconditions: target branch exists, is not the current branch,
    ///    staging is clean, no untracked file would be overwritten by the
    ///    target tree, and the target is not already merged in.
    /// 2. Merge base selection, including the fast-forward degenerate case.
    /// 3. Per-file three-way classification against the base, auto-staging
    ///    target-side changes and writing conflict markers where both
    ///    sides diverged.
    /// 4. Base-relative cleanup: deletion propagation and delete-vs-modify
    ///    conflicts.
    /// 5. A two-parent merge commit. Conflicts are advisory: they are left
    ///    marked in the working tree and staged, the commit still
    ///    completes.
    pub async fn merge(&mut self, branch: &str) -> anyhow::Result<()> {
        let current_name = self.branches().current().clone();
        let target_name =
            BranchName::try_parse(branch.to_string()).map_err(|_| UserError::UnknownBranch)?;
        let target_oid = self
            .branches()
            .get(&target_name)
            .cloned()
            .ok_or(UserError::UnknownBranch)?;
        if target_name == current_name {
            return Err(UserError::SelfMerge.into());
        }

        let head_oid = self.head_oid()?;
        let head = self.database().load_commit(&head_oid)?;
        let target = self.database().load_commit(&target_oid)?;

        let staging_arc = self.staging();
        {
            let staging = staging_arc.lock().await;

            for name in self.workspace().list_files()? {
                if !head.tracks(&name) && !staging.is_staged(&name) && target.tracks(&name) {
                    return Err(UserError::WouldOverwriteUntracked.into());
                }
            }

            if !staging.is_empty() {
                return Err(UserError::UncommittedChanges.into());
            }
        }

        if head.is_ancestor(&target_oid) {
            return Err(UserError::BranchIsAncestor.into());
        }

        let merge_base = {
            let finder = MergeBaseFinder::new(|oid: &ObjectId| self.database().slim_commit(oid));
            finder.select(
                BranchTip {
                    oid: &head_oid,
                    ancestors: head.ancestors(),
                },
                BranchTip {
                    oid: &target_oid,
                    ancestors: target.ancestors(),
                },
            )?
        };

        let base_oid = match merge_base {
            MergeBase::FastForward => {
                // bring the target tree in and move the current branch's
                // pointer onto the target tip; no merge commit is created
                self.apply_tree_switch(&head, &target)?;
                self.branches_mut().retarget_current(target_oid);

                let mut staging = staging_arc.lock().await;
                staging.clear(self.database())?;

                writeln!(self.writer(), "Current branch fast-forwarded.")?;
                return Ok(());
            }
            MergeBase::Base(oid) => oid,
        };
        let base = self.database().load_commit(&base_oid)?;

        let conflicted = {
            let mut staging = staging_arc.lock().await;
            self.classify_files(&mut staging, &base, &head, &target)?
        };

        let message = format!("Merged {} into {}.", target_name, current_name);
        self.write_commit(Parents::Merge(head_oid, target_oid), message)
            .await?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Three-way classification of every file touched by either side
    ///
    /// Returns whether any conflict was emitted.
    fn classify_files(
        &self,
        staging: &mut Staging,
        base: &CommitNode,
        head: &CommitNode,
        target: &CommitNode,
    ) -> anyhow::Result<bool> {
        let mut conflicted = false;

        // every file present in the target tip, against base and current
        for (name, target_fp) in target.files() {
            let head_fp = head.file_fingerprint(name);

            match base.file_fingerprint(name) {
                Some(base_fp) if base_fp != target_fp => {
                    if head_fp == Some(base_fp) {
                        // only the target side changed: take its version
                        self.checkout_file(target, name)?;
                        self.stage_file(staging, head, name)?;
                    } else if head_fp == Some(target_fp) {
                        // both sides converged on the same content: leave as-is
                    } else {
                        conflicted = true;
                        self.write_conflict(staging, head, name, head_fp, Some(target_fp))?;
                    }
                }
                // untouched on the target side
                Some(_) => {}
                None => {
                    // newly added on the target side
                    match head_fp {
                        Some(head_fp) if head_fp != target_fp => {
                            conflicted = true;
                            self.write_conflict(staging, head, name, Some(head_fp), Some(target_fp))?;
                        }
                        _ => {
                            // absent here, or already identical in both tips
                            self.checkout_file(target, name)?;
                            self.stage_file(staging, head, name)?;
                        }
                    }
                }
            }
        }

        // base-relative cleanup: deletion propagation and delete-vs-modify
        // conflicts for files the target no longer tracks
        for (name, base_fp) in base.files() {
            if target.tracks(name) {
                continue;
            }

            match head.file_fingerprint(name) {
                Some(head_fp) if head_fp == base_fp => {
                    // unchanged here, deleted on the target side
                    staging.mark_removed(name.clone());
                    self.workspace().remove_file(name)?;
                }
                Some(head_fp) => {
                    conflicted = true;
                    self.write_conflict(staging, head, name, Some(head_fp), None)?;
                }
                None => {}
            }
        }

        Ok(conflicted)
    }

    /// Write conflict markers into the working file and stage the result
    ///
    /// A side absent from its tip contributes the empty string.
    fn write_conflict(
        &self,
        staging: &mut Staging,
        head: &CommitNode,
        name: &str,
        ours: Option<&ObjectId>,
        theirs: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        let ours = match ours {
            Some(oid) => self.database().load_blob(oid)?.content().to_string(),
            None => String::new(),
        };
        let theirs = match theirs {
            Some(oid) => self.database().load_blob(oid)?.content().to_string(),
            None => String::new(),
        };

        self.workspace()
            .write_file(name, &conflict_markers(&ours, &theirs))?;
        self.stage_file(staging, head, name)
    }
}
