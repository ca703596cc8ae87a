//! Merge base selection
//!
//! Picks the common ancestor used as the pivot of a three-way merge, and
//! detects the fast-forward degenerate case.
//!
//! ## Algorithm
//!
//! Two symmetric searches run over the commit graph:
//!
//! - From the target branch tip outward (breadth-first over parent links,
//!   first parent ahead of the second) until a node inside the current
//!   branch's transitive-ancestor set is reached — candidate A.
//! - From the current branch tip outward until a node inside the target
//!   branch's ancestor set is reached — candidate B.
//!
//! When candidate B is the current tip itself, the current branch is a
//! strict ancestor of the target and the merge is a pure fast-forward.
//! Otherwise the candidates are compared by their index within the current
//! branch's linear ancestor list: the deeper (tip-closer) candidate wins,
//! and ties go to candidate B. With criss-cross histories more than one
//! best common ancestor can exist; this tie-break deliberately picks a
//! single one instead of computing a true lowest common ancestor, so the
//! selected base depends on which branch the merge is run from.
//!
//! ## Debug Logging
//!
//! Build with the `debug_merge` feature to trace candidate selection:
//! ```bash
//! cargo build --features debug_merge
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::{HashSet, VecDeque};

/// Macro for debug logging that is enabled with the debug_merge feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

/// One branch's side of a merge: its tip and the tip's ancestor list
#[derive(Debug, Clone, Copy)]
pub struct BranchTip<'c> {
    pub oid: &'c ObjectId,
    pub ancestors: &'c [ObjectId],
}

/// Outcome of merge base selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeBase {
    /// The current branch is a strict ancestor of the target: no three-way
    /// merge is needed, the current branch can simply move forward
    FastForward,
    /// The selected pivot commit for a three-way merge
    Base(ObjectId),
}

/// Finds the merge base between two branch tips
///
/// Generic over a commit loader so the search works against any backing
/// store; the loader returns the slim parent-link view of a commit.
pub struct MergeBaseFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> MergeBaseFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Select the merge base for merging `target` into `current`
    pub fn select(&self, current: BranchTip, target: BranchTip) -> anyhow::Result<MergeBase> {
        // each side's membership set includes the tip itself, so two
        // branches pointing at the same commit resolve as a fast-forward
        let current_side: HashSet<&ObjectId> = current
            .ancestors
            .iter()
            .chain(std::iter::once(current.oid))
            .collect();
        let target_side: HashSet<&ObjectId> = target
            .ancestors
            .iter()
            .chain(std::iter::once(target.oid))
            .collect();

        let given_candidate = self.search(target.oid, &current_side)?;
        let current_candidate = self.search(current.oid, &target_side)?;

        if current_candidate.as_ref() == Some(current.oid) {
            debug_log!("current tip {} reachable from target: fast-forward", current.oid);
            return Ok(MergeBase::FastForward);
        }

        let given_candidate =
            given_candidate.context("no common ancestor reachable from the target branch")?;
        let current_candidate =
            current_candidate.context("no common ancestor reachable from the current branch")?;

        let given_depth = Self::depth(current.ancestors, &given_candidate);
        let current_depth = Self::depth(current.ancestors, &current_candidate);

        debug_log!(
            "candidates: given {} (depth {}), current {} (depth {})",
            given_candidate,
            given_depth,
            current_candidate,
            current_depth
        );

        if given_depth > current_depth {
            Ok(MergeBase::Base(given_candidate))
        } else {
            Ok(MergeBase::Base(current_candidate))
        }
    }

    /// Breadth-first walk from `tip` until a node in `other_side` is found
    fn search(
        &self,
        tip: &ObjectId,
        other_side: &HashSet<&ObjectId>,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut work = VecDeque::from([tip.clone()]);
        let mut seen = HashSet::new();

        while let Some(oid) = work.pop_front() {
            if !seen.insert(oid.clone()) {
                continue;
            }

            if other_side.contains(&oid) {
                return Ok(Some(oid));
            }

            let commit = (self.commit_loader)(&oid)?;
            for parent in commit.parents {
                work.push_back(parent);
            }
        }

        Ok(None)
    }

    /// Index of a candidate within the ancestor list, Java-style -1 if absent
    fn depth(ancestors: &[ObjectId], candidate: &ObjectId) -> i64 {
        ancestors
            .iter()
            .position(|ancestor| ancestor == candidate)
            .map(|index| index as i64)
            .unwrap_or(-1)
    }
}
