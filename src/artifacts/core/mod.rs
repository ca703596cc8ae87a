//! Shared error taxonomy
//!
//! Every user-facing failure a command can report is one of these
//! conditions. They are recoverable-by-retry: the command prints the
//! message and halts with a success exit, leaving the repository state
//! untouched. Storage-medium failures stay plain `anyhow` errors and are
//! fatal for the invocation.

use thiserror::Error;

/// User-facing condition reported by a command
///
/// The display string of each variant is the exact line printed to the
/// user; nothing else is added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No reason to remove the file.")]
    NothingToRemove,
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
    #[error("No commit with that id exists.")]
    NoCommitWithId,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("File does not exist.")]
    FileNotInWorkspace,
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("A branch with that name does not exist.")]
    UnknownBranch,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("A branch with that name already exists.")]
    DuplicateBranch,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    WouldOverwriteUntracked,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,
    #[error("Given branch is an ancestor of the current branch.")]
    BranchIsAncestor,
    #[error("A vit version-control system already exists in the current directory.")]
    RepositoryExists,
    #[error("Not in an initialized vit directory.")]
    RepositoryMissing,
    #[error("Incorrect operands.")]
    IncorrectOperands,
}
