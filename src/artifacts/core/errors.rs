//! Typed failures reported to the user
//!
//! Commands return `anyhow::Result`; the variants below are the defined,
//! user-visible failures and are recovered in `main` by downcasting. Anything
//! else reaching `main` is an I/O or corruption failure.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use thiserror::Error;

/// The command line is well-formed but cannot be acted on where it was issued
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Not in an initialized Bitlet directory.")]
    NotInitialized,
    #[error("A Bitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("Incorrect operands.")]
    IncorrectOperands,
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),
}

/// The operation is invalid for the current repository state
///
/// Always detected before anything is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("File does not exist.")]
    FileNotFound(String),
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No reason to remove the file.")]
    NothingToRemove(String),
    #[error("A branch with that name already exists.")]
    BranchExists(String),
    #[error("No such branch exists.")]
    NoSuchBranch(String),
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch(String),
    #[error("File does not exist in that commit.")]
    FileNotInCommit(String),
    #[error("No commit with that id exists.")]
    NoSuchCommit(String),
    #[error("Commit id {prefix} is ambiguous: {}", .candidates.join(", "))]
    AmbiguousCommit {
        prefix: String,
        candidates: Vec<String>,
    },
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict(Vec<String>),
    #[error("Found no commit with that message.")]
    CommitMessageNotFound(String),
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("A branch with that name does not exist.")]
    UnknownBranch(String),
    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,
    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch(String),
    #[error("No common ancestor between {0} and {1}.")]
    NoCommonAncestor(ObjectId, ObjectId),
}

/// An object the repository structure says must exist is missing or malformed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("object {0} is missing from the object store")]
    MissingObject(ObjectId),
    #[error("object {oid} is not a {expected}")]
    UnexpectedObjectType { oid: ObjectId, expected: ObjectType },
    #[error("reference {0} does not point to a commit")]
    DanglingRef(String),
}
