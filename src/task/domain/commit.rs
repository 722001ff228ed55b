//! Hash-chained commit records for task history.
//!
//! Every mutation of a task appends exactly one [`TaskCommit`]. Each
//! commit stores the digest of its own content plus the hash of its
//! parent, so a task's history forms a single linear chain rooted at the
//! genesis commit. Commits are immutable once sealed.

use std::fmt;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::org::domain::UserId;

use super::changes::ChangeSet;
use super::digest::{CommitContent, commit_digest};
use super::ids::{CommitId, TaskId};
use super::snapshot::TaskSnapshot;
use super::task::{Task, TaskStatus};

/// Hex-encoded SHA-256 digest identifying a commit's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitHash(String);

impl CommitHash {
    /// Wraps an already-computed digest string.
    #[must_use]
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// The digest as a hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the hex string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for CommitHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised while sealing a commit draft.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The commit message is empty after trimming.
    #[error("commit message must not be empty")]
    EmptyMessage,

    /// The commit content could not be canonicalized for hashing.
    #[error("commit content could not be canonicalized")]
    Canonicalize(#[from] serde_json::Error),
}

/// An immutable, hash-chained record of one task mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCommit {
    id: CommitId,
    task_id: TaskId,
    author_id: UserId,
    message: String,
    from_status: Option<TaskStatus>,
    to_status: Option<TaskStatus>,
    changes: ChangeSet,
    snapshot: TaskSnapshot,
    hash: CommitHash,
    parent_hash: Option<CommitHash>,
    created_at: DateTime<Utc>,
}

impl TaskCommit {
    /// Rehydrates a commit from storage without re-verifying the digest.
    #[must_use]
    pub fn from_persisted(data: PersistedCommitData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author_id: data.author_id,
            message: data.message,
            from_status: data.from_status,
            to_status: data.to_status,
            changes: data.changes,
            snapshot: data.snapshot,
            hash: data.hash,
            parent_hash: data.parent_hash,
            created_at: data.created_at,
        }
    }

    /// Unique identifier of the commit row.
    #[must_use]
    pub const fn id(&self) -> CommitId {
        self.id
    }

    /// Task the commit belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// User who authored the mutation.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Human-readable summary of the mutation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status the task held before the mutation, when it moved.
    #[must_use]
    pub const fn from_status(&self) -> Option<TaskStatus> {
        self.from_status
    }

    /// Status the task held after the mutation, when it moved.
    #[must_use]
    pub const fn to_status(&self) -> Option<TaskStatus> {
        self.to_status
    }

    /// Fields the mutation touched.
    #[must_use]
    pub const fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Revertable task state right after the mutation.
    #[must_use]
    pub const fn snapshot(&self) -> &TaskSnapshot {
        &self.snapshot
    }

    /// Digest of this commit's content.
    #[must_use]
    pub const fn hash(&self) -> &CommitHash {
        &self.hash
    }

    /// Digest of the parent commit, absent on the genesis commit.
    #[must_use]
    pub const fn parent_hash(&self) -> Option<&CommitHash> {
        self.parent_hash.as_ref()
    }

    /// Instant the commit was authored.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The hashed content of this commit, for digest verification.
    #[must_use]
    pub fn content(&self) -> CommitContent<'_> {
        CommitContent {
            task_id: self.task_id,
            author_id: self.author_id,
            message: &self.message,
            changes: &self.changes,
            parent_hash: self.parent_hash.as_ref(),
            created_at: self.created_at,
        }
    }
}

/// Raw commit fields loaded from storage.
#[derive(Debug, Clone)]
pub struct PersistedCommitData {
    /// Unique identifier of the commit row.
    pub id: CommitId,
    /// Task the commit belongs to.
    pub task_id: TaskId,
    /// User who authored the mutation.
    pub author_id: UserId,
    /// Human-readable summary of the mutation.
    pub message: String,
    /// Status before the mutation, when it moved.
    pub from_status: Option<TaskStatus>,
    /// Status after the mutation, when it moved.
    pub to_status: Option<TaskStatus>,
    /// Fields the mutation touched.
    pub changes: ChangeSet,
    /// Revertable task state right after the mutation.
    pub snapshot: TaskSnapshot,
    /// Digest of the commit content.
    pub hash: CommitHash,
    /// Digest of the parent commit, absent on the genesis commit.
    pub parent_hash: Option<CommitHash>,
    /// Instant the commit was authored.
    pub created_at: DateTime<Utc>,
}

/// Assembles the fields of a commit before it is sealed and hashed.
#[derive(Debug, Clone)]
pub struct CommitDraft {
    task_id: TaskId,
    author_id: UserId,
    message: String,
    from_status: Option<TaskStatus>,
    to_status: Option<TaskStatus>,
    changes: ChangeSet,
    parent_hash: Option<CommitHash>,
}

impl CommitDraft {
    /// Starts a draft for `task_id` authored by `author_id`.
    #[must_use]
    pub fn new(task_id: TaskId, author_id: UserId, message: impl Into<String>) -> Self {
        Self {
            task_id,
            author_id,
            message: message.into(),
            from_status: None,
            to_status: None,
            changes: ChangeSet::new(),
            parent_hash: None,
        }
    }

    /// Attaches the fields the mutation touched.
    #[must_use]
    pub fn with_changes(mut self, changes: ChangeSet) -> Self {
        self.changes = changes;
        self
    }

    /// Records a status transition carried by the mutation.
    #[must_use]
    pub const fn with_transition(mut self, from: Option<TaskStatus>, to: Option<TaskStatus>) -> Self {
        self.from_status = from;
        self.to_status = to;
        self
    }

    /// Chains the draft onto its parent commit.
    #[must_use]
    pub fn with_parent(mut self, parent: CommitHash) -> Self {
        self.parent_hash = Some(parent);
        self
    }

    /// Seals the draft into an immutable commit.
    ///
    /// `task` must already reflect the mutation this commit records; its
    /// revertable fields are captured as the commit snapshot. The commit
    /// instant is read from `clock` and participates in the digest.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::EmptyMessage`] when the trimmed message is
    /// empty and [`CommitError::Canonicalize`] when the content cannot be
    /// encoded for hashing.
    pub fn seal(self, task: &Task, clock: &impl Clock) -> Result<TaskCommit, CommitError> {
        let message = self.message.trim().to_owned();
        if message.is_empty() {
            return Err(CommitError::EmptyMessage);
        }
        let created_at = clock.utc();
        let content = CommitContent {
            task_id: self.task_id,
            author_id: self.author_id,
            message: &message,
            changes: &self.changes,
            parent_hash: self.parent_hash.as_ref(),
            created_at,
        };
        let hash = commit_digest(&content)?;
        Ok(TaskCommit {
            id: CommitId::new(),
            task_id: self.task_id,
            author_id: self.author_id,
            message,
            from_status: self.from_status,
            to_status: self.to_status,
            changes: self.changes,
            snapshot: TaskSnapshot::capture(task),
            hash,
            parent_hash: self.parent_hash,
            created_at,
        })
    }
}
