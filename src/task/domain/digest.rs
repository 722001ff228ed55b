//! Canonical serialization and hashing of commit content.
//!
//! A commit's hash is the SHA-256 of a canonical JSON document built from
//! the commit's content. Canonical means: object keys sorted
//! lexicographically (the default `serde_json` map is a `BTreeMap`), no
//! insignificant whitespace, and the commit instant encoded as integer
//! milliseconds since the Unix epoch under the `ts` key. Any two commits
//! with the same content therefore hash identically, and a stored commit
//! can be re-hashed at read time to detect tampering.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, to_value};
use sha2::{Digest, Sha256};

use crate::org::domain::UserId;

use super::changes::ChangeSet;
use super::commit::CommitHash;
use super::ids::TaskId;

/// The hashed fields of a commit, borrowed from the draft or stored row.
#[derive(Debug, Clone, Copy)]
pub struct CommitContent<'a> {
    /// Task the commit belongs to.
    pub task_id: TaskId,
    /// User who authored the mutation.
    pub author_id: UserId,
    /// Human-readable summary of the mutation.
    pub message: &'a str,
    /// Fields the mutation touched.
    pub changes: &'a ChangeSet,
    /// Hash of the previous commit, absent on the genesis commit.
    pub parent_hash: Option<&'a CommitHash>,
    /// Instant the commit was authored.
    pub created_at: DateTime<Utc>,
}

/// Computes the canonical SHA-256 digest of `content`.
///
/// # Errors
///
/// Returns a serialization error when the change set cannot be encoded,
/// which does not happen for values constructed by this crate.
pub fn commit_digest(content: &CommitContent<'_>) -> serde_json::Result<CommitHash> {
    let mut payload = Map::new();
    payload.insert("author_id".to_owned(), to_value(content.author_id)?);
    payload.insert("changes".to_owned(), to_value(content.changes)?);
    payload.insert(
        "message".to_owned(),
        Value::String(content.message.to_owned()),
    );
    payload.insert("parent_hash".to_owned(), to_value(content.parent_hash)?);
    payload.insert("task_id".to_owned(), to_value(content.task_id)?);
    payload.insert(
        "ts".to_owned(),
        Value::from(content.created_at.timestamp_millis()),
    );
    let canonical = serde_json::to_string(&Value::Object(payload))?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(CommitHash::new(format!("{:x}", hasher.finalize())))
}
