//! Integrity checks over stored commit history.
//!
//! Storage is append-only, but nothing stops an operator from editing
//! rows out of band. These checks recompute every digest and walk the
//! parent links so tampering or lost writes surface as errors instead of
//! silently corrupt history.

use thiserror::Error;

use super::commit::{CommitHash, TaskCommit};
use super::digest::commit_digest;
use super::ids::CommitId;

/// Ways a stored commit chain can fail verification.
#[derive(Debug, Error)]
pub enum ChainError {
    /// A commit's stored hash does not match its recomputed digest.
    #[error("commit {commit} stores hash {stored} but its content hashes to {computed}")]
    HashMismatch {
        /// Commit that failed the digest check.
        commit: CommitId,
        /// Hash persisted alongside the commit.
        stored: CommitHash,
        /// Digest recomputed from the commit content.
        computed: CommitHash,
    },

    /// A commit does not reference the hash of its predecessor.
    #[error("commit {commit} is not linked to its predecessor")]
    BrokenLink {
        /// Commit whose parent reference is wrong.
        commit: CommitId,
    },

    /// The oldest commit of a history carries a parent reference.
    #[error("commit {commit} should be the genesis commit but has a parent")]
    MissingGenesis {
        /// Oldest commit of the verified history.
        commit: CommitId,
    },

    /// Commit content could not be re-encoded for digest comparison.
    #[error("commit content could not be canonicalized")]
    Canonicalize(#[from] serde_json::Error),
}

/// Recomputes `commit`'s digest and compares it to the stored hash.
///
/// # Errors
///
/// Returns [`ChainError::HashMismatch`] when the stored hash differs from
/// the recomputed digest.
pub fn verify_commit(commit: &TaskCommit) -> Result<(), ChainError> {
    let computed = commit_digest(&commit.content())?;
    if &computed != commit.hash() {
        return Err(ChainError::HashMismatch {
            commit: commit.id(),
            stored: commit.hash().clone(),
            computed,
        });
    }
    Ok(())
}

/// Verifies a task's complete history, ordered newest first.
///
/// Every digest is recomputed, every commit must reference the hash of
/// the commit before it, and the oldest commit must be the genesis
/// commit. An empty history is trivially valid.
///
/// # Errors
///
/// Returns the first [`ChainError`] encountered walking from the newest
/// commit towards the genesis commit.
pub fn verify_chain(history: &[TaskCommit]) -> Result<(), ChainError> {
    for commit in history {
        verify_commit(commit)?;
    }
    for pair in history.windows(2) {
        let [newer, older] = pair else { continue };
        if newer.parent_hash() != Some(older.hash()) {
            return Err(ChainError::BrokenLink { commit: newer.id() });
        }
    }
    if let Some(oldest) = history.last() {
        if oldest.parent_hash().is_some() {
            return Err(ChainError::MissingGenesis {
                commit: oldest.id(),
            });
        }
    }
    Ok(())
}
