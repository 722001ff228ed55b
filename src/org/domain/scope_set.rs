//! Membership set used across scope resolution and task assignment.

use super::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ordered, duplicate-free set of user identifiers.
///
/// The same value type backs every membership question in the crate:
/// resolved authority scopes, directed-task target sets, and task
/// assignment sets. Iteration order is the identifiers' natural order,
/// which keeps serialized forms (and therefore commit digests) stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(BTreeSet<UserId>);

impl ScopeSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Creates a set containing a single user.
    #[must_use]
    pub fn single(user_id: UserId) -> Self {
        Self(BTreeSet::from([user_id]))
    }

    /// Adds a user to the set, returning `true` if it was not present.
    pub fn insert(&mut self, user_id: UserId) -> bool {
        self.0.insert(user_id)
    }

    /// Removes a user from the set, returning `true` if it was present.
    pub fn remove(&mut self, user_id: UserId) -> bool {
        self.0.remove(&user_id)
    }

    /// Returns `true` when the user is a member.
    #[must_use]
    pub fn contains(&self, user_id: UserId) -> bool {
        self.0.contains(&user_id)
    }

    /// Returns `true` when the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the members shared with `other`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).copied().collect())
    }

    /// Returns `true` when any member of `other` is also a member here.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|id| large.contains(id))
    }

    /// Iterates members in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = UserId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<UserId> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<UserId> for ScopeSet {
    fn extend<I: IntoIterator<Item = UserId>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ScopeSet {
    type Item = UserId;
    type IntoIter = std::collections::btree_set::IntoIter<UserId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScopeSet {
    type Item = &'a UserId;
    type IntoIter = std::collections::btree_set::Iter<'a, UserId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
