// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the group collection.

use std::fmt::{Debug, Display};

use huddle_core::{Group, GroupId, UserId};
use tokio::sync::broadcast;

/// An incremental diff on the group collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupChange {
    /// A group appeared in the collection.
    Added(Group),

    /// A group's membership changed.
    Modified(Group),

    /// A group was deleted.
    Removed(GroupId),
}

/// Interface for storing, mutating and watching group documents.
///
/// Two variants of the trait are provided: one which is thread-safe
/// (implementing `Send`) and one which is purely intended for
/// single-threaded execution contexts.
#[trait_variant::make(GroupStore: Send)]
pub trait LocalGroupStore: Clone {
    type Error: Display + Debug;

    /// Insert a new group document.
    ///
    /// The store assigns the id and the creation timestamp; membership
    /// starts as `[created_by]`. Returns the group as persisted.
    async fn insert_group(
        &mut self,
        name: &str,
        created_by: &UserId,
        max_size: usize,
    ) -> Result<Group, Self::Error>;

    /// Get a group document.
    async fn get_group(&self, id: &GroupId) -> Result<Option<Group>, Self::Error>;

    /// Atomic set-union of one user into a group's membership array.
    ///
    /// Idempotent: a union with a member already present changes nothing and
    /// publishes no change event. Returns `false` when the document does not
    /// exist, `true` otherwise.
    async fn add_member(&mut self, id: &GroupId, user: &UserId) -> Result<bool, Self::Error>;

    /// Atomic set-difference of one user from a group's membership array.
    ///
    /// Removing an absent member is a no-op, not an error. Returns `false`
    /// when the document does not exist, `true` otherwise.
    async fn remove_member(&mut self, id: &GroupId, user: &UserId) -> Result<bool, Self::Error>;

    /// Conditional delete: remove the group only if its membership is still
    /// empty at commit time.
    ///
    /// Returns `true` when the delete occurred and `false` when the group
    /// was absent or had gained a member.
    async fn delete_group_if_empty(&mut self, id: &GroupId) -> Result<bool, Self::Error>;

    /// Snapshot of all groups, newest first.
    async fn all_groups(&self) -> Result<Vec<Group>, Self::Error>;

    /// Subscribe to the group collection's change feed.
    fn watch_groups(&self) -> broadcast::Receiver<GroupChange>;
}
