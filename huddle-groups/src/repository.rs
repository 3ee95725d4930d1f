// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use huddle_core::group::{self, DEFAULT_GROUP_CAPACITY, NameError};
use huddle_core::{Group, GroupId, IdentityProvider, UserId};
use huddle_store::GroupStore;
use thiserror::Error;
use tracing::{debug, warn};

use crate::feed::GroupFeed;

#[derive(Debug, Error)]
pub enum GroupError {
    /// Malformed group name, rejected before any store call.
    #[error(transparent)]
    InvalidName(#[from] NameError),

    #[error("signed-in user required")]
    AuthRequired,

    #[error("group {0} does not exist")]
    NotFound(GroupId),

    #[error("already a member of group {0}")]
    AlreadyMember(GroupId),

    #[error("group {0} is full")]
    GroupFull(GroupId),

    /// Store-level failure. The backend diagnostic is logged, never
    /// forwarded to the caller.
    #[error("the group store is currently unavailable")]
    StoreUnavailable,
}

/// The group repository.
///
/// Takes its store handle and identity accessor as construction parameters;
/// it never reads ambient globals, and it holds no authoritative cache. A
/// snapshot read before a commit is a pre-check, nothing more.
#[derive(Clone, Debug)]
pub struct GroupRepository<S, I> {
    store: S,
    identity: I,
}

impl<S, I> GroupRepository<S, I>
where
    S: GroupStore,
    I: IdentityProvider,
{
    pub fn new(store: S, identity: I) -> Self {
        Self { store, identity }
    }

    /// Create a group with the acting user as its first member.
    ///
    /// The name is trimmed before validation. Capacity is fixed at
    /// [`DEFAULT_GROUP_CAPACITY`] for all groups created by this client.
    pub async fn create_group(&mut self, name: &str) -> Result<GroupId, GroupError> {
        let user = self.acting_user()?;
        let name = group::validate_name(name)?;

        let group = self
            .store
            .insert_group(&name, &user, DEFAULT_GROUP_CAPACITY)
            .await
            .map_err(store_unavailable)?;

        Ok(group.id)
    }

    /// Join a group as the acting user.
    ///
    /// Pre-checks run against a snapshot and can pass on two clients racing
    /// for the same last slot; the union below cannot enforce capacity on
    /// its own. After the commit the group is re-read, and a member whose
    /// committed position lies at or beyond `max_size` lost the race: it
    /// backs itself out again and reports [`GroupError::GroupFull`].
    pub async fn join_group(&mut self, id: &GroupId) -> Result<(), GroupError> {
        let user = self.acting_user()?;

        let snapshot = self
            .get(id)
            .await?
            .ok_or_else(|| GroupError::NotFound(id.clone()))?;
        if snapshot.has_member(&user) {
            return Err(GroupError::AlreadyMember(id.clone()));
        }
        if snapshot.is_full() {
            return Err(GroupError::GroupFull(id.clone()));
        }

        let exists = self
            .store
            .add_member(id, &user)
            .await
            .map_err(store_unavailable)?;
        if !exists {
            return Err(GroupError::NotFound(id.clone()));
        }

        let Some(committed) = self.get(id).await? else {
            // The document can only vanish here if another writer removed us
            // again after our union committed; the join itself took effect.
            return Ok(());
        };

        match committed.member_position(&user) {
            Some(position) if position >= committed.max_size => {
                self.store
                    .remove_member(id, &user)
                    .await
                    .map_err(store_unavailable)?;
                Err(GroupError::GroupFull(id.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Leave a group as the acting user.
    ///
    /// Removing a non-member is a success no-op, tolerating double
    /// submission. A group drained to empty is cleaned up with a conditional
    /// delete; when a concurrent join refills the group first, the skipped
    /// cleanup is benign and only logged.
    pub async fn leave_group(&mut self, id: &GroupId) -> Result<(), GroupError> {
        let user = self.acting_user()?;

        let exists = self
            .store
            .remove_member(id, &user)
            .await
            .map_err(store_unavailable)?;
        if !exists {
            return Err(GroupError::NotFound(id.clone()));
        }

        if let Some(group) = self.get(id).await?
            && group.is_empty()
        {
            let deleted = self
                .store
                .delete_group_if_empty(id)
                .await
                .map_err(store_unavailable)?;
            if !deleted {
                debug!(group = %id, "skipped cleanup, group gained a member before the delete");
            }
        }

        Ok(())
    }

    /// Live view of all groups, newest first.
    ///
    /// Subscribes to the change feed before taking the snapshot so no diff
    /// between the two is lost; the feed absorbs the overlap window by
    /// applying diffs idempotently. Dropping the returned feed releases the
    /// subscription.
    pub async fn live_groups(&self) -> Result<GroupFeed, GroupError> {
        self.acting_user()?;

        let changes = self.store.watch_groups();
        let snapshot = self
            .store
            .all_groups()
            .await
            .map_err(store_unavailable)?;

        Ok(GroupFeed::new(snapshot, changes))
    }

    fn acting_user(&self) -> Result<UserId, GroupError> {
        self.identity.current_user().ok_or(GroupError::AuthRequired)
    }

    async fn get(&self, id: &GroupId) -> Result<Option<Group>, GroupError> {
        self.store.get_group(id).await.map_err(store_unavailable)
    }
}

fn store_unavailable<E: Display>(err: E) -> GroupError {
    warn!(%err, "group store operation failed");
    GroupError::StoreUnavailable
}
