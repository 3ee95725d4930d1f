// SPDX-License-Identifier: MIT OR Apache-2.0

use huddle_core::{Group, GroupId};
use huddle_store::GroupChange;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FeedError {
    /// The subscriber fell behind the change feed and diffs were dropped.
    /// The projection can no longer be trusted; restart the subscription,
    /// a new one always starts from current state.
    #[error("missed {0} group changes, restart the subscription")]
    Lagged(u64),

    /// The store dropped its end of the feed.
    #[error("the group store closed its change feed")]
    Closed,
}

/// A live, newest-first projection of the group collection.
///
/// Constructed from an initial snapshot plus the store's change feed. Diffs
/// are applied idempotently: an `Added` for a group already present simply
/// replaces it, which makes the overlap between snapshotting and
/// subscribing harmless. The projection is a display surface, possibly
/// stale; it is never consulted for invariant checks.
#[derive(Debug)]
pub struct GroupFeed {
    groups: Vec<Group>,
    changes: broadcast::Receiver<GroupChange>,
}

impl GroupFeed {
    pub(crate) fn new(snapshot: Vec<Group>, changes: broadcast::Receiver<GroupChange>) -> Self {
        Self {
            groups: snapshot,
            changes,
        }
    }

    /// Current projection, newest first.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Wait for the next diff, fold it into the projection and return it.
    pub async fn next_change(&mut self) -> Result<GroupChange, FeedError> {
        match self.changes.recv().await {
            Ok(change) => {
                self.apply(&change);
                Ok(change)
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "group feed lagged behind the store");
                Err(FeedError::Lagged(skipped))
            }
            Err(RecvError::Closed) => Err(FeedError::Closed),
        }
    }

    fn apply(&mut self, change: &GroupChange) {
        match change {
            GroupChange::Added(group) | GroupChange::Modified(group) => {
                self.remove(&group.id);
                let position = self
                    .groups
                    .iter()
                    .position(|existing| existing.created_at <= group.created_at)
                    .unwrap_or(self.groups.len());
                self.groups.insert(position, group.clone());
            }
            GroupChange::Removed(id) => {
                self.remove(id);
            }
        }
    }

    fn remove(&mut self, id: &GroupId) {
        self.groups.retain(|existing| &existing.id != id);
    }
}
