// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory persistence for huddle groups and study sessions.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use huddle_core::{Group, GroupId, SessionId, StudySession, Timestamp, UserId};
use tokio::sync::broadcast;

use crate::groups::{GroupChange, GroupStore};
use crate::sessions::{SessionChange, SessionStore};

/// Buffered change events per feed before slow subscribers start lagging.
const FEED_CAPACITY: usize = 128;

#[derive(Debug, Default)]
pub struct InnerMemoryStore {
    groups: HashMap<GroupId, Group>,
    sessions: HashMap<SessionId, StudySession>,
    clock: Timestamp,
}

impl InnerMemoryStore {
    /// Next logical instant. Monotonic, so listing order never ties.
    fn tick(&mut self) -> Timestamp {
        self.clock += 1;
        self.clock
    }
}

/// An in-memory store for huddle collections.
///
/// `MemoryStore` supports usage in asynchronous and multi-threaded contexts
/// by wrapping an `InnerMemoryStore` with an `RwLock` and `Arc`. Atomicity of
/// a single membership delta is the write-lock scope, and change events are
/// published before the lock is released so feed order matches commit order.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    inner: Arc<RwLock<InnerMemoryStore>>,
    group_feed: broadcast::Sender<GroupChange>,
    session_feed: broadcast::Sender<SessionChange>,
}

impl MemoryStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        let (group_feed, _rx) = broadcast::channel(FEED_CAPACITY);
        let (session_feed, _rx) = broadcast::channel(FEED_CAPACITY);

        Self {
            inner: Arc::new(RwLock::new(InnerMemoryStore::default())),
            group_feed,
            session_feed,
        }
    }

    /// Obtain a read-lock on the store.
    pub fn read_store(&self) -> RwLockReadGuard<InnerMemoryStore> {
        self.inner
            .read()
            .expect("acquire shared read access on store")
    }

    /// Obtain a write-lock on the store.
    pub fn write_store(&self) -> RwLockWriteGuard<InnerMemoryStore> {
        self.inner
            .write()
            .expect("acquire exclusive write access on store")
    }

    fn random_id() -> String {
        hex::encode(rand::random::<[u8; 16]>())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupStore for MemoryStore {
    type Error = Infallible;

    async fn insert_group(
        &mut self,
        name: &str,
        created_by: &UserId,
        max_size: usize,
    ) -> Result<Group, Self::Error> {
        let mut store = self.write_store();

        let group = Group {
            id: GroupId::from(Self::random_id()),
            name: name.to_owned(),
            created_by: created_by.clone(),
            created_at: store.tick(),
            members: vec![created_by.clone()],
            max_size,
        };
        store.groups.insert(group.id.clone(), group.clone());
        let _ = self.group_feed.send(GroupChange::Added(group.clone()));

        Ok(group)
    }

    async fn get_group(&self, id: &GroupId) -> Result<Option<Group>, Self::Error> {
        Ok(self.read_store().groups.get(id).cloned())
    }

    async fn add_member(&mut self, id: &GroupId, user: &UserId) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        let Some(group) = store.groups.get_mut(id) else {
            return Ok(false);
        };

        if !group.members.contains(user) {
            group.members.push(user.clone());
            let _ = self.group_feed.send(GroupChange::Modified(group.clone()));
        }

        Ok(true)
    }

    async fn remove_member(&mut self, id: &GroupId, user: &UserId) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        let Some(group) = store.groups.get_mut(id) else {
            return Ok(false);
        };

        if let Some(position) = group.members.iter().position(|member| member == user) {
            group.members.remove(position);
            let _ = self.group_feed.send(GroupChange::Modified(group.clone()));
        }

        Ok(true)
    }

    async fn delete_group_if_empty(&mut self, id: &GroupId) -> Result<bool, Self::Error> {
        let mut store = self.write_store();

        let Some(group) = store.groups.get(id) else {
            return Ok(false);
        };
        if !group.members.is_empty() {
            return Ok(false);
        }

        store.groups.remove(id);
        let _ = self.group_feed.send(GroupChange::Removed(id.clone()));
        Ok(true)
    }

    async fn all_groups(&self) -> Result<Vec<Group>, Self::Error> {
        let mut groups: Vec<Group> = self.read_store().groups.values().cloned().collect();
        groups.sort_unstable_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(groups)
    }

    fn watch_groups(&self) -> broadcast::Receiver<GroupChange> {
        self.group_feed.subscribe()
    }
}

impl SessionStore for MemoryStore {
    type Error = Infallible;

    async fn insert_session(
        &mut self,
        user: &UserId,
        subject: Option<String>,
        duration_secs: u64,
    ) -> Result<StudySession, Self::Error> {
        let mut store = self.write_store();

        let session = StudySession {
            id: SessionId::from(Self::random_id()),
            user: user.clone(),
            subject,
            duration_secs,
            recorded_at: store.tick(),
        };
        store.sessions.insert(session.id.clone(), session.clone());
        let _ = self
            .session_feed
            .send(SessionChange::Added(session.clone()));

        Ok(session)
    }

    async fn sessions_for(&self, user: &UserId) -> Result<Vec<StudySession>, Self::Error> {
        let mut sessions: Vec<StudySession> = self
            .read_store()
            .sessions
            .values()
            .filter(|session| &session.user == user)
            .cloned()
            .collect();
        sessions.sort_unstable_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(sessions)
    }

    fn watch_sessions(&self) -> broadcast::Receiver<SessionChange> {
        self.session_feed.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;

    fn user(name: &str) -> UserId {
        UserId::from(name)
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids_and_monotonic_timestamps() {
        let mut store = MemoryStore::new();

        let first = store.insert_group("Algebra", &user("panda"), 10).await.unwrap();
        let second = store.insert_group("Topology", &user("panda"), 10).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(second.created_at > first.created_at);
        assert_eq!(first.members, vec![user("panda")]);
    }

    #[tokio::test]
    async fn add_member_union_is_idempotent() {
        let mut store = MemoryStore::new();
        let group = store.insert_group("Algebra", &user("panda"), 10).await.unwrap();
        let mut feed = store.watch_groups();

        assert!(store.add_member(&group.id, &user("icebear")).await.unwrap());
        assert!(store.add_member(&group.id, &user("icebear")).await.unwrap());

        let after = store.get_group(&group.id).await.unwrap().unwrap();
        assert_eq!(after.members, vec![user("panda"), user("icebear")]);

        // Exactly one Modified event: the duplicate union was a no-op.
        assert!(matches!(feed.try_recv(), Ok(GroupChange::Modified(_))));
        assert!(matches!(feed.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn remove_member_tolerates_absent_members() {
        let mut store = MemoryStore::new();
        let group = store.insert_group("Algebra", &user("panda"), 10).await.unwrap();
        let mut feed = store.watch_groups();

        assert!(store.remove_member(&group.id, &user("penguin")).await.unwrap());
        assert!(matches!(feed.try_recv(), Err(TryRecvError::Empty)));

        let after = store.get_group(&group.id).await.unwrap().unwrap();
        assert_eq!(after.members, vec![user("panda")]);
    }

    #[tokio::test]
    async fn mutations_on_missing_documents_report_absence() {
        let mut store = MemoryStore::new();
        let id = GroupId::from("missing");

        assert!(!store.add_member(&id, &user("panda")).await.unwrap());
        assert!(!store.remove_member(&id, &user("panda")).await.unwrap());
        assert!(!store.delete_group_if_empty(&id).await.unwrap());
    }

    #[tokio::test]
    async fn conditional_delete_requires_empty_membership() {
        let mut store = MemoryStore::new();
        let group = store.insert_group("Algebra", &user("panda"), 10).await.unwrap();

        assert!(!store.delete_group_if_empty(&group.id).await.unwrap());

        store.remove_member(&group.id, &user("panda")).await.unwrap();
        assert!(store.delete_group_if_empty(&group.id).await.unwrap());
        assert!(store.get_group(&group.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn all_groups_lists_newest_first() {
        let mut store = MemoryStore::new();
        store.insert_group("Algebra", &user("panda"), 10).await.unwrap();
        store.insert_group("Topology", &user("panda"), 10).await.unwrap();
        store.insert_group("Logic", &user("panda"), 10).await.unwrap();

        let names: Vec<String> = store
            .all_groups()
            .await
            .unwrap()
            .into_iter()
            .map(|group| group.name)
            .collect();
        assert_eq!(names, vec!["Logic", "Topology", "Algebra"]);
    }

    #[tokio::test]
    async fn feed_order_matches_commit_order() {
        let mut store = MemoryStore::new();
        let mut feed = store.watch_groups();

        let group = store.insert_group("Algebra", &user("panda"), 10).await.unwrap();
        store.add_member(&group.id, &user("icebear")).await.unwrap();
        store.remove_member(&group.id, &user("panda")).await.unwrap();
        store.remove_member(&group.id, &user("icebear")).await.unwrap();
        store.delete_group_if_empty(&group.id).await.unwrap();

        assert!(matches!(feed.recv().await, Ok(GroupChange::Added(_))));
        assert!(matches!(feed.recv().await, Ok(GroupChange::Modified(_))));
        assert!(matches!(feed.recv().await, Ok(GroupChange::Modified(_))));
        assert!(matches!(feed.recv().await, Ok(GroupChange::Modified(_))));
        assert_eq!(feed.recv().await.unwrap(), GroupChange::Removed(group.id));
    }

    #[tokio::test]
    async fn sessions_are_scoped_per_user_newest_first() {
        let mut store = MemoryStore::new();
        store.insert_session(&user("panda"), None, 60).await.unwrap();
        store
            .insert_session(&user("icebear"), Some("Fish".to_owned()), 120)
            .await
            .unwrap();
        store
            .insert_session(&user("panda"), Some("Algebra".to_owned()), 300)
            .await
            .unwrap();

        let sessions = store.sessions_for(&user("panda")).await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].subject.as_deref(), Some("Algebra"));
        assert_eq!(sessions[1].subject, None);
    }
}
