// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the study-session collection.

use std::fmt::{Debug, Display};

use huddle_core::{StudySession, UserId};
use tokio::sync::broadcast;

/// An incremental diff on the session collection.
///
/// The session log is append-only, so the only diff is an addition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionChange {
    Added(StudySession),
}

/// Interface for storing and watching study sessions.
///
/// Two variants of the trait are provided: one which is thread-safe
/// (implementing `Send`) and one which is purely intended for
/// single-threaded execution contexts.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore: Clone {
    type Error: Display + Debug;

    /// Insert a finished study session.
    ///
    /// The store assigns the id and the `recorded_at` timestamp. Returns the
    /// session as persisted.
    async fn insert_session(
        &mut self,
        user: &UserId,
        subject: Option<String>,
        duration_secs: u64,
    ) -> Result<StudySession, Self::Error>;

    /// All sessions recorded by one user, newest first.
    async fn sessions_for(&self, user: &UserId) -> Result<Vec<StudySession>, Self::Error>;

    /// Subscribe to the session collection's change feed.
    fn watch_sessions(&self) -> broadcast::Receiver<SessionChange>;
}
