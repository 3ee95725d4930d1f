// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;
use std::time::Duration;

use huddle_core::session::{self, SubjectError};
use huddle_core::{IdentityProvider, StudySession, UserId};
use huddle_store::SessionStore;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("signed-in user required")]
    AuthRequired,

    #[error(transparent)]
    InvalidSubject(#[from] SubjectError),

    /// Sessions shorter than one full second are treated as nothing
    /// happened and rejected rather than persisted as zero.
    #[error("session duration must be at least one second")]
    EmptyDuration,

    /// Store-level failure. The backend diagnostic is logged, never
    /// forwarded to the caller.
    #[error("the session store is currently unavailable")]
    StoreUnavailable,
}

/// The per-user study log.
///
/// Like the group repository, it takes its store handle and identity
/// accessor at construction. All reads and writes are scoped to the acting
/// user; there is no way to query another user's log through this API.
#[derive(Clone, Debug)]
pub struct SessionLog<S, I> {
    store: S,
    identity: I,
}

impl<S, I> SessionLog<S, I>
where
    S: SessionStore,
    I: IdentityProvider,
{
    pub fn new(store: S, identity: I) -> Self {
        Self { store, identity }
    }

    /// Persist a finished stopwatch run for the acting user.
    ///
    /// Sub-second durations are rejected; the subject label is trimmed and
    /// an empty one is stored as no label.
    pub async fn record(
        &mut self,
        subject: Option<&str>,
        duration: Duration,
    ) -> Result<StudySession, SessionError> {
        let user = self.acting_user()?;

        let duration_secs = duration.as_secs();
        if duration_secs == 0 {
            return Err(SessionError::EmptyDuration);
        }

        let subject = match subject {
            Some(label) => session::validate_subject(label)?,
            None => None,
        };

        self.store
            .insert_session(&user, subject, duration_secs)
            .await
            .map_err(store_unavailable)
    }

    /// The acting user's sessions, newest first.
    pub async fn own_sessions(&self) -> Result<Vec<StudySession>, SessionError> {
        let user = self.acting_user()?;
        self.store
            .sessions_for(&user)
            .await
            .map_err(store_unavailable)
    }

    /// Total time the acting user has logged across all sessions.
    pub async fn total_time(&self) -> Result<Duration, SessionError> {
        let sessions = self.own_sessions().await?;
        let total = sessions
            .iter()
            .map(|session| session.duration_secs)
            .sum();
        Ok(Duration::from_secs(total))
    }

    fn acting_user(&self) -> Result<UserId, SessionError> {
        self.identity
            .current_user()
            .ok_or(SessionError::AuthRequired)
    }
}

fn store_unavailable<E: Display>(err: E) -> SessionError {
    warn!(%err, "session store operation failed");
    SessionError::StoreUnavailable
}
