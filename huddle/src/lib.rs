// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meta crate bundling the huddle stack: shared data types, persistence
//! interfaces with the in-memory reference store, the group-membership
//! repository and the personal study log.
//!
//! Application code usually wires the pieces together like this: one
//! [`MemoryStore`] (or another store implementation), one
//! [`SharedIdentity`] driven by the authentication layer, and one
//! repository per concern on top of both.

pub use huddle_core::{
    Group, GroupId, IdentityProvider, SessionId, SharedIdentity, StudySession, Timestamp, UserId,
};
pub use huddle_groups::{FeedError, GroupError, GroupFeed, GroupRepository};
pub use huddle_sessions::{SessionError, SessionLog, Stopwatch};
pub use huddle_store::{
    GroupChange, GroupStore, LocalGroupStore, LocalSessionStore, MemoryStore, SessionChange,
    SessionStore,
};
