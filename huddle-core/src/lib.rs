// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared data types for the huddle stack: opaque identifiers, the group and
//! study-session documents, and the identity seam repositories read the
//! acting user from.
//!
//! The document store assigns all identifiers and timestamps; nothing in this
//! crate fabricates either.

pub mod group;
pub mod identifiers;
pub mod identity;
pub mod session;

pub use group::{DEFAULT_GROUP_CAPACITY, Group, NameError, validate_name};
pub use identifiers::{GroupId, SessionId, UserId};
pub use identity::{IdentityProvider, SharedIdentity};
pub use session::{StudySession, SubjectError, validate_subject};

/// Logical instant assigned by the document store.
///
/// Monotonic per store, used only for newest-first ordering in listings.
pub type Timestamp = u64;
