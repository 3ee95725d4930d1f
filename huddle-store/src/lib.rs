// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence interfaces and implementations for huddle application state.
//!
//! The traits here are deliberately collection-shaped rather than a generic
//! document database: they expose exactly the capabilities the repositories
//! rely on from the hosted backend. That is document CRUD, atomic
//! field-scoped set-union and set-difference on the membership array, a
//! conditional delete, store-assigned monotonic creation timestamps and a
//! live change feed per collection. They are not intended to offer generic
//! storage solutions for other data types.
//!
//! ## Mutation contract
//!
//! Membership mutations are commutative, idempotent deltas. A store
//! implementation must never translate them into a whole-array overwrite:
//! two clients joining and leaving the same group concurrently have to
//! commute without lost updates. A delta that changes nothing (union with a
//! present member, difference with an absent one) is a no-op and publishes
//! no change event.
//!
//! ## Change feeds
//!
//! Every collection exposes a broadcast feed of incremental diffs
//! ([`GroupChange`], [`SessionChange`]). Events are published in commit
//! order. Subscribers that fall behind observe a lagged receiver and are
//! expected to resubscribe and resnapshot; a fresh subscription always
//! starts from current state.
//!
//! ## Implementations
//!
//! [`MemoryStore`] is the in-memory reference implementation, also used as
//! the test double throughout the workspace. Within it, atomicity is the
//! write-lock scope.

pub mod groups;
pub mod memory;
pub mod sessions;

pub use groups::{GroupChange, GroupStore, LocalGroupStore};
pub use memory::MemoryStore;
pub use sessions::{LocalSessionStore, SessionChange, SessionStore};
