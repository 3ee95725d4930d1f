// SPDX-License-Identifier: MIT OR Apache-2.0

//! The study-group repository.
//!
//! [`GroupRepository`] is the one writer of group documents: it validates an
//! intent against the most recently read snapshot, commits it as an atomic
//! field-scoped delta through a [`GroupStore`](huddle_store::GroupStore),
//! and compensates when an uncoordinated concurrent writer got there first.
//! Multiple clients mutate the same group documents with no ordering
//! guarantees between them. The two compensation paths (backing out of a
//! join that overshot capacity, and skipping the empty-group cleanup when a
//! join refilled it) are part of the repository's contract, not best-effort
//! extras.
//!
//! Reads for display go through [`GroupFeed`], a live newest-first
//! projection fed by the store's change stream.

mod feed;
mod repository;


pub use feed::{FeedError, GroupFeed};
pub use repository::{GroupError, GroupRepository};
