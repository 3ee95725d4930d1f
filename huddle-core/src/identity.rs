// SPDX-License-Identifier: MIT OR Apache-2.0

//! The identity seam.
//!
//! Repositories never read a global "current user"; they take an
//! [`IdentityProvider`] at construction and ask it on every operation. The
//! provider is read-only from the repositories' point of view. Signing in
//! and out is the hosting application's business.

use std::sync::Arc;

use tokio::sync::watch;

use crate::identifiers::UserId;

/// Read access to the acting user, plus a change notification stream.
pub trait IdentityProvider: Clone {
    /// Identifier of the signed-in user, or `None` when nobody is signed in.
    fn current_user(&self) -> Option<UserId>;

    /// Subscribe to identity changes.
    ///
    /// The receiver observes the value at subscription time first, then one
    /// notification per sign-in or sign-out.
    fn watch(&self) -> watch::Receiver<Option<UserId>>;
}

/// Cheaply clonable current-user handle.
///
/// The hosting application drives it from its authentication callbacks via
/// [`set`](SharedIdentity::set) and [`clear`](SharedIdentity::clear); every
/// clone observes the same identity.
#[derive(Clone, Debug)]
pub struct SharedIdentity {
    tx: Arc<watch::Sender<Option<UserId>>>,
}

impl SharedIdentity {
    /// A signed-out identity handle.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// An identity handle that starts signed in as `user`.
    pub fn signed_in(user: UserId) -> Self {
        let (tx, _rx) = watch::channel(Some(user));
        Self { tx: Arc::new(tx) }
    }

    pub fn set(&self, user: UserId) {
        self.tx.send_replace(Some(user));
    }

    pub fn clear(&self) {
        self.tx.send_replace(None);
    }
}

impl Default for SharedIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for SharedIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.tx.borrow().clone()
    }

    fn watch(&self) -> watch::Receiver<Option<UserId>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_identity() {
        let identity = SharedIdentity::new();
        let clone = identity.clone();
        assert_eq!(clone.current_user(), None);

        identity.set(UserId::from("panda"));
        assert_eq!(clone.current_user(), Some(UserId::from("panda")));

        identity.clear();
        assert_eq!(clone.current_user(), None);
    }

    #[tokio::test]
    async fn watch_observes_sign_in_and_out() {
        let identity = SharedIdentity::signed_in(UserId::from("panda"));
        let mut rx = identity.watch();
        assert_eq!(*rx.borrow_and_update(), Some(UserId::from("panda")));

        identity.clear();
        rx.changed().await.expect("identity handle still alive");
        assert_eq!(*rx.borrow_and_update(), None);
    }
}
