//! Session identity provider.
//!
//! Supplies the current authenticated identity (or none) to the stores.
//! Authentication itself happens elsewhere; this is only the injection
//! point. Internally a `tokio::sync::watch` channel: stores hold an
//! [`IdentityWatch`] receiver, read the current value synchronously, and
//! await change notifications to drive their refetch loops.

use covenant_types::UserId;
use tokio::sync::watch;

/// Receiver half of the session identity channel.
///
/// `borrow()` yields the current identity; `changed()` resolves whenever
/// the identity transitions, including to and from "no identity".
pub type IdentityWatch = watch::Receiver<Option<UserId>>;

/// Holds the current authenticated identity and notifies subscribers on
/// every transition.
///
/// # Example
///
/// ```
/// use covenant_sdk::Session;
/// use covenant_types::UserId;
///
/// let session = Session::new();
/// assert!(session.current().is_none());
///
/// let user = UserId::random();
/// session.sign_in(user);
/// assert_eq!(session.current(), Some(user));
///
/// session.sign_out();
/// assert!(session.current().is_none());
/// ```
#[derive(Debug)]
pub struct Session {
    identity: watch::Sender<Option<UserId>>,
}

impl Session {
    /// Creates an unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        let (identity, _) = watch::channel(None);
        Self { identity }
    }

    /// Sets the authenticated identity, notifying subscribers.
    pub fn sign_in(&self, user: UserId) {
        self.identity.send_replace(Some(user));
    }

    /// Clears the authenticated identity, notifying subscribers.
    pub fn sign_out(&self) {
        self.identity.send_replace(None);
    }

    /// Returns the current identity, or `None` when unauthenticated.
    #[must_use]
    pub fn current(&self) -> Option<UserId> {
        *self.identity.borrow()
    }

    /// Subscribes to identity changes.
    ///
    /// The returned watch handle is what stores take by injection; it sees
    /// every subsequent transition.
    #[must_use]
    pub fn subscribe(&self) -> IdentityWatch {
        self.identity.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_sees_transitions() {
        let session = Session::new();
        let mut watch = session.subscribe();
        assert!(watch.borrow().is_none());

        let user = UserId::random();
        session.sign_in(user);
        watch.changed().await.unwrap();
        assert_eq!(*watch.borrow(), Some(user));

        session.sign_out();
        watch.changed().await.unwrap();
        assert!(watch.borrow().is_none());
    }

    #[tokio::test]
    async fn sign_out_from_signed_out_still_notifies() {
        // send_replace notifies unconditionally; stores tolerate spurious
        // refreshes, so no dedup is needed here.
        let session = Session::new();
        let mut watch = session.subscribe();
        session.sign_out();
        watch.changed().await.unwrap();
        assert!(watch.borrow().is_none());
    }
}
