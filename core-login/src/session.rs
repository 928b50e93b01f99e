//! Session snapshot shared across the widget's flows.

use crate::types::UserInfo;
use bridge_traits::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Single source of truth for the signed-in account.
///
/// Every decision the widget makes about the current session (logout
/// mechanism, profile URL, badge contents) reads from this store. Only
/// the reconciler writes to it, so a flow never acts on a mixture of old
/// and new session answers.
pub struct SessionStore {
    user: RwLock<Option<UserInfo>>,
    last_reconciled_at: RwLock<Option<DateTime<Utc>>>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Creates an empty store backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store with an injected time source.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            user: RwLock::new(None),
            last_reconciled_at: RwLock::new(None),
            clock,
        }
    }

    /// Returns a copy of the current session document, if any.
    pub async fn snapshot(&self) -> Option<UserInfo> {
        self.user.read().await.clone()
    }

    /// Whether the store currently holds an authenticated session.
    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// When a reconciliation pass last wrote an answer, if one ever did.
    pub async fn last_reconciled_at(&self) -> Option<DateTime<Utc>> {
        *self.last_reconciled_at.read().await
    }

    /// Stores a reconciled session, returning the document it replaced.
    pub(crate) async fn replace(&self, user: UserInfo) -> Option<UserInfo> {
        let prior = { self.user.write().await.replace(user) };
        *self.last_reconciled_at.write().await = Some(self.clock.now());
        prior
    }

    /// Drops any stored session, returning the document that was held.
    pub(crate) async fn clear(&self) -> Option<UserInfo> {
        let prior = { self.user.write().await.take() };
        *self.last_reconciled_at.write().await = Some(self.clock.now());
        prior
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn sample_user(name: &str) -> UserInfo {
        UserInfo {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_store_starts_empty() {
        let store = SessionStore::new();
        assert!(store.snapshot().await.is_none());
        assert!(!store.is_authenticated().await);
        assert!(store.last_reconciled_at().await.is_none());
    }

    #[tokio::test]
    async fn test_replace_returns_prior() {
        let store = SessionStore::new();

        let prior = store.replace(sample_user("Jan")).await;
        assert!(prior.is_none());
        assert!(store.is_authenticated().await);

        let prior = store.replace(sample_user("Eva")).await;
        assert_eq!(prior.unwrap().name.as_deref(), Some("Jan"));
        assert_eq!(
            store.snapshot().await.unwrap().name.as_deref(),
            Some("Eva")
        );
    }

    #[tokio::test]
    async fn test_clear_returns_prior() {
        let store = SessionStore::new();
        store.replace(sample_user("Jan")).await;

        let prior = store.clear().await;
        assert_eq!(prior.unwrap().name.as_deref(), Some("Jan"));
        assert!(!store.is_authenticated().await);

        let prior = store.clear().await;
        assert!(prior.is_none());
    }

    #[tokio::test]
    async fn test_reconciliation_timestamp_uses_clock() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap();
        let store = SessionStore::with_clock(Arc::new(FixedClock(instant)));

        store.replace(sample_user("Jan")).await;
        assert_eq!(store.last_reconciled_at().await, Some(instant));

        store.clear().await;
        assert_eq!(store.last_reconciled_at().await, Some(instant));
    }
}
