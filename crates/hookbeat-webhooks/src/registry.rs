//! In-memory webhook subscription registry.
//!
//! The registry is the only shared mutable state in the system: the HTTP
//! handlers mutate it while the dispatch worker and inbound verifier read
//! snapshots concurrently.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::WebhookError;
use crate::models::HookSubscription;

/// Storage abstraction for webhook subscriptions.
///
/// Subscriber names are unique under case-insensitive comparison; removal
/// is case-insensitive while [`find_by_name`](Self::find_by_name) matches
/// exactly, so an inbound lookup can miss a subscription that differs only
/// in case.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Register a subscription. Fails with [`WebhookError::DuplicateName`]
    /// when a subscription with the same name (ignoring case) exists.
    async fn add(&self, subscription: HookSubscription) -> Result<(), WebhookError>;

    /// Remove every subscription whose name matches `name` ignoring case.
    /// Returns the number of removed records; removing an absent name is
    /// a no-op, not an error.
    async fn remove_by_name(&self, name: &str) -> usize;

    /// Snapshot of all subscriptions in insertion order.
    async fn list(&self) -> Vec<HookSubscription>;

    /// Look up a subscription by exact (case-sensitive) name.
    async fn find_by_name(&self, name: &str) -> Option<HookSubscription>;
}

/// [`SubscriptionStore`] backed by an in-process vector.
#[derive(Default)]
pub struct InMemoryStore {
    subscriptions: RwLock<Vec<HookSubscription>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionStore for InMemoryStore {
    async fn add(&self, subscription: HookSubscription) -> Result<(), WebhookError> {
        let mut subscriptions = self.subscriptions.write().await;
        if subscriptions
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(&subscription.name))
        {
            return Err(WebhookError::DuplicateName {
                name: subscription.name,
            });
        }
        subscriptions.push(subscription);
        Ok(())
    }

    async fn remove_by_name(&self, name: &str) -> usize {
        let mut subscriptions = self.subscriptions.write().await;
        let before = subscriptions.len();
        subscriptions.retain(|s| !s.name.eq_ignore_ascii_case(name));
        before - subscriptions.len()
    }

    async fn list(&self) -> Vec<HookSubscription> {
        self.subscriptions.read().await.clone()
    }

    async fn find_by_name(&self, name: &str) -> Option<HookSubscription> {
        self.subscriptions
            .read()
            .await
            .iter()
            .find(|s| s.name == name)
            .cloned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn subscription(name: &str) -> HookSubscription {
        HookSubscription {
            name: name.to_string(),
            url: format!("http://example.invalid/{name}"),
            secret: "s3cr3t".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let store = InMemoryStore::new();
        store.add(subscription("alice")).await.unwrap();

        let subs = store.list().await;
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, "alice");
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_name_ignoring_case() {
        let store = InMemoryStore::new();
        store.add(subscription("Alice")).await.unwrap();

        let err = store.add(subscription("alice")).await.unwrap_err();
        assert!(matches!(err, WebhookError::DuplicateName { .. }));
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_is_case_insensitive() {
        let store = InMemoryStore::new();
        store.add(subscription("Foo")).await.unwrap();

        assert_eq!(store.remove_by_name("foo").await, 1);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_name_is_noop() {
        let store = InMemoryStore::new();
        store.add(subscription("alice")).await.unwrap();

        assert_eq!(store.remove_by_name("bob").await, 0);
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_name_is_case_sensitive() {
        let store = InMemoryStore::new();
        store.add(subscription("Alice")).await.unwrap();

        assert!(store.find_by_name("Alice").await.is_some());
        assert!(store.find_by_name("alice").await.is_none());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryStore::new();
        for name in ["c", "a", "b"] {
            store.add(subscription(name)).await.unwrap();
        }

        let names: Vec<String> = store.list().await.into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_concurrent_adds_do_not_lose_records() {
        let store = Arc::new(InMemoryStore::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.add(subscription(&format!("sub-{i}"))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.list().await.len(), 16);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", subscription("alice"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("s3cr3t"));
    }
}
