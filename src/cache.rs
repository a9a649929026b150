use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Key/value store used to memoize lookups.
#[async_trait]
pub trait Cache<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V>;
    async fn set(&self, key: String, value: V);
}

/// Unbounded process-local cache. Entries never expire.
pub struct InMemoryCache<V> {
    store: RwLock<HashMap<String, V>>,
}

impl<V> InMemoryCache<V> {
    pub fn new() -> Self {
        InMemoryCache {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl<V> Default for InMemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> Cache<V> for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        self.store.read().await.get(key).cloned()
    }

    async fn set(&self, key: String, value: V) {
        self.store.write().await.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_missing() {
        let cache: InMemoryCache<String> = InMemoryCache::new();
        assert_eq!(cache.get("germany").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache: InMemoryCache<u64> = InMemoryCache::new();
        cache.set("germany".to_string(), 83240525).await;

        assert_eq!(cache.get("germany").await, Some(83240525));
        assert_eq!(cache.get("Germany").await, None);
    }

    #[tokio::test]
    async fn test_repeated_set_is_idempotent() {
        let cache: InMemoryCache<String> = InMemoryCache::new();
        cache.set("france".to_string(), "Paris".to_string()).await;
        cache.set("france".to_string(), "Paris".to_string()).await;

        assert_eq!(cache.get("france").await.as_deref(), Some("Paris"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_overwrite() {
        let cache: InMemoryCache<u32> = InMemoryCache::new();
        cache.set("k".to_string(), 1).await;
        cache.set("k".to_string(), 2).await;

        assert_eq!(cache.get("k").await, Some(2));
    }

    #[tokio::test]
    async fn test_concurrent_writers_and_readers() {
        let cache: Arc<InMemoryCache<usize>> = Arc::new(InMemoryCache::new());

        let mut tasks = Vec::new();
        for i in 0..64 {
            let cache = cache.clone();
            tasks.push(tokio::spawn(async move {
                cache.set(format!("key-{}", i % 8), i % 8).await;
                cache.get(&format!("key-{}", i % 8)).await
            }));
        }

        for task in tasks {
            assert!(task.await.unwrap().is_some());
        }
        assert_eq!(cache.len().await, 8);
        for i in 0..8 {
            assert_eq!(cache.get(&format!("key-{i}")).await, Some(i));
        }
    }
}
