use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

/// Cache-aside store for computed payloads.
///
/// Injected everywhere a payload is cached so tests can substitute a
/// counting fake. Entries expire after their TTL; there is no eviction on
/// data mutation beyond explicit `forget` calls, and concurrent misses for
/// the same key may each compute and write (last write wins).
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Option<Value>;

    async fn put(&self, key: &str, value: Value, ttl: Duration);

    async fn forget(&self, key: &str);
}

struct Entry {
    value: Value,
    expires_at: Instant,
}

/// In-process TTL cache backing the single-node deployment.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        if entry.expires_at <= Instant::now() {
            return None;
        }

        Some(entry.value.clone())
    }

    async fn put(&self, key: &str, value: Value, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        // Expired entries are only dropped here; reads leave them in place.
        entries.retain(|_, entry| entry.expires_at > now);

        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + ttl,
            },
        );
    }

    async fn forget(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}
