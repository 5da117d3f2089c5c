use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use super::parse::UpstreamResponse;
use super::query::CatalogQuery;

struct CacheEntry {
    data: UpstreamResponse,
    created_at: Instant,
}

impl CacheEntry {
    fn is_valid(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() < ttl
    }
}

/// Parsed catalog pages keyed by the exact query (page, size and filters).
pub struct QueryCache {
    ttl: Duration,
    capacity: usize,
    entries: RwLock<HashMap<CatalogQuery, CacheEntry>>,
}

impl QueryCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, query: &CatalogQuery) -> Option<UpstreamResponse> {
        self.entries
            .read()
            .await
            .get(query)
            .filter(|e| e.is_valid(self.ttl))
            .map(|e| e.data.clone())
    }

    pub async fn insert(&self, query: CatalogQuery, data: UpstreamResponse) {
        let mut entries = self.entries.write().await;

        if entries.len() >= self.capacity && !entries.contains_key(&query) {
            let ttl = self.ttl;
            entries.retain(|_, e| e.is_valid(ttl));
        }
        if entries.len() >= self.capacity && !entries.contains_key(&query) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.created_at)
                .map(|(k, _)| k.clone());
            if let Some(key) = oldest {
                entries.remove(&key);
            }
        }

        entries.insert(
            query,
            CacheEntry {
                data,
                created_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
