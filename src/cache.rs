//! Per-session memo of generation results.
//!
//! Unbounded by default. A capacity evicts the oldest insertion first and a
//! TTL drops entries lazily on lookup.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use indexmap::IndexMap;

use crate::{catalog::BookRecord, config::Settings, generate::GenerationResult};

/// `title|first author|year|cover id`, with `Unknown` / `None` standing in
/// for missing parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_book(book: &BookRecord) -> Self {
        Self(format!(
            "{}|{}|{}|{}",
            book.title,
            book.first_author().unwrap_or("Unknown"),
            display_opt(book.year),
            display_opt(book.cover_id),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn display_opt<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    pub capacity: Option<usize>,
    pub ttl: Option<Duration>,
}

impl CachePolicy {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            capacity: settings.cache_capacity,
            ttl: settings.cache_ttl,
        }
    }
}

struct Entry {
    result: Arc<GenerationResult>,
    inserted: Instant,
}

pub struct SessionCache {
    policy: CachePolicy,
    entries: Mutex<IndexMap<CacheKey, Entry>>,
}

impl SessionCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: Mutex::new(IndexMap::new()),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<GenerationResult>> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            Some(entry) => self.is_expired(entry),
            None => return None,
        };
        if expired {
            entries.shift_remove(key);
            return None;
        }
        entries.get(key).map(|entry| Arc::clone(&entry.result))
    }

    /// Store `result`, replacing any earlier value for `key`.
    pub fn insert(&self, key: CacheKey, result: GenerationResult) -> Arc<GenerationResult> {
        let result = Arc::new(result);
        let mut entries = self.lock();
        entries.insert(
            key,
            Entry {
                result: Arc::clone(&result),
                inserted: Instant::now(),
            },
        );
        if let Some(capacity) = self.policy.capacity {
            while entries.len() > capacity {
                entries.shift_remove_index(0);
            }
        }
        result
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        self.policy
            .ttl
            .is_some_and(|ttl| entry.inserted.elapsed() >= ttl)
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<CacheKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(CachePolicy::unbounded())
    }
}

impl fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCache")
            .field("policy", &self.policy)
            .field("len", &self.len())
            .finish()
    }
}
