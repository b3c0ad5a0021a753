use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Cache key: a 32-byte digest of the value that was serialized.
pub type CacheKey = [u8; 32];

/// Memo of already-serialized frontmatter blocks, owned by one
/// [`Encoding`](crate::Encoding).
///
/// Maps a digest of the source value to the complete delimited block
/// (delimiter lines and trailing blank line included), so a repeated
/// encode of the same value skips the codec entirely.
///
/// # Concurrency
///
/// Lookups take a read lock, inserts a write lock. Two threads that miss
/// on the same key may both marshal; the first insert wins and both get
/// the stored bytes back. Entries are never evicted.
#[derive(Debug, Default)]
pub struct FrontmatterCache {
    entries: RwLock<HashMap<CacheKey, Arc<[u8]>>>,
}

impl FrontmatterCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Arc<[u8]>> {
        self.entries
            .read()
            .expect("frontmatter cache lock poisoned")
            .get(key)
            .cloned()
    }

    /// Store `block` under `key` unless an entry already exists, and
    /// return whichever bytes are now cached.
    pub fn insert(&self, key: CacheKey, block: Vec<u8>) -> Arc<[u8]> {
        let mut entries = self.entries.write().expect("frontmatter cache lock poisoned");
        entries.entry(key).or_insert_with(|| Arc::from(block)).clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .expect("frontmatter cache lock poisoned")
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
