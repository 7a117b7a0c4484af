// this_file: crates/carta-fontdb/src/font_cache.rs

//! Bounded LRU cache of parsed scalable fonts.
//!
//! Keys are canonical paths, values are immutable `Arc<ScalableFont>`s, so a
//! hit is a reference-count bump plus an LRU promotion. Only successful loads
//! are stored; a broken path is retried (and warned about) on every call.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::RwLock;

use carta_core::error::Result;

use crate::scalable::ScalableFont;

/// Font cache statistics for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Maximum number of cached fonts.
    pub capacity: usize,
    /// Currently cached fonts.
    pub entries: usize,
}

/// Insert `value`, returning the key of the least recently used entry if
/// one had to make room. Replacing an existing key evicts nothing.
fn remember<K: Hash + Eq, V>(cache: &mut LruCache<K, V>, key: K, value: V) -> Option<K> {
    let replaced = cache.contains(&key);
    match cache.push(key, value) {
        Some((evicted, _)) if !replaced => Some(evicted),
        _ => None,
    }
}

/// Shared, bounded font cache keyed by canonical path.
///
/// # Examples
/// ```ignore
/// use carta_fontdb::font_cache::FontCache;
///
/// let cache = FontCache::new(8);
/// let font = cache.get_or_load("fonts/Card.ttf")?;
/// ```
#[derive(Debug)]
pub struct FontCache {
    inner: RwLock<LruCache<PathBuf, Arc<ScalableFont>>>,
}

impl FontCache {
    /// Create a cache holding at most `capacity` fonts (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: RwLock::new(LruCache::new(capacity)),
        }
    }

    fn key(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
    }

    /// Return the cached font for `path`, loading it on a miss.
    ///
    /// Two threads missing on the same path at once may both load it; the
    /// second insert simply replaces the first.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<ScalableFont>> {
        let path = path.as_ref();
        let key = Self::key(path);

        // LruCache::get promotes the entry, so even a hit needs the write lock
        if let Some(font) = self.inner.write().get(&key) {
            log::trace!("Font cache hit: {}", key.display());
            return Ok(Arc::clone(font));
        }

        let font = Arc::new(ScalableFont::from_file(path)?);
        if let Some(evicted) = remember(&mut self.inner.write(), key.clone(), Arc::clone(&font)) {
            log::debug!("Font cache evicted {}", evicted.display());
        }
        log::debug!("Font cache stored {}", key.display());

        Ok(font)
    }

    /// Look up without loading or promoting
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Arc<ScalableFont>> {
        self.inner.read().peek(&Self::key(path.as_ref())).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Drop every cached font; fonts still held elsewhere stay alive.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.read();
        CacheStats {
            capacity: inner.cap().get(),
            entries: inner.len(),
        }
    }
}
