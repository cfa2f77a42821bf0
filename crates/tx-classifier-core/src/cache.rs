//! Phase 5: the bounded result cache.
//!
//! A single owned [`LruCache`] guarded by a mutex: one shared structure,
//! mutually-exclusive writer. Keyed by `(chainId, txHash)`; holds owned
//! verdict copies, never references into a [`ClassificationContext`].

use std::num::NonZeroUsize;
use std::sync::Mutex;

use alloy_primitives::B256;
use lru::LruCache;
use tx_classifier_types::ClassificationResult;

/// Default cache capacity.
const DEFAULT_CAPACITY: usize = 100;

type CacheKey = (u64, B256);

/// The process-wide (or caller-scoped) classification result cache.
///
/// Constructed explicitly and passed by reference to [`crate::classify`]
/// rather than hidden behind a global, so callers control its lifetime and
/// can run independent caches in tests.
pub struct ClassifierCache {
    inner: Mutex<LruCache<CacheKey, ClassificationResult>>,
}

impl ClassifierCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap());
        ClassifierCache {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns a clone of the cached result for `(chain_id, tx_hash)`, if any.
    ///
    /// Lock poisoning (a prior panic while holding the lock) is treated as an
    /// empty cache rather than propagated: cache transparency means a
    /// miss here only costs recomputation, never correctness.
    pub(crate) fn get(&self, chain_id: u64, tx_hash: B256) -> Option<ClassificationResult> {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.get(&(chain_id, tx_hash)).cloned()
    }

    pub(crate) fn put(&self, chain_id: u64, tx_hash: B256, result: ClassificationResult) {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.put((chain_id, tx_hash), result);
    }

    /// Number of entries currently cached. Exposed for tests.
    pub fn len(&self) -> usize {
        let guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ClassifierCache {
    fn default() -> Self {
        Self::new()
    }
}
