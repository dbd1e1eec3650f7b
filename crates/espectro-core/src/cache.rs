//! Bounded least-recently-used cache of decoded sample blocks.

use std::collections::HashMap;
use std::sync::Arc;

/// Number of samples per cached block.
pub const BLOCK_SIZE: usize = 2048;

/// Default number of blocks a [`BlockCache`] holds before evicting.
pub const CACHE_CAPACITY: usize = 24;

/// A decoded, fixed-length slice of a disk-backed store.
///
/// Blocks are shared out of the cache by reference count; they are
/// recomputed from disk on a miss and discarded silently on eviction
/// (samples are read-only, so there is nothing to write back).
pub type Block = Arc<[f64]>;

struct Entry {
    block: Block,
    /// Monotonic access stamp; the smallest stamp is the LRU entry.
    stamp: u64,
}

/// Capacity-bounded, access-ordered map from block index to sample block.
///
/// Every read refreshes the entry's recency; inserting beyond capacity
/// evicts the least-recently-accessed block. The cache never holds more
/// than `capacity` blocks. Not designed for concurrent mutation: it is
/// consulted and updated by a single reader once a signal is built.
pub struct BlockCache {
    entries: HashMap<usize, Entry>,
    capacity: usize,
    counter: u64,
}

impl BlockCache {
    /// Creates a cache bounded to [`CACHE_CAPACITY`] blocks.
    pub fn new() -> Self {
        Self::with_capacity(CACHE_CAPACITY)
    }

    /// Creates a cache bounded to `capacity` blocks.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be > 0");
        Self {
            entries: HashMap::with_capacity(capacity + 1),
            capacity,
            counter: 0,
        }
    }

    /// Looks up a block, refreshing its recency on a hit.
    pub fn get(&mut self, index: usize) -> Option<Block> {
        self.counter += 1;
        let stamp = self.counter;
        let entry = self.entries.get_mut(&index)?;
        entry.stamp = stamp;
        Some(Arc::clone(&entry.block))
    }

    /// Inserts a block, evicting the least-recently-used entry if the
    /// cache would otherwise exceed capacity.
    pub fn insert(&mut self, index: usize, block: Block) {
        self.counter += 1;
        self.entries.insert(
            index,
            Entry {
                block,
                stamp: self.counter,
            },
        );
        if self.entries.len() > self.capacity {
            self.evict_lru();
        }
    }

    /// Number of blocks currently cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no blocks are cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The bound on the number of cached blocks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` without touching recency if the block is cached.
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Drops the entry with the smallest access stamp.
    ///
    /// Capacity is small (tens of blocks), so a linear scan is fine.
    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.stamp)
            .map(|(&index, _)| index);
        if let Some(index) = oldest {
            self.entries.remove(&index);
        }
    }
}

impl Default for BlockCache {
    fn default() -> Self {
        Self::new()
    }
}
