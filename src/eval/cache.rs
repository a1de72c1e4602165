// eval/cache.rs — LRU frame cache with deterministic tree hashing
//
// Caches rendered frames keyed by a hash of the channel trees + render
// parameters. Thread-safe via Mutex.
//
// Frames are stored behind `Arc` so cache hits return a cheap reference
// count bump instead of cloning the pixel buffer.

use crate::error::Result;
use crate::eval::builder::ChannelTrees;
use crate::eval::image::{render_image, ImageResult};
use log::trace;
use lru::LruCache;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Content-addressable cache for rendered frames.
/// Key = hash(trees + params), Value = Arc<frame>.
pub struct FrameCache {
    frames: Mutex<LruCache<u64, Arc<ImageResult>>>,
}

impl FrameCache {
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            frames: Mutex::new(LruCache::new(cap)),
        }
    }

    // A poisoned lock only means another thread panicked mid-insert; the
    // LRU itself is still consistent, so keep using it.
    fn lock(&self) -> MutexGuard<'_, LruCache<u64, Arc<ImageResult>>> {
        self.frames.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get a cached frame. Returns a cheap `Arc` clone (ref-count bump).
    pub fn get(&self, hash: u64) -> Option<Arc<ImageResult>> {
        self.lock().get(&hash).cloned()
    }

    /// Insert a frame into the cache, wrapping it in an `Arc`.
    pub fn put(&self, hash: u64, frame: ImageResult) -> Arc<ImageResult> {
        let frame = Arc::new(frame);
        self.lock().put(hash, Arc::clone(&frame));
        frame
    }

    /// Return the cached frame for these parameters, rendering it on a miss.
    ///
    /// The lock is not held while rendering, so two threads missing on the
    /// same key may both render; the later insert wins.
    pub fn get_or_render(
        &self,
        trees: &ChannelTrees,
        width: u32,
        height: u32,
        time: f64,
    ) -> Result<Arc<ImageResult>> {
        let hash = hash_frame_request(trees, width, height, time);
        if let Some(hit) = self.get(hash) {
            trace!("frame cache hit {:016x}", hash);
            return Ok(hit);
        }
        let frame = render_image(trees, width, height, time)?;
        Ok(self.put(hash, frame))
    }

    /// Clear all cached entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of frames currently cached.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Request hashing ────────────────────────────────────────────────

/// Hash the channel trees + render parameters deterministically.
/// Same trees + params = same hash.
pub fn hash_frame_request(trees: &ChannelTrees, width: u32, height: u32, time: f64) -> u64 {
    let mut hasher = DefaultHasher::new();
    trees.hash(&mut hasher);
    width.hash(&mut hasher);
    height.hash(&mut hasher);
    time.to_bits().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::function::FunctionNode;

    fn trees_a() -> ChannelTrees {
        ChannelTrees {
            red: FunctionNode::x(),
            green: FunctionNode::y(),
            blue: FunctionNode::t(),
        }
    }

    fn trees_b() -> ChannelTrees {
        ChannelTrees {
            red: FunctionNode::square(FunctionNode::x()),
            green: FunctionNode::y(),
            blue: FunctionNode::t(),
        }
    }

    #[test]
    fn same_request_same_hash() {
        let h1 = hash_frame_request(&trees_a(), 8, 8, 0.5);
        let h2 = hash_frame_request(&trees_a(), 8, 8, 0.5);
        assert_eq!(h1, h2);
    }

    #[test]
    fn different_request_different_hash() {
        let base = hash_frame_request(&trees_a(), 8, 8, 0.5);
        assert_ne!(base, hash_frame_request(&trees_b(), 8, 8, 0.5));
        assert_ne!(base, hash_frame_request(&trees_a(), 9, 8, 0.5));
        assert_ne!(base, hash_frame_request(&trees_a(), 8, 9, 0.5));
        assert_ne!(base, hash_frame_request(&trees_a(), 8, 8, -0.5));
    }

    #[test]
    fn get_or_render_caches() {
        let cache = FrameCache::new(4);
        assert!(cache.is_empty());
        let first = cache.get_or_render(&trees_a(), 3, 2, 0.0).unwrap();
        assert_eq!(cache.len(), 1);
        let second = cache.get_or_render(&trees_a(), 3, 2, 0.0).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn render_errors_are_not_cached() {
        let cache = FrameCache::new(4);
        assert!(cache.get_or_render(&trees_a(), 0, 2, 0.0).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = FrameCache::new(2);
        let t = trees_a();
        cache.get_or_render(&t, 1, 1, -1.0).unwrap();
        cache.get_or_render(&t, 1, 1, 0.0).unwrap();
        // Touch the first so the second becomes LRU
        assert!(cache.get(hash_frame_request(&t, 1, 1, -1.0)).is_some());
        cache.get_or_render(&t, 1, 1, 0.5).unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.get(hash_frame_request(&t, 1, 1, 0.0)).is_none());
        assert!(cache.get(hash_frame_request(&t, 1, 1, -1.0)).is_some());
    }

    #[test]
    fn zero_capacity_holds_one() {
        let cache = FrameCache::new(0);
        cache.get_or_render(&trees_a(), 1, 1, 0.0).unwrap();
        cache.get_or_render(&trees_a(), 1, 1, 0.5).unwrap();
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
