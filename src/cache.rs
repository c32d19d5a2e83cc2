use crate::bitmap::Bitmap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

//===========================================================================//

/// Builds the key under which an icon set's bitmap is registered in an
/// [`ImageCache`]: `is:<name>_<width>x<height>`.
pub fn cache_key(name: &str, width: u32, height: u32) -> String {
    format!("is:{}_{}x{}", name, width, height)
}

//===========================================================================//

/// A cache of bitmaps keyed by arbitrary string identifiers.
pub trait ImageCache: Send + Sync {
    /// Stores `bitmap` under `key`, replacing any previous entry.
    fn put(&self, key: String, bitmap: Arc<Bitmap>);
}

/// The default in-memory image cache.
#[derive(Debug, Default)]
pub struct MemoryImageCache {
    images: Mutex<HashMap<String, Arc<Bitmap>>>,
}

impl MemoryImageCache {
    /// Creates a new, empty cache.
    pub fn new() -> MemoryImageCache {
        MemoryImageCache::default()
    }

    /// Returns the bitmap stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Arc<Bitmap>> {
        self.images.lock().get(key).cloned()
    }

    /// Returns the number of cached bitmaps.
    pub fn len(&self) -> usize {
        self.images.lock().len()
    }

    /// Returns true if the cache holds no bitmaps.
    pub fn is_empty(&self) -> bool {
        self.images.lock().is_empty()
    }

    /// Returns all keys currently in the cache, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.images.lock().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl ImageCache for MemoryImageCache {
    fn put(&self, key: String, bitmap: Arc<Bitmap>) {
        self.images.lock().insert(key, bitmap);
    }
}

//===========================================================================//


//===========================================================================//
