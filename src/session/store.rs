use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::filters::RasterImage;

/// Opaque identifier handed back to the client after an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(Uuid);

impl ImageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ImageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// In-memory store of uploaded originals for the lifetime of a session
///
/// Create one per process (or per session) and share it with whatever
/// handles requests. Originals are never modified after insertion; readers
/// get a cheap shared handle.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: RwLock<HashMap<ImageId, Arc<RasterImage>>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an original and return its new id
    pub fn insert(&self, image: RasterImage) -> ImageId {
        let id = ImageId::new();
        self.images
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(image));
        id
    }

    pub fn get(&self, id: &ImageId) -> Option<Arc<RasterImage>> {
        self.images
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn remove(&self, id: &ImageId) -> Option<Arc<RasterImage>> {
        self.images
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    pub fn contains(&self, id: &ImageId) -> bool {
        self.images
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.images.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored original
    pub fn clear(&self) {
        self.images.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_insert_get_remove() {
        let store = ImageStore::new();
        let original = RasterImage::new_filled(3, 3, [9, 8, 7]);

        let id = store.insert(original.clone());
        assert!(store.contains(&id));
        assert_eq!(*store.get(&id).unwrap(), original);

        assert!(store.remove(&id).is_some());
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_parse_back() {
        let store = ImageStore::new();
        let a = store.insert(RasterImage::new_filled(1, 1, [0; 3]));
        let b = store.insert(RasterImage::new_filled(1, 1, [0; 3]));
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);

        assert_eq!(a.to_string().parse::<ImageId>().unwrap(), a);
        assert!("not-a-uuid".parse::<ImageId>().is_err());
    }

    #[test]
    fn test_concurrent_inserts() {
        let store = Arc::new(ImageStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.insert(RasterImage::new_filled(2, 2, [i as u8; 3])))
            })
            .collect();

        let ids: Vec<ImageId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(store.len(), 8);
        for id in ids {
            assert!(store.get(&id).is_some());
        }

        store.clear();
        assert!(store.is_empty());
    }
}
