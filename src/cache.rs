//! Lazily-populated, permanently-retained resource caches

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;

use crate::error::RenderResult;
use crate::mesh::Mesh;
use crate::texture::Texture;

/// A mapping from name to a lazily-loaded, shared, immutable resource.
///
/// A cache miss triggers a synchronous load; entries are retained for the
/// process lifetime with no eviction. Failed loads are cached as unavailable
/// (and logged once) so a bad path does not hit the disk every frame.
pub struct ResourceCache<T> {
    entries: HashMap<String, Option<Arc<T>>>,
}

impl<T> ResourceCache<T> {
    pub fn new() -> ResourceCache<T> {
        ResourceCache { entries: HashMap::new() }
    }

    /// Fetches `name`, calling `load` on first access.
    ///
    /// Returns `None` when the resource failed to load; callers decide how
    /// to degrade (rendering proceeds untextured, for example).
    pub fn get_or_load<F>(&mut self, name: &str, load: F) -> Option<Arc<T>>
    where
        F: FnOnce(&str) -> RenderResult<T>,
    {
        if let Some(entry) = self.entries.get(name) {
            return entry.clone();
        }

        let entry = match load(name) {
            Ok(resource) => Some(Arc::new(resource)),
            Err(err) => {
                warn!("failed to load {name:?}: {err}");
                None
            }
        };

        self.entries.insert(name.to_owned(), entry.clone());
        entry
    }

    /// Whether the name has been looked up before, successfully or not.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        ResourceCache::new()
    }
}

pub type TextureCache = ResourceCache<Texture>;
pub type MeshCache = ResourceCache<Mesh>;

impl TextureCache {
    /// Fetches a texture by file name, loading it on first access.
    pub fn texture(&mut self, name: &str) -> Option<Arc<Texture>> {
        self.get_or_load(name, |n| Texture::load(n))
    }
}

impl MeshCache {
    /// Fetches a mesh by file name, loading it on first access.
    pub fn mesh(&mut self, name: &str) -> Option<Arc<Mesh>> {
        self.get_or_load(name, |n| Mesh::load(n))
    }
}
