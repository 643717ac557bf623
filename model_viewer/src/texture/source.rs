/// Texture byte sources supplied by the asset layer

use std::sync::{Arc, RwLock};
use rustc_hash::FxHashMap;

/// Raw texture blobs keyed by texture name.
///
/// Implemented by the container-format layer (texture packs, archives).
/// The texture pool holds sources weakly.
pub trait TextureSource: Send + Sync {
    /// Names of every texture this source can provide
    fn texture_names(&self) -> Vec<String>;

    /// Raw bytes of the named texture, if present
    fn texture_bytes(&self, name: &str) -> Option<Arc<[u8]>>;
}

/// In-memory texture source
#[derive(Default)]
pub struct MemoryTextureSource {
    blobs: RwLock<FxHashMap<String, Arc<[u8]>>>,
}

impl MemoryTextureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a blob
    pub fn insert(&self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        let mut blobs = self.blobs.write().unwrap_or_else(|e| e.into_inner());
        blobs.insert(name.into(), bytes.into());
    }

    /// Remove a blob, leaving the name registered but unresolvable
    pub fn remove(&self, name: &str) -> Option<Arc<[u8]>> {
        let mut blobs = self.blobs.write().unwrap_or_else(|e| e.into_inner());
        blobs.remove(name)
    }
}

impl TextureSource for MemoryTextureSource {
    fn texture_names(&self) -> Vec<String> {
        let blobs = self.blobs.read().unwrap_or_else(|e| e.into_inner());
        blobs.keys().cloned().collect()
    }

    fn texture_bytes(&self, name: &str) -> Option<Arc<[u8]>> {
        let blobs = self.blobs.read().unwrap_or_else(|e| e.into_inner());
        blobs.get(name).cloned()
    }
}
