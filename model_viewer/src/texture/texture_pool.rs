/// TexturePool - process-wide cache of decoded GPU textures.
///
/// Entries are registered from texture sources (blob names only) and
/// decoded on first fetch. Decoding and upload run outside the cache lock,
/// so two threads fetching the same new name may both decode it; the first
/// texture stored is kept and returned to both.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use rustc_hash::FxHashMap;
use crate::device::{GraphicsDevice, Texture};
use crate::asset::short_name;
use crate::error::Result;
use crate::{viewer_debug, viewer_error, viewer_warn};
use super::{decode_dds, TextureSource};

const SOURCE: &str = "viewer::TexturePool";

/// Cache key for a texture name: directory and extension stripped, lower-cased.
///
/// Material parameters carry full source paths such as
/// `N:\FRPG\data\Model\chr\c5370\tex\c5370_body.tga`, while texture packs
/// store bare names.
pub fn normalize_texture_name(name: &str) -> String {
    short_name(name).to_lowercase()
}

/// One cached texture name
pub struct TextureCacheEntry {
    /// Name as stored in the source
    name: String,
    source: Weak<dyn TextureSource>,
    texture: Option<Arc<dyn Texture>>,
}

impl TextureCacheEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_decoded(&self) -> bool {
        self.texture.is_some()
    }
}

pub struct TexturePool {
    device: Arc<dyn GraphicsDevice>,
    entries: RwLock<FxHashMap<String, TextureCacheEntry>>,
    decodes: AtomicUsize,
}

impl TexturePool {
    pub fn new(device: Arc<dyn GraphicsDevice>) -> Self {
        Self {
            device,
            entries: RwLock::new(FxHashMap::default()),
            decodes: AtomicUsize::new(0),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FxHashMap<String, TextureCacheEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FxHashMap<String, TextureCacheEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register every texture name of `source`.
    ///
    /// A name already registered keeps its first source.
    pub fn register_source(&self, source: &Arc<dyn TextureSource>) {
        let names = source.texture_names();
        let mut entries = self.write();
        let mut added = 0;
        for name in names {
            entries.entry(normalize_texture_name(&name)).or_insert_with(|| {
                added += 1;
                TextureCacheEntry {
                    name,
                    source: Arc::downgrade(source),
                    texture: None,
                }
            });
        }
        viewer_debug!(SOURCE, "Registered {} texture names ({} total)", added, entries.len());
    }

    /// Get the decoded texture for `name`, decoding and uploading it on first use.
    ///
    /// Returns `Ok(None)` when the name is unknown or its bytes are no longer
    /// available; the caller substitutes a default texture.
    ///
    /// # Errors
    ///
    /// Decode errors (`UnsupportedFormat`, `MalformedAsset`) and device errors
    /// from the upload.
    pub fn fetch(&self, name: &str) -> Result<Option<Arc<dyn Texture>>> {
        let key = normalize_texture_name(name);

        let (source_name, source) = {
            let entries = self.read();
            let Some(entry) = entries.get(&key) else {
                return Ok(None);
            };
            if let Some(texture) = &entry.texture {
                return Ok(Some(Arc::clone(texture)));
            }
            (entry.name.clone(), entry.source.clone())
        };

        let Some(source) = source.upgrade() else {
            viewer_warn!(SOURCE, "Texture source for '{}' was released", key);
            return Ok(None);
        };
        let Some(bytes) = source.texture_bytes(&source_name) else {
            viewer_warn!(SOURCE, "No bytes for texture '{}'", source_name);
            return Ok(None);
        };

        let decoded = decode_dds(&key, &bytes).inspect_err(|e| {
            viewer_error!(SOURCE, "Failed to decode texture '{}': {}", key, e);
        })?;
        let texture = self.device.create_texture(decoded.to_desc()).inspect_err(|e| {
            viewer_error!(SOURCE, "Failed to upload texture '{}': {}", key, e);
        })?;
        self.decodes.fetch_add(1, Ordering::Relaxed);
        viewer_debug!(
            SOURCE,
            "Decoded '{}' ({}x{}, {:?}, {} mips)",
            key, decoded.width, decoded.height, decoded.format, decoded.mip_count()
        );

        let mut entries = self.write();
        match entries.get_mut(&key) {
            Some(entry) => match &entry.texture {
                Some(existing) => Ok(Some(Arc::clone(existing))),
                None => {
                    entry.texture = Some(Arc::clone(&texture));
                    Ok(Some(texture))
                }
            },
            // Flushed while decoding
            None => Ok(Some(texture)),
        }
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(&normalize_texture_name(name))
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Number of names with a decoded texture
    pub fn decoded_count(&self) -> usize {
        self.read().values().filter(|e| e.is_decoded()).count()
    }

    /// Decode-and-upload operations performed since creation
    pub fn decodes_performed(&self) -> usize {
        self.decodes.load(Ordering::Relaxed)
    }

    /// Drop every entry and every cached texture reference
    pub fn flush(&self) {
        let mut entries = self.write();
        let count = entries.len();
        entries.clear();
        viewer_debug!(SOURCE, "Flushed {} textures", count);
    }
}

#[cfg(test)]
#[path = "texture_pool_tests.rs"]
mod tests;
