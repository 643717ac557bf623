/// Fallback textures bound to unresolved material slots

use std::sync::Arc;
use crate::device::{GraphicsDevice, Texture, TextureData, TextureDesc, TextureFormat, TextureUsage};
use crate::error::Result;
use crate::shader::TextureSlot;

/// Process-wide fallback textures.
///
/// Light-map slots fall back to the diffuse default.
#[derive(Clone)]
pub struct DefaultTextures {
    pub diffuse: Arc<dyn Texture>,
    pub specular: Arc<dyn Texture>,
    pub normal: Arc<dyn Texture>,
}

fn solid(device: &dyn GraphicsDevice, label: &str, rgba: [u8; 4]) -> Result<Arc<dyn Texture>> {
    device.create_texture(TextureDesc {
        label: label.to_string(),
        width: 1,
        height: 1,
        format: TextureFormat::R8G8B8A8_UNORM,
        usage: TextureUsage::Sampled,
        mip_levels: 1,
        data: Some(TextureData::Single(rgba.to_vec())),
    })
}

impl DefaultTextures {
    pub fn new(
        diffuse: Arc<dyn Texture>,
        specular: Arc<dyn Texture>,
        normal: Arc<dyn Texture>,
    ) -> Self {
        Self { diffuse, specular, normal }
    }

    /// 1x1 white diffuse, black specular and flat normal textures
    pub fn create(device: &dyn GraphicsDevice) -> Result<Self> {
        Ok(Self {
            diffuse: solid(device, "default_diffuse", [255, 255, 255, 255])?,
            specular: solid(device, "default_specular", [0, 0, 0, 255])?,
            normal: solid(device, "default_normal", [128, 128, 255, 255])?,
        })
    }

    /// Fallback for `slot`
    pub fn for_slot(&self, slot: TextureSlot) -> Arc<dyn Texture> {
        match slot {
            TextureSlot::Specular => Arc::clone(&self.specular),
            TextureSlot::Normal => Arc::clone(&self.normal),
            TextureSlot::Diffuse | TextureSlot::LightMap1 | TextureSlot::LightMap2 => {
                Arc::clone(&self.diffuse)
            }
        }
    }
}
