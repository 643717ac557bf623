/// Shader trait - the closed set of variants a submesh can be drawn with

use std::sync::Arc;
use bitflags::bitflags;
use glam::Mat4;
use crate::camera::WorldView;
use crate::device::{CommandList, Texture};
use crate::error::Result;

/// Tag selecting a concrete shader variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Lit, textured model shader
    Model,
    /// Untextured shader for debug primitives and the selection overlay
    DebugPrimitive,
}

bitflags! {
    /// What a shader variant consumes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderCaps: u32 {
        /// Samples the five material texture slots
        const TEXTURES = 1 << 0;
        /// Uses light direction and lighting parameters
        const LIGHTING = 1 << 1;
        /// Can tint by vertex colour
        const VERTEX_COLOR = 1 << 2;
    }
}

/// Material texture slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Diffuse,
    Specular,
    Normal,
    LightMap1,
    LightMap2,
}

impl TextureSlot {
    /// Number of slots
    pub const COUNT: usize = 5;

    /// All slots in binding order
    pub const ALL: [TextureSlot; Self::COUNT] = [
        TextureSlot::Diffuse,
        TextureSlot::Specular,
        TextureSlot::Normal,
        TextureSlot::LightMap1,
        TextureSlot::LightMap2,
    ];

    /// Binding index (also the index into per-slot arrays)
    pub fn index(&self) -> usize {
        match self {
            TextureSlot::Diffuse => 0,
            TextureSlot::Specular => 1,
            TextureSlot::Normal => 2,
            TextureSlot::LightMap1 => 3,
            TextureSlot::LightMap2 => 4,
        }
    }
}

/// A shader variant.
///
/// State setters only update CPU-side values; nothing reaches the command
/// list until `apply_pass`.
pub trait Shader: Send + Sync {
    fn kind(&self) -> ShaderKind;

    fn capabilities(&self) -> ShaderCaps;

    /// Copy view and projection matrices from the world view
    fn set_view(&mut self, world: &WorldView);

    /// Set the object-to-world matrix for the next draws
    fn set_world_matrix(&mut self, world: Mat4);

    /// Set a material texture. Variants without `ShaderCaps::TEXTURES` ignore it.
    fn set_texture(&mut self, _slot: TextureSlot, _texture: Arc<dyn Texture>) {}

    /// Bind the program and upload current state
    fn apply_pass(&self, cmd: &mut dyn CommandList) -> Result<()>;
}
