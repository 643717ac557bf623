/// CommandList trait - for recording rendering commands

use std::sync::Arc;
use glam::Vec2;
use crate::error::Result;
use crate::shader::ShaderKind;
use super::{
    Buffer, IndexType, Texture,
    PrimitiveTopology, RasterizerState, DepthStencilState, SamplerState,
};

/// Command list for recording rendering commands
///
/// Commands are recorded by the render thread and submitted via
/// `GraphicsDevice::submit()`.
pub trait CommandList: Send {
    /// Begin recording commands
    fn begin(&mut self) -> Result<()>;

    /// End recording commands
    fn end(&mut self) -> Result<()>;

    /// Clear the color and depth targets
    fn clear(&mut self, color: [f32; 4]) -> Result<()>;

    /// Set the viewport
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Set the rasterizer state used by subsequent draws
    fn set_rasterizer_state(&mut self, state: RasterizerState) -> Result<()>;

    /// Set the depth-stencil state used by subsequent draws
    fn set_depth_stencil_state(&mut self, state: DepthStencilState) -> Result<()>;

    /// Set the sampler bound to slot 0
    fn set_sampler_state(&mut self, state: SamplerState) -> Result<()>;

    /// Bind the program for a shader variant
    fn bind_shader(&mut self, kind: ShaderKind) -> Result<()>;

    /// Push shader constants
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset in bytes into the constant range
    /// * `data` - Data to push
    fn push_constants(&mut self, offset: u32, data: &[u8]) -> Result<()>;

    /// Bind a texture to a shader slot
    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()>;

    /// Bind the per-vertex and per-instance vertex streams
    fn bind_vertex_buffers(
        &mut self,
        vertices: &Arc<dyn Buffer>,
        instances: &Arc<dyn Buffer>,
    ) -> Result<()>;

    /// Bind an index buffer
    fn bind_index_buffer(&mut self, buffer: &Arc<dyn Buffer>, index_type: IndexType) -> Result<()>;

    /// Draw indexed, instanced primitives
    ///
    /// # Arguments
    ///
    /// * `topology` - How indices are assembled into primitives
    /// * `index_count` - Number of indices to read from the bound index buffer
    /// * `instance_count` - Number of instances from the bound instance stream
    fn draw_indexed_instanced(
        &mut self,
        topology: PrimitiveTopology,
        index_count: u32,
        instance_count: u32,
    ) -> Result<()>;

    /// Draw a screen-space text label
    fn draw_text(&mut self, label: &TextLabel) -> Result<()>;
}

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-depth viewport at the origin
    pub fn new(width: f32, height: f32) -> Self {
        Self { x: 0.0, y: 0.0, width, height, min_depth: 0.0, max_depth: 1.0 }
    }

    /// Center of the viewport in screen coordinates
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width / height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 { self.width / self.height } else { 1.0 }
    }
}

/// Where a label's position is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    Center,
}

/// A screen-space text label with an outline
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub position: Vec2,
    pub color: [f32; 4],
    pub scale: f32,
    pub anchor: TextAnchor,
}
