/// Untextured shader for debug primitives and the selection overlay

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use crate::camera::WorldView;
use crate::device::CommandList;
use crate::error::Result;
use super::{Shader, ShaderKind, ShaderCaps};

/// Push-constant block of the debug primitive shader
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct DebugPrimUniforms {
    pub world: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    /// x = 1.0 when vertex colours are used
    pub flags: Vec4,
}

pub struct DebugPrimShader {
    uniforms: DebugPrimUniforms,
}

impl Default for DebugPrimShader {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugPrimShader {
    /// Identity matrices with vertex colours on
    pub fn new() -> Self {
        Self {
            uniforms: DebugPrimUniforms {
                world: Mat4::IDENTITY,
                view: Mat4::IDENTITY,
                projection: Mat4::IDENTITY,
                flags: Vec4::new(1.0, 0.0, 0.0, 0.0),
            },
        }
    }

    pub fn set_vertex_color_enabled(&mut self, enabled: bool) {
        self.uniforms.flags.x = if enabled { 1.0 } else { 0.0 };
    }

    pub fn vertex_color_enabled(&self) -> bool {
        self.uniforms.flags.x != 0.0
    }

    pub fn uniforms(&self) -> &DebugPrimUniforms {
        &self.uniforms
    }
}

impl Shader for DebugPrimShader {
    fn kind(&self) -> ShaderKind {
        ShaderKind::DebugPrimitive
    }

    fn capabilities(&self) -> ShaderCaps {
        ShaderCaps::VERTEX_COLOR
    }

    fn set_view(&mut self, world: &WorldView) {
        self.uniforms.view = *world.view_matrix();
        self.uniforms.projection = *world.projection_matrix();
    }

    fn set_world_matrix(&mut self, world: Mat4) {
        self.uniforms.world = world;
    }

    fn apply_pass(&self, cmd: &mut dyn CommandList) -> Result<()> {
        cmd.bind_shader(ShaderKind::DebugPrimitive)?;
        cmd.push_constants(0, bytemuck::bytes_of(&self.uniforms))
    }
}
