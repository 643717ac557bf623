/// Lit, textured model shader

use std::sync::Arc;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use crate::camera::WorldView;
use crate::device::{CommandList, Texture};
use crate::error::Result;
use super::{Shader, ShaderKind, ShaderCaps, TextureSlot};

/// Lighting parameters pushed alongside the matrices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingParams {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular_power: f32,
    pub normal_map_z: f32,
}

impl LightingParams {
    pub const LIT: Self = Self {
        ambient: 0.15,
        diffuse: 1.0,
        specular_power: 2.0,
        normal_map_z: 1.0,
    };

    pub const FULLBRIGHT: Self = Self {
        ambient: 1.0,
        diffuse: 0.0,
        specular_power: f32::INFINITY,
        normal_map_z: 1.0,
    };
}

/// Push-constant block of the model shader
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ModelUniforms {
    pub world: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub eye_position: Vec4,
    pub light_direction: Vec4,
    /// x = ambient, y = diffuse, z = specular power, w = normal map z
    pub lighting: Vec4,
}

pub struct ModelShader {
    uniforms: ModelUniforms,
    lighting: LightingParams,
    textures: [Option<Arc<dyn Texture>>; TextureSlot::COUNT],
}

impl Default for ModelShader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelShader {
    pub fn new() -> Self {
        let mut shader = Self {
            uniforms: ModelUniforms {
                world: Mat4::IDENTITY,
                view: Mat4::IDENTITY,
                projection: Mat4::IDENTITY,
                eye_position: Vec4::W,
                light_direction: Vec4::ZERO,
                lighting: Vec4::ZERO,
            },
            lighting: LightingParams::LIT,
            textures: Default::default(),
        };
        shader.set_lighting_params(LightingParams::LIT);
        shader
    }

    pub fn set_eye_position(&mut self, eye: Vec3) {
        self.uniforms.eye_position = eye.extend(1.0);
    }

    pub fn set_light_direction(&mut self, direction: Vec3) {
        self.uniforms.light_direction = direction.extend(0.0);
    }

    /// Lit shading when `enabled`, fullbright otherwise
    pub fn set_lighting_enabled(&mut self, enabled: bool) {
        self.set_lighting_params(if enabled { LightingParams::LIT } else { LightingParams::FULLBRIGHT });
    }

    pub fn set_lighting_params(&mut self, params: LightingParams) {
        self.lighting = params;
        self.uniforms.lighting = Vec4::new(
            params.ambient,
            params.diffuse,
            params.specular_power,
            params.normal_map_z,
        );
    }

    pub fn lighting(&self) -> LightingParams {
        self.lighting
    }

    pub fn uniforms(&self) -> &ModelUniforms {
        &self.uniforms
    }

    /// Texture currently set for `slot`
    pub fn texture(&self, slot: TextureSlot) -> Option<&Arc<dyn Texture>> {
        self.textures[slot.index()].as_ref()
    }
}

impl Shader for ModelShader {
    fn kind(&self) -> ShaderKind {
        ShaderKind::Model
    }

    fn capabilities(&self) -> ShaderCaps {
        ShaderCaps::TEXTURES | ShaderCaps::LIGHTING
    }

    fn set_view(&mut self, world: &WorldView) {
        self.uniforms.view = *world.view_matrix();
        self.uniforms.projection = *world.projection_matrix();
    }

    fn set_world_matrix(&mut self, world: Mat4) {
        self.uniforms.world = world;
    }

    fn set_texture(&mut self, slot: TextureSlot, texture: Arc<dyn Texture>) {
        self.textures[slot.index()] = Some(texture);
    }

    fn apply_pass(&self, cmd: &mut dyn CommandList) -> Result<()> {
        cmd.bind_shader(ShaderKind::Model)?;
        cmd.push_constants(0, bytemuck::bytes_of(&self.uniforms))?;
        for slot in TextureSlot::ALL {
            if let Some(texture) = &self.textures[slot.index()] {
                cmd.bind_texture(slot.index() as u32, texture)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "model_shader_tests.rs"]
mod tests;
