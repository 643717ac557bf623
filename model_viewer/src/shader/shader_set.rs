/// The shader variants owned by the render context

use glam::Mat4;
use crate::camera::WorldView;
use crate::context::DefaultTextures;
use super::{Shader, ShaderKind, TextureSlot, ModelShader, DebugPrimShader};

#[derive(Default)]
pub struct ShaderSet {
    pub model: ModelShader,
    pub debug_prim: DebugPrimShader,
}

impl ShaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant selected by `kind`
    pub fn get_mut(&mut self, kind: ShaderKind) -> &mut dyn Shader {
        match kind {
            ShaderKind::Model => &mut self.model,
            ShaderKind::DebugPrimitive => &mut self.debug_prim,
        }
    }

    /// Per-pass shader globals: view matrices into both variants, eye and
    /// light into the model shader, and every texture slot back to its default.
    ///
    /// World matrices return to identity and debug vertex colours are turned
    /// back on, so no pass inherits the previous pass's draw state.
    pub fn begin_pass(&mut self, world: &WorldView, defaults: &DefaultTextures, lighting: bool) {
        self.model.set_view(world);
        self.debug_prim.set_view(world);
        self.model.set_world_matrix(Mat4::IDENTITY);
        self.debug_prim.set_world_matrix(Mat4::IDENTITY);
        self.debug_prim.set_vertex_color_enabled(true);

        self.model.set_eye_position(world.eye());
        self.model.set_light_direction(world.light_direction());
        self.model.set_lighting_enabled(lighting);

        for slot in TextureSlot::ALL {
            self.model.set_texture(slot, defaults.for_slot(slot));
        }
    }
}

#[cfg(test)]
#[path = "shader_set_tests.rs"]
mod tests;
