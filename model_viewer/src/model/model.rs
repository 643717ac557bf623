/// Model - ordered submeshes sharing one per-instance buffer

use std::sync::Arc;
use glam::Mat4;
use crate::asset::MeshPart;
use crate::camera::Aabb;
use crate::context::{DrawContext, LoadContext};
use crate::device::{Buffer, BufferDesc, BufferUsage};
use crate::error::Result;
use crate::shader::ShaderKind;
use super::SubmeshRenderer;

pub struct Model {
    name: String,
    submeshes: Vec<SubmeshRenderer>,
    bounds: Aabb,
    instance_buffer: Arc<dyn Buffer>,
    instance_count: u32,
}

impl Model {
    /// Build every submesh of a model.
    ///
    /// The per-instance stream holds a single identity matrix; placement
    /// comes from the shader world matrix.
    pub fn from_parts(ctx: &LoadContext, name: impl Into<String>, parts: &[MeshPart]) -> Result<Self> {
        let submeshes = parts
            .iter()
            .map(|part| SubmeshRenderer::new(ctx, part))
            .collect::<Result<Vec<_>>>()?;

        let bounds = submeshes
            .iter()
            .map(|s| *s.bounds())
            .reduce(|a, b| a.union(&b))
            .unwrap_or(Aabb::ZERO);

        let identity = Mat4::IDENTITY;
        let instance_bytes: &[u8] = bytemuck::bytes_of(&identity);
        let instance_buffer = ctx.device.create_buffer(BufferDesc {
            size: instance_bytes.len() as u64,
            usage: BufferUsage::Instance,
        })?;
        instance_buffer.update(0, instance_bytes)?;

        Ok(Self {
            name: name.into(),
            submeshes,
            bounds,
            instance_buffer,
            instance_count: 1,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn submeshes(&self) -> &[SubmeshRenderer] {
        &self.submeshes
    }

    /// Union of all submesh bounds
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.submeshes.iter().map(SubmeshRenderer::vertex_count).sum()
    }

    pub fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    /// Retry unresolved texture slots; returns how many remain unresolved
    pub fn try_load_textures(&self) -> usize {
        self.submeshes.iter().map(SubmeshRenderer::try_load_textures).sum()
    }

    /// Draw the submeshes belonging to the current pass with the model shader
    pub fn draw(&self, ctx: &mut DrawContext<'_>, lod: u8) -> Result<()> {
        let step = ctx.step;
        for submesh in self.submeshes.iter().filter(|s| s.draw_step() == step) {
            submesh.draw(lod, ShaderKind::Model, false, ctx, &self.instance_buffer, self.instance_count)?;
        }
        Ok(())
    }

    /// Draw every submesh regardless of pass
    pub fn draw_all(
        &self,
        ctx: &mut DrawContext<'_>,
        lod: u8,
        kind: ShaderKind,
        force_no_backface_culling: bool,
    ) -> Result<()> {
        for submesh in &self.submeshes {
            submesh.draw(lod, kind, force_no_backface_culling, ctx, &self.instance_buffer, self.instance_count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
