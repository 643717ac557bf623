/// SubmeshRenderer - GPU buffers, LOD face sets and texture slots of one mesh part

use std::sync::{Arc, RwLock};
use bytemuck::{Pod, Zeroable};
use crate::asset::{MeshPart, SourceFaceSet, SourceVertex};
use crate::camera::Aabb;
use crate::context::{DrawContext, LoadContext};
use crate::device::{Buffer, BufferDesc, BufferUsage, GraphicsDevice, IndexType, PrimitiveTopology, Texture};
use crate::error::Result;
use crate::frame::DrawStep;
use crate::shader::{ShaderCaps, ShaderKind, TextureSlot};
use crate::texture::TexturePool;
use crate::viewer_trace;

const SOURCE: &str = "viewer::SubmeshRenderer";

// ===== VERTEX =====

/// Packed vertex layout uploaded to the vertex buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// xyz = tangent, w = binormal sign
    pub tangent: [f32; 4],
    pub binormal: [f32; 3],
    pub uv0: [f32; 2],
    pub uv1: [f32; 2],
}

/// Pack a source vertex.
///
/// Normal, tangent and binormal are filled only when the vertex has a
/// normal and at least one tangent; missing UV sets are zero.
pub fn pack_vertex(vertex: &SourceVertex) -> ModelVertex {
    let mut packed = ModelVertex::zeroed();
    packed.position = vertex.position.to_array();

    if let (Some(normal), Some(tangent)) = (vertex.normal, vertex.tangents.first()) {
        let n = normal.normalize_or_zero();
        let t = tangent.truncate().normalize_or_zero();
        packed.normal = n.to_array();
        packed.tangent = t.extend(tangent.w).to_array();
        packed.binormal = (n.cross(t) * tangent.w).to_array();
    }

    if let Some(uv) = vertex.uvs.first() {
        packed.uv0 = uv.to_array();
    }
    if let Some(uv) = vertex.uvs.get(1) {
        packed.uv1 = uv.to_array();
    }
    packed
}

// ===== FACE SET =====

/// One uploaded index batch
pub struct FaceSet {
    index_buffer: Arc<dyn Buffer>,
    index_type: IndexType,
    index_count: u32,
    topology: PrimitiveTopology,
    backface_culling: bool,
    lod: u8,
}

impl FaceSet {
    fn upload(device: &dyn GraphicsDevice, source: &SourceFaceSet) -> Result<Self> {
        let (index_type, bytes) = if source.is_32bit() {
            (IndexType::U32, bytemuck::cast_slice::<u32, u8>(&source.indices).to_vec())
        } else {
            let narrow: Vec<u16> = source.indices.iter().map(|&i| i as u16).collect();
            (IndexType::U16, bytemuck::cast_slice::<u16, u8>(&narrow).to_vec())
        };

        let index_buffer = device.create_buffer(BufferDesc {
            size: bytes.len() as u64,
            usage: BufferUsage::Index,
        })?;
        index_buffer.update(0, &bytes)?;

        Ok(Self {
            index_buffer,
            index_type,
            index_count: source.indices.len() as u32,
            topology: if source.triangle_strip {
                PrimitiveTopology::TriangleStrip
            } else {
                PrimitiveTopology::TriangleList
            },
            backface_culling: source.cull_backfaces,
            lod: source.flags.lod().unwrap_or(0),
        })
    }

    pub fn index_buffer(&self) -> &Arc<dyn Buffer> {
        &self.index_buffer
    }

    pub fn index_type(&self) -> IndexType {
        self.index_type
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    pub fn backface_culling(&self) -> bool {
        self.backface_culling
    }

    pub fn lod(&self) -> u8 {
        self.lod
    }

    pub fn primitive_count(&self) -> u32 {
        self.topology.primitive_count(self.index_count)
    }
}

// ===== SUBMESH RENDERER =====

/// Texture slot assignment from material parameter names (upper-cased)
fn slot_for_param(name: &str) -> Option<TextureSlot> {
    match name {
        "G_DIFFUSETEXTURE" | "G_DIFFUSE" => Some(TextureSlot::Diffuse),
        "G_SPECULARTEXTURE" | "G_SPECULAR" => Some(TextureSlot::Specular),
        "G_BUMPMAPTEXTURE" | "G_BUMPMAP" => Some(TextureSlot::Normal),
        "G_DOLTEXTURE1" => Some(TextureSlot::LightMap1),
        "G_DOLTEXTURE2" => Some(TextureSlot::LightMap2),
        _ => None,
    }
}

pub struct SubmeshRenderer {
    vertex_buffer: Option<Arc<dyn Buffer>>,
    vertex_count: usize,
    face_sets: Vec<FaceSet>,
    has_lod_variants: bool,
    bounds: Aabb,
    draw_step: DrawStep,
    texture_names: [Option<String>; TextureSlot::COUNT],
    textures: RwLock<[Option<Arc<dyn Texture>>; TextureSlot::COUNT]>,
    pool: Arc<TexturePool>,
}

impl SubmeshRenderer {
    /// Upload a mesh part and resolve its textures.
    ///
    /// A part without vertices becomes an empty submesh that draws nothing.
    /// Face sets that would draw no primitives are dropped.
    ///
    /// # Errors
    ///
    /// Device errors from buffer creation or upload.
    pub fn new(ctx: &LoadContext, part: &MeshPart) -> Result<Self> {
        let device = ctx.device.as_ref();

        let mut texture_names: [Option<String>; TextureSlot::COUNT] = Default::default();
        for (name, value) in &part.material.params {
            if let Some(slot) = slot_for_param(&name.to_uppercase()) {
                texture_names[slot.index()] = Some(value.clone());
            }
        }

        let vertices: Vec<ModelVertex> = part.vertices.iter().map(pack_vertex).collect();
        let vertex_buffer = if vertices.is_empty() {
            None
        } else {
            let bytes: &[u8] = bytemuck::cast_slice(&vertices);
            let buffer = device.create_buffer(BufferDesc {
                size: bytes.len() as u64,
                usage: BufferUsage::Vertex,
            })?;
            buffer.update(0, bytes)?;
            Some(buffer)
        };

        let mut face_sets = Vec::with_capacity(part.face_sets.len());
        let mut has_lod_variants = false;
        if vertex_buffer.is_some() {
            for source in &part.face_sets {
                let topology = if source.triangle_strip {
                    PrimitiveTopology::TriangleStrip
                } else {
                    PrimitiveTopology::TriangleList
                };
                if topology.primitive_count(source.indices.len() as u32) == 0 {
                    viewer_trace!(SOURCE, "Skipping face set with {} indices", source.indices.len());
                    continue;
                }
                if source.flags.lod().is_some() {
                    has_lod_variants = true;
                }
                face_sets.push(FaceSet::upload(device, source)?);
            }
        }

        let submesh = Self {
            vertex_buffer,
            vertex_count: vertices.len(),
            face_sets,
            has_lod_variants,
            bounds: Aabb::from_points(part.vertices.iter().map(|v| v.position)),
            draw_step: part.material.draw_step(),
            texture_names,
            textures: RwLock::new(Default::default()),
            pool: Arc::clone(&ctx.textures),
        };
        submesh.try_load_textures();
        Ok(submesh)
    }

    /// Resolve every named slot that has no texture yet.
    ///
    /// Fetching runs with no lock held, so draws keep reading the current
    /// slots while a slow source decodes. Failures are logged by the pool
    /// and leave the slot on its default texture.
    ///
    /// Returns the number of named slots still unresolved.
    pub fn try_load_textures(&self) -> usize {
        let pending: Vec<(usize, &str)> = {
            let textures = self.textures.read().unwrap_or_else(|e| e.into_inner());
            TextureSlot::ALL
                .iter()
                .map(|slot| slot.index())
                .filter(|&i| textures[i].is_none())
                .filter_map(|i| self.texture_names[i].as_deref().map(|name| (i, name)))
                .collect()
        };
        if pending.is_empty() {
            return 0;
        }

        let fetched: Vec<(usize, Option<Arc<dyn Texture>>)> = pending
            .into_iter()
            .map(|(i, name)| (i, self.pool.fetch(name).ok().flatten()))
            .collect();

        let mut textures = self.textures.write().unwrap_or_else(|e| e.into_inner());
        let mut missing = 0;
        for (i, texture) in fetched {
            match texture {
                Some(texture) => {
                    // Another retry may have filled the slot first
                    if textures[i].is_none() {
                        textures[i] = Some(texture);
                    }
                }
                None if textures[i].is_none() => missing += 1,
                None => {}
            }
        }
        if missing > 0 {
            viewer_trace!(SOURCE, "{} texture slots still unresolved", missing);
        }
        missing
    }

    // ===== ACCESSORS =====

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Pass this submesh renders in (Opaque or AlphaEdge)
    pub fn draw_step(&self) -> DrawStep {
        self.draw_step
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn face_sets(&self) -> &[FaceSet] {
        &self.face_sets
    }

    /// True when any face set carries a LOD tag
    pub fn has_lod_variants(&self) -> bool {
        self.has_lod_variants
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_buffer.is_none()
    }

    /// Texture name referenced by the material for `slot`
    pub fn texture_name(&self, slot: TextureSlot) -> Option<&str> {
        self.texture_names[slot.index()].as_deref()
    }

    /// Resolved texture for `slot`, if any
    pub fn texture(&self, slot: TextureSlot) -> Option<Arc<dyn Texture>> {
        let textures = self.textures.read().unwrap_or_else(|e| e.into_inner());
        textures[slot.index()].clone()
    }

    /// Whether a face set takes part in `lod`
    fn serves_lod(&self, face_set: &FaceSet, lod: u8) -> bool {
        !self.has_lod_variants || face_set.lod == lod
    }

    /// Number of face sets drawn at `lod`
    pub fn face_sets_for_lod(&self, lod: u8) -> usize {
        self.face_sets.iter().filter(|fs| self.serves_lod(fs, lod)).count()
    }

    // ===== DRAW =====

    /// Draw the face sets serving `lod` with shader `kind`.
    ///
    /// Textures are pushed to the shader unless it ignores them or textures
    /// are disabled. Culling for each face set is its own flag gated by the
    /// global toggle, or off when `force_no_backface_culling` is set.
    pub fn draw(
        &self,
        lod: u8,
        kind: ShaderKind,
        force_no_backface_culling: bool,
        ctx: &mut DrawContext<'_>,
        instance_buffer: &Arc<dyn Buffer>,
        instance_count: u32,
    ) -> Result<()> {
        let Some(vertex_buffer) = &self.vertex_buffer else {
            return Ok(());
        };
        if self.face_sets.is_empty() || instance_count == 0 {
            return Ok(());
        }

        let shader = ctx.shaders.get_mut(kind);
        if ctx.config.enable_textures && shader.capabilities().contains(ShaderCaps::TEXTURES) {
            let textures = self.textures.read().unwrap_or_else(|e| e.into_inner());
            for slot in TextureSlot::ALL {
                let texture = textures[slot.index()]
                    .clone()
                    .unwrap_or_else(|| ctx.defaults.for_slot(slot));
                shader.set_texture(slot, texture);
            }
        }

        ctx.cmd.bind_vertex_buffers(vertex_buffer, instance_buffer)?;
        shader.apply_pass(&mut *ctx.cmd)?;

        for face_set in &self.face_sets {
            if !self.serves_lod(face_set, lod) {
                continue;
            }
            let cull = !force_no_backface_culling
                && ctx.config.backface_culling
                && face_set.backface_culling;
            let rasterizer = ctx.rasterizer(cull);
            ctx.cmd.set_rasterizer_state(rasterizer)?;
            ctx.cmd.bind_index_buffer(&face_set.index_buffer, face_set.index_type)?;
            ctx.cmd.draw_indexed_instanced(face_set.topology, face_set.index_count, instance_count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "submesh_tests.rs"]
mod tests;
