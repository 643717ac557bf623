/// Shared fixtures for unit tests

use std::sync::Arc;
use glam::{Vec2, Vec3, Vec4};
use crate::asset::{MaterialDef, MeshPart, SourceFaceSet, SourceVertex};
use crate::config::ViewerConfig;
use crate::context::RenderContext;
use crate::device::mock_graphics_device::MockGraphicsDevice;
use crate::device::{GraphicsDevice, TextureFormat, Viewport};
use crate::texture::{mip_byte_len, MemoryTextureSource, TextureSource};

/// A DDS blob with a full header and zero-filled mip data
pub(crate) fn dds_blob(width: i32, height: i32, mip_count: i32, tag: &[u8; 4]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"DDS ");
    bytes.extend_from_slice(&124i32.to_le_bytes());
    bytes.extend_from_slice(&0i32.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 8]);
    bytes.extend_from_slice(&mip_count.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 52]);
    bytes.extend_from_slice(tag);
    bytes.extend_from_slice(&[0u8; 40]);

    let format = if tag == b"DXT1" { TextureFormat::BC1_RGBA_UNORM } else { TextureFormat::BC3_UNORM };
    for level in 0..mip_count.max(1) as u32 {
        let len = mip_byte_len(width.max(0) as u32, height.max(0) as u32, level, format);
        bytes.extend(std::iter::repeat(0u8).take(len));
    }
    bytes
}

pub(crate) fn mock_context_with(config: ViewerConfig) -> (Arc<MockGraphicsDevice>, RenderContext) {
    let device = MockGraphicsDevice::shared();
    let context = RenderContext::initialize(
        device.clone() as Arc<dyn GraphicsDevice>,
        config,
        Viewport::new(1280.0, 720.0),
    ).unwrap();
    (device, context)
}

pub(crate) fn mock_context() -> (Arc<MockGraphicsDevice>, RenderContext) {
    mock_context_with(ViewerConfig::default())
}

/// Register 4x4 DXT1 textures under `names` with the context's pool
pub(crate) fn register_textures(context: &RenderContext, names: &[&str]) -> Arc<dyn TextureSource> {
    let source = MemoryTextureSource::new();
    for name in names {
        source.insert(*name, dds_blob(4, 4, 1, b"DXT1"));
    }
    let source: Arc<dyn TextureSource> = Arc::new(source);
    context.textures().register_source(&source);
    source
}

fn lit_vertex(position: Vec3, uv: Vec2) -> SourceVertex {
    SourceVertex {
        position,
        normal: Some(Vec3::Z),
        tangents: vec![Vec4::new(1.0, 0.0, 0.0, 1.0)],
        uvs: vec![uv],
    }
}

/// Unit quad in the XY plane centred on `center`, as one 16-bit triangle list
pub(crate) fn quad_part_at(center: Vec3, mtd: &str) -> MeshPart {
    let corners = [
        (Vec3::new(-0.5, -0.5, 0.0), Vec2::new(0.0, 1.0)),
        (Vec3::new(0.5, -0.5, 0.0), Vec2::new(1.0, 1.0)),
        (Vec3::new(0.5, 0.5, 0.0), Vec2::new(1.0, 0.0)),
        (Vec3::new(-0.5, 0.5, 0.0), Vec2::new(0.0, 0.0)),
    ];
    MeshPart {
        vertices: corners.iter().map(|(p, uv)| lit_vertex(center + *p, *uv)).collect(),
        face_sets: vec![SourceFaceSet::triangle_list(vec![0, 1, 2, 0, 2, 3])],
        material: MaterialDef::new(mtd),
    }
}

pub(crate) fn quad_part(mtd: &str) -> MeshPart {
    quad_part_at(Vec3::ZERO, mtd)
}
