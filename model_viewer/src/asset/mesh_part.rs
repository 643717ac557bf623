/// One mesh part: vertices, face sets and material

use bitflags::bitflags;
use glam::{Vec2, Vec3, Vec4};
use super::MaterialDef;

bitflags! {
    /// Face set flag word as stored in the source format
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FaceSetFlags: u32 {
        const LOD_LEVEL_1 = 0x0100_0000;
        const LOD_LEVEL_2 = 0x0200_0000;
        const MOTION_BLUR = 0x8000_0000;
        const _ = !0;
    }
}

impl FaceSetFlags {
    /// LOD tag of a face set: the flag word must equal one LOD flag exactly
    pub fn lod(&self) -> Option<u8> {
        if *self == FaceSetFlags::LOD_LEVEL_1 {
            Some(1)
        } else if *self == FaceSetFlags::LOD_LEVEL_2 {
            Some(2)
        } else {
            None
        }
    }
}

/// A source vertex before packing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceVertex {
    pub position: Vec3,
    pub normal: Option<Vec3>,
    /// xyz = tangent, w = binormal sign
    pub tangents: Vec<Vec4>,
    pub uvs: Vec<Vec2>,
}

impl SourceVertex {
    pub fn new(position: Vec3) -> Self {
        Self { position, ..Default::default() }
    }
}

/// One indexed triangle batch
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFaceSet {
    pub indices: Vec<u32>,
    /// Declared index width in bits (0x10 or 0x20)
    pub index_size: u8,
    pub cull_backfaces: bool,
    pub triangle_strip: bool,
    pub flags: FaceSetFlags,
}

impl SourceFaceSet {
    /// Triangle list with 16-bit indices and backface culling
    pub fn triangle_list(indices: Vec<u32>) -> Self {
        Self {
            indices,
            index_size: 0x10,
            cull_backfaces: true,
            triangle_strip: false,
            flags: FaceSetFlags::empty(),
        }
    }

    /// Triangle strip with 16-bit indices and backface culling
    pub fn triangle_strip(indices: Vec<u32>) -> Self {
        Self { triangle_strip: true, ..Self::triangle_list(indices) }
    }

    pub fn with_flags(mut self, flags: FaceSetFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_index_size(mut self, bits: u8) -> Self {
        self.index_size = bits;
        self
    }

    pub fn with_backface_culling(mut self, cull: bool) -> Self {
        self.cull_backfaces = cull;
        self
    }

    pub fn is_32bit(&self) -> bool {
        self.index_size == 0x20
    }
}

/// A parsed mesh part and its material
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    pub vertices: Vec<SourceVertex>,
    pub face_sets: Vec<SourceFaceSet>,
    pub material: MaterialDef,
}

#[cfg(test)]
#[path = "mesh_part_tests.rs"]
mod tests;
