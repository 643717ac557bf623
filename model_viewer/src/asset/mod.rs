//! Parsed asset input types.
//!
//! Produced by the container-format layer and consumed by
//! `SubmeshRenderer::new`. Nothing here touches the GPU.

mod mesh_part;
mod material;

pub use mesh_part::{MeshPart, SourceVertex, SourceFaceSet, FaceSetFlags};
pub use material::{MaterialDef, short_name};
