//! Model module - GPU-resident models and their placed instances.
//!
//! - `SubmeshRenderer`: vertex/index buffers and texture slots of one mesh part
//! - `Model`: ordered submeshes sharing a per-instance buffer
//! - `ModelInstance`: a model placed in the scene with visibility and drawgroups

mod submesh;
mod model;
mod instance;

pub use submesh::{SubmeshRenderer, FaceSet, ModelVertex, pack_vertex};
pub use model::Model;
pub use instance::{ModelInstance, Drawgroups, DrawgroupRange};
