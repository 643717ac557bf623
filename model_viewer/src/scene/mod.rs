//! Scene module - the live set of model instances.

mod scene_registry;

pub use scene_registry::{SceneRegistry, InstanceKey, SceneStats};
