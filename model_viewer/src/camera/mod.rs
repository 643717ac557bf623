//! Camera module - bounds, transforms, frustum and the world view.
//!
//! The world view is read-only while a frame is recorded and mutated only
//! between frames by the owning application.

mod aabb;
mod transform;
mod frustum;
mod world_view;

pub use aabb::Aabb;
pub use transform::Transform;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use world_view::WorldView;
