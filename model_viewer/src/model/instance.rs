/// ModelInstance - a model placed in the scene, and drawgroup matching

use std::sync::Arc;
use glam::Mat4;
use crate::camera::{Aabb, Transform};
use super::Model;

/// Inclusive integer range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawgroupRange {
    pub min: i32,
    pub max: i32,
}

impl DrawgroupRange {
    /// Range matching every drawgroup
    pub const ANY: DrawgroupRange = DrawgroupRange { min: i32::MIN, max: i32::MAX };

    pub fn new(min: i32, max: i32) -> Self {
        Self { min: min.min(max), max: min.max(max) }
    }

    pub fn single(value: i32) -> Self {
        Self { min: value, max: value }
    }

    pub fn overlaps(&self, other: &DrawgroupRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

/// Four drawgroup ranges per instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Drawgroups(pub [DrawgroupRange; 4]);

impl Default for Drawgroups {
    fn default() -> Self {
        Self::all()
    }
}

impl Drawgroups {
    /// Member of every drawgroup
    pub fn all() -> Self {
        Self([DrawgroupRange::ANY; 4])
    }

    /// From the four raw values of the source format; `-1` means any
    pub fn from_raw(raw: [i32; 4]) -> Self {
        Self(raw.map(|v| if v == -1 { DrawgroupRange::ANY } else { DrawgroupRange::single(v) }))
    }

    /// True when any range of `self` overlaps any range of `other`
    pub fn matches(&self, other: &Drawgroups) -> bool {
        self.0.iter().any(|a| other.0.iter().any(|b| a.overlaps(b)))
    }
}

/// A model placed in the scene
pub struct ModelInstance {
    pub name: String,
    pub model: Arc<Model>,
    pub transform: Transform,
    pub visible: bool,
    pub drawgroups: Drawgroups,
}

impl ModelInstance {
    /// Visible instance in every drawgroup
    pub fn new(name: impl Into<String>, model: Arc<Model>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            model,
            transform,
            visible: true,
            drawgroups: Drawgroups::all(),
        }
    }

    pub fn with_drawgroups(mut self, drawgroups: Drawgroups) -> Self {
        self.drawgroups = drawgroups;
        self
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.transform.world_matrix()
    }

    /// Model bounds placed by the instance transform
    pub fn world_bounds(&self) -> Aabb {
        self.model.bounds().transformed(&self.world_matrix())
    }

    /// Whether this instance shares a drawgroup with `other`
    pub fn drawgroup_match(&self, other: &ModelInstance) -> bool {
        self.drawgroups.matches(&other.drawgroups)
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
