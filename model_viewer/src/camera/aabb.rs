/// Axis-aligned bounding box.

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box in local space
///
/// Stored in local space and transformed by the instance world matrix
/// at culling time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl Aabb {
    /// Degenerate box at the origin, used for parts with no vertices
    pub const ZERO: Aabb = Aabb { min: Vec3::ZERO, max: Vec3::ZERO };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box containing every point, or `Aabb::ZERO` for no points
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::ZERO;
        };
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Self { min, max }
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Transform this local-space box by a matrix, returning a new box.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the box extents
    /// for a tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        Aabb { min: new_min, max: new_max }
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
