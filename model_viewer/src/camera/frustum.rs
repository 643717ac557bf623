/// Frustum - six clipping planes for instance culling.
///
/// Each plane is a Vec4 (A, B, C, D) with an inward-pointing unit normal.
/// A point P is inside when dot(plane, (P, 1)) >= 0 for every plane.

use glam::{Mat4, Vec3, Vec4};
use super::Aabb;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes: left, right, bottom, top, near, far
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract the planes from a view-projection matrix (Gribb & Hartmann).
    ///
    /// Works for perspective and orthographic projections with a [0, 1]
    /// depth range.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let mut planes = [
            row3 + row0,
            row3 - row0,
            row3 + row1,
            row3 - row1,
            row2,
            row3 - row2,
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance from `point` to plane `index` (positive = inside)
    pub fn signed_distance(&self, index: usize, point: Vec3) -> f32 {
        let plane = self.planes[index];
        plane.truncate().dot(point) + plane.w
    }

    /// Conservative box test using the positive vertex of each plane.
    ///
    /// May report a box outside the frustum as intersecting near the
    /// corners, never the reverse.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            let p_vertex = Vec3::select(normal.cmpge(Vec3::ZERO), aabb.max, aabb.min);
            normal.dot(p_vertex) + plane.w >= 0.0
        })
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
