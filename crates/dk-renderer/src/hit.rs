//! Screen-space hit testing
//!
//! This module implements the 2D picking used by the viewport: deciding
//! whether the pointer is over a projected decal quad or over one of the
//! circular handle buttons.

use glam::Vec2;

/// Point-in-convex-quad test.
///
/// Tests if `point` lies inside (or on the edge of) the convex quad whose
/// corners are given in order around its boundary.
///
/// # Algorithm
///
/// For each edge `a -> b`, the sign of the 2D cross product
/// ```text
/// (b - a) x (point - a)
/// ```
/// tells which side of the edge the point is on. The point is inside when
/// every edge reports the same side (or zero). Either winding works, so quads
/// mirrored by a half-turn rotation are still hit.
///
/// # Arguments
///
/// * `point` - The screen position to test.
/// * `corners` - Quad corners in boundary order (e.g. TL, TR, BR, BL).
///
/// # Returns
///
/// `true` if the point is inside the quad.
pub fn point_in_quad(point: Vec2, corners: &[Vec2; 4]) -> bool {
    let mut positive = false;
    let mut negative = false;

    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let cross = (b - a).perp_dot(point - a);
        if cross > 0.0 {
            positive = true;
        } else if cross < 0.0 {
            negative = true;
        }
        if positive && negative {
            return false;
        }
    }

    true
}

/// Point-in-circle test for round handle buttons.
///
/// # Returns
///
/// * `Some(distance)` - Distance from the circle center if inside.
/// * `None` - If the point is outside the circle.
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let distance = point.distance(center);
    (distance <= radius).then_some(distance)
}
