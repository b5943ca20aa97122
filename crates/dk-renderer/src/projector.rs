//! Screen-space projection of decal quads
//!
//! The overlay handles follow a decal on screen, but the camera can move on
//! its own (orbiting) without telling the decal layer. The viewport therefore
//! re-projects the selected decal every frame; nothing here caches.
//!
//! # Algorithm
//!
//! 1. Build the local corners `(±hw, ±hh, 0)` where
//!    `hw = uniform_scale * aspect_ratio / 2` and `hh = uniform_scale / 2`.
//! 2. Rotate them by the decal's Euler rotation (intrinsic XYZ).
//! 3. Translate by the decal position plus the mesh world position.
//! 4. Project through the camera's view-projection matrix and divide by `w`.
//! 5. Map NDC to pixels:
//!    ```text
//!    px = (ndc.x + 1) * width / 2
//!    py = (1 - ndc.y) * height / 2
//!    ```

use dk_core::DecalTransform;
use glam::{Mat4, Vec2, Vec3};

use crate::camera::Camera;
use crate::hit::point_in_quad;

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width / height
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Map normalized device coordinates to pixels (y down)
    pub fn ndc_to_pixel(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * self.width / 2.0,
            (1.0 - ndc.y) * self.height / 2.0,
        )
    }
}

/// Axis-aligned screen rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Left edge (px)
    pub left: f32,
    /// Top edge (px)
    pub top: f32,
    /// Width (px)
    pub width: f32,
    /// Height (px)
    pub height: f32,
}

impl ScreenRect {
    /// Bounding box of a set of points
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self {
            left: min.x,
            top: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// A decal quad projected to the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenQuad {
    /// Corners in local order: top-left, top-right, bottom-left, bottom-right
    pub corners: [Vec2; 4],
    /// Axis-aligned bounds of the corners
    pub bounds: ScreenRect,
    /// Center of the bounds
    pub center: Vec2,
}

impl ScreenQuad {
    fn from_corners(corners: [Vec2; 4]) -> Self {
        let bounds = ScreenRect::from_points(&corners);
        Self {
            corners,
            center: bounds.center(),
            bounds,
        }
    }

    /// Top-left corner (local)
    pub fn top_left(&self) -> Vec2 {
        self.corners[0]
    }

    /// Top-right corner (local)
    pub fn top_right(&self) -> Vec2 {
        self.corners[1]
    }

    /// Bottom-left corner (local)
    pub fn bottom_left(&self) -> Vec2 {
        self.corners[2]
    }

    /// Bottom-right corner (local)
    pub fn bottom_right(&self) -> Vec2 {
        self.corners[3]
    }

    /// Corners as a closed outline (TL, TR, BR, BL)
    pub fn outline(&self) -> [Vec2; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    /// Whether a screen point lies inside the projected quad
    pub fn contains(&self, point: Vec2) -> bool {
        point_in_quad(point, &self.outline())
    }
}

/// World-space corners of a decal quad (TL, TR, BL, BR)
pub fn decal_corners_world(transform: &DecalTransform, mesh_position: Vec3) -> [Vec3; 4] {
    let half = transform.half_extents();
    let rotation = transform.rotation_quat();
    let origin = transform.position + mesh_position;
    [
        Vec3::new(-half.x, half.y, 0.0),
        Vec3::new(half.x, half.y, 0.0),
        Vec3::new(-half.x, -half.y, 0.0),
        Vec3::new(half.x, -half.y, 0.0),
    ]
    .map(|local| origin + rotation * local)
}

/// Project a world point to pixels; `None` at or behind the camera plane
pub fn project_point(view_proj: &Mat4, world: Vec3, viewport: Viewport) -> Option<Vec2> {
    let clip = *view_proj * world.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(viewport.ndc_to_pixel(Vec2::new(ndc.x, ndc.y)))
}

/// Project a decal quad; `None` if any corner is behind the camera
pub fn project_decal(
    view_proj: &Mat4,
    viewport: Viewport,
    transform: &DecalTransform,
    mesh_position: Vec3,
) -> Option<ScreenQuad> {
    let world = decal_corners_world(transform, mesh_position);
    let mut corners = [Vec2::ZERO; 4];
    for (corner, point) in corners.iter_mut().zip(world) {
        *corner = project_point(view_proj, point, viewport)?;
    }
    Some(ScreenQuad::from_corners(corners))
}

/// Per-frame projector bound to one camera and viewport
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    view_proj: Mat4,
    viewport: Viewport,
}

impl Projector {
    /// Capture the camera's current view-projection
    pub fn new(camera: &Camera, viewport: Viewport) -> Self {
        Self {
            view_proj: camera.view_projection(),
            viewport,
        }
    }

    /// Viewport this projector maps to
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Project a world point
    pub fn project_point(&self, world: Vec3) -> Option<Vec2> {
        project_point(&self.view_proj, world, self.viewport)
    }

    /// Project a decal quad
    pub fn project(&self, transform: &DecalTransform, mesh_position: Vec3) -> Option<ScreenQuad> {
        project_decal(&self.view_proj, self.viewport, transform, mesh_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    fn straight_on() -> (Projector, Viewport) {
        let viewport = Viewport::new(800.0, 600.0);
        let mut camera = Camera::new(viewport.aspect());
        camera.set_front_view();
        (Projector::new(&camera, viewport), viewport)
    }

    fn unit_decal() -> DecalTransform {
        DecalTransform {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            uniform_scale: 1.0,
            aspect_ratio: 1.0,
        }
    }

    #[test]
    fn test_center_matches_projected_origin() {
        let (projector, _) = straight_on();
        let quad = projector.project(&unit_decal(), Vec3::ZERO).unwrap();
        let origin = projector.project_point(Vec3::ZERO).unwrap();

        assert_relative_eq!(quad.center.x, origin.x, epsilon = 1e-3);
        assert_relative_eq!(quad.center.y, origin.y, epsilon = 1e-3);
        assert_relative_eq!(origin.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(origin.y, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn test_center_follows_mesh_position() {
        let (projector, _) = straight_on();
        let mesh = Vec3::new(0.3, -0.2, 0.0);
        let mut transform = unit_decal();
        transform.position = Vec3::new(0.1, 0.1, 0.0);

        let quad = projector.project(&transform, mesh).unwrap();
        let expected = projector.project_point(mesh + transform.position).unwrap();
        assert_relative_eq!(quad.center.x, expected.x, epsilon = 1e-3);
        assert_relative_eq!(quad.center.y, expected.y, epsilon = 1e-3);
    }

    #[test]
    fn test_corner_layout_on_screen() {
        let (projector, _) = straight_on();
        let quad = projector.project(&unit_decal(), Vec3::ZERO).unwrap();

        assert!(quad.top_left().x < quad.top_right().x);
        assert!(quad.top_left().y < quad.bottom_left().y);
        assert_relative_eq!(quad.bounds.left, quad.top_left().x, epsilon = 1e-3);
        assert_relative_eq!(quad.bounds.top, quad.top_left().y, epsilon = 1e-3);
        assert_relative_eq!(quad.bounds.width, quad.bounds.height, epsilon = 1e-3);
    }

    #[test]
    fn test_half_turn_swaps_top_corners() {
        let (projector, _) = straight_on();
        let upright = projector.project(&unit_decal(), Vec3::ZERO).unwrap();

        let mut turned = unit_decal();
        turned.rotation.z = PI;
        let turned = projector.project(&turned, Vec3::ZERO).unwrap();

        assert_relative_eq!(turned.top_left().x, upright.top_right().x, epsilon = 1e-2);
        assert_relative_eq!(turned.top_right().x, upright.top_left().x, epsilon = 1e-2);
        assert_relative_eq!(turned.center.x, upright.center.x, epsilon = 1e-2);
    }

    #[test]
    fn test_aspect_widens_quad() {
        let (projector, _) = straight_on();
        let mut wide = unit_decal();
        wide.aspect_ratio = 2.0;
        let quad = projector.project(&wide, Vec3::ZERO).unwrap();
        assert_relative_eq!(quad.bounds.width, quad.bounds.height * 2.0, epsilon = 1e-2);
    }

    #[test]
    fn test_behind_camera_is_hidden() {
        let (projector, _) = straight_on();
        let mut behind = unit_decal();
        behind.position = Vec3::new(0.0, 0.0, 10.0);
        assert!(projector.project(&behind, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_ndc_to_pixel_inverts_y() {
        let viewport = Viewport::new(200.0, 100.0);
        assert_eq!(viewport.ndc_to_pixel(Vec2::new(-1.0, 1.0)), Vec2::new(0.0, 0.0));
        assert_eq!(viewport.ndc_to_pixel(Vec2::new(1.0, -1.0)), Vec2::new(200.0, 100.0));
    }
}
