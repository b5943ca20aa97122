//! Handle overlay layout
//!
//! Handle buttons sit on the corners of the selected decal's screen bounds,
//! with the move handle in the middle.

use glam::Vec2;

use crate::config::OverlayConfig;
use crate::hit::point_in_circle;
use crate::projector::ScreenQuad;

/// On-screen control bound to the selected decal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Drag to translate
    Move,
    /// Drag to rotate about the view axis
    Rotate,
    /// Drag to scale uniformly
    Resize,
    /// Click to remove the decal content
    Delete,
    /// Click to add a copy of the decal
    Duplicate,
}

impl Handle {
    /// Every handle, in draw order
    pub const ALL: [Handle; 5] = [
        Handle::Move,
        Handle::Rotate,
        Handle::Resize,
        Handle::Delete,
        Handle::Duplicate,
    ];

    /// Whether the handle acts on press instead of starting a drag
    pub fn is_one_shot(&self) -> bool {
        matches!(self, Handle::Delete | Handle::Duplicate)
    }

    /// Glyph drawn on the button
    pub fn icon(&self) -> &'static str {
        match self {
            Handle::Move => "✥",
            Handle::Rotate => "⟳",
            Handle::Resize => "⤡",
            Handle::Delete => "✕",
            Handle::Duplicate => "⧉",
        }
    }

    /// Tooltip text
    pub fn tooltip(&self) -> &'static str {
        match self {
            Handle::Move => "Move",
            Handle::Rotate => "Rotate",
            Handle::Resize => "Resize",
            Handle::Delete => "Delete",
            Handle::Duplicate => "Duplicate",
        }
    }
}

/// Screen positions of the handles for one decal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    positions: [(Handle, Vec2); 5],
    radius: f32,
}

impl HandleLayout {
    /// Lay the handles out around a projected quad
    pub fn from_quad(quad: &ScreenQuad, config: &OverlayConfig) -> Self {
        let b = quad.bounds;
        Self {
            positions: [
                (Handle::Move, quad.center),
                (Handle::Rotate, Vec2::new(b.right(), b.top)),
                (Handle::Resize, Vec2::new(b.right(), b.bottom())),
                (Handle::Delete, Vec2::new(b.left, b.top)),
                (Handle::Duplicate, Vec2::new(b.left, b.bottom())),
            ],
            radius: config.handle_radius,
        }
    }

    /// Button radius in pixels
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Center of a handle button
    pub fn position(&self, handle: Handle) -> Vec2 {
        self.positions
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, p)| *p)
            .unwrap_or(Vec2::ZERO)
    }

    /// Handles with their positions
    pub fn iter(&self) -> impl Iterator<Item = (Handle, Vec2)> + '_ {
        self.positions.iter().copied()
    }

    /// Handle under the pointer, nearest first
    pub fn hit(&self, pointer: Vec2) -> Option<Handle> {
        self.positions
            .iter()
            .filter_map(|(handle, center)| {
                point_in_circle(pointer, *center, self.radius).map(|d| (*handle, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(handle, _)| handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::projector::{Projector, Viewport};
    use dk_core::DecalTransform;
    use glam::Vec3;

    fn layout() -> (HandleLayout, ScreenQuad) {
        let viewport = Viewport::new(800.0, 600.0);
        let camera = Camera::new(viewport.aspect());
        let transform = DecalTransform {
            uniform_scale: 0.5,
            ..Default::default()
        };
        let quad = Projector::new(&camera, viewport)
            .project(&transform, Vec3::ZERO)
            .unwrap();
        (HandleLayout::from_quad(&quad, &OverlayConfig::default()), quad)
    }

    #[test]
    fn test_handles_on_bounds() {
        let (layout, quad) = layout();
        assert_eq!(layout.position(Handle::Move), quad.center);
        assert_eq!(
            layout.position(Handle::Delete),
            Vec2::new(quad.bounds.left, quad.bounds.top)
        );
        assert_eq!(
            layout.position(Handle::Resize),
            Vec2::new(quad.bounds.right(), quad.bounds.bottom())
        );
    }

    #[test]
    fn test_hit_each_handle() {
        let (layout, _) = layout();
        for handle in Handle::ALL {
            let at = layout.position(handle) + Vec2::new(2.0, -2.0);
            assert_eq!(layout.hit(at), Some(handle));
        }
    }

    #[test]
    fn test_miss_between_handles() {
        let (layout, quad) = layout();
        let between = Vec2::new(quad.center.x, quad.bounds.top - 40.0);
        assert_eq!(layout.hit(between), None);
    }

    #[test]
    fn test_one_shot_handles() {
        assert!(Handle::Delete.is_one_shot());
        assert!(Handle::Duplicate.is_one_shot());
        assert!(!Handle::Move.is_one_shot());
    }
}
