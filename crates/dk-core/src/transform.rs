//! Decal transform and partial updates

use glam::{EulerRot, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_ASPECT_RATIO, MIN_UNIFORM_SCALE};
use crate::region::RegionPlacement;

/// Placement of a decal quad on its region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecalTransform {
    /// Offset from the mesh origin
    pub position: Vec3,
    /// Euler angles, intrinsic XYZ order, radians
    pub rotation: Vec3,
    /// Height of the quad; width is `uniform_scale * aspect_ratio`
    pub uniform_scale: f32,
    /// Width / height of the active texture
    pub aspect_ratio: f32,
}

impl Default for DecalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            uniform_scale: 0.15,
            aspect_ratio: 1.0,
        }
    }
}

impl DecalTransform {
    /// Transform at a region's default placement
    pub fn from_placement(placement: &RegionPlacement) -> Self {
        Self {
            position: placement.position,
            rotation: placement.rotation,
            uniform_scale: placement.scale.max(MIN_UNIFORM_SCALE),
            aspect_ratio: 1.0,
        }
    }

    /// Rotation as a quaternion
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Half width and half height of the quad
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(
            self.uniform_scale * self.aspect_ratio * 0.5,
            self.uniform_scale * 0.5,
        )
    }

    /// Merge a partial update; fields left `None` keep their value
    pub fn apply(&mut self, update: &TransformUpdate) {
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(rotation) = update.rotation {
            self.rotation = rotation;
        }
        if let Some(scale) = update.uniform_scale {
            self.uniform_scale = scale;
        }
        if let Some(aspect) = update.aspect_ratio {
            self.aspect_ratio = aspect;
        }
        self.enforce_invariants();
    }

    fn enforce_invariants(&mut self) {
        if !self.uniform_scale.is_finite() || self.uniform_scale < MIN_UNIFORM_SCALE {
            self.uniform_scale = MIN_UNIFORM_SCALE;
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio < MIN_ASPECT_RATIO {
            self.aspect_ratio = MIN_ASPECT_RATIO;
        }
    }
}

/// Partial transform update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformUpdate {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub uniform_scale: Option<f32>,
    pub aspect_ratio: Option<f32>,
}

impl TransformUpdate {
    pub fn position(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn rotation(rotation: Vec3) -> Self {
        Self {
            rotation: Some(rotation),
            ..Default::default()
        }
    }

    pub fn uniform_scale(scale: f32) -> Self {
        Self {
            uniform_scale: Some(scale),
            ..Default::default()
        }
    }

    pub fn aspect_ratio(aspect: f32) -> Self {
        Self {
            aspect_ratio: Some(aspect),
            ..Default::default()
        }
    }

    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.rotation.is_none()
            && self.uniform_scale.is_none()
            && self.aspect_ratio.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_apply_keeps_unspecified_fields() {
        let mut transform = DecalTransform {
            position: Vec3::new(0.1, 0.2, 0.3),
            rotation: Vec3::new(0.0, 1.0, 0.5),
            uniform_scale: 0.4,
            aspect_ratio: 2.0,
        };
        transform.apply(&TransformUpdate::uniform_scale(0.8));

        assert_eq!(transform.position, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(transform.rotation, Vec3::new(0.0, 1.0, 0.5));
        assert_relative_eq!(transform.uniform_scale, 0.8);
        assert_relative_eq!(transform.aspect_ratio, 2.0);
    }

    #[test]
    fn test_apply_clamps_scale_and_aspect() {
        let mut transform = DecalTransform::default();
        transform.apply(&TransformUpdate {
            uniform_scale: Some(-3.0),
            aspect_ratio: Some(0.0),
            ..Default::default()
        });
        assert_relative_eq!(transform.uniform_scale, MIN_UNIFORM_SCALE);
        assert!(transform.aspect_ratio > 0.0);

        transform.apply(&TransformUpdate::uniform_scale(f32::NAN));
        assert_relative_eq!(transform.uniform_scale, MIN_UNIFORM_SCALE);
    }

    #[test]
    fn test_half_extents_follow_aspect() {
        let transform = DecalTransform {
            uniform_scale: 1.0,
            aspect_ratio: 2.0,
            ..Default::default()
        };
        let half = transform.half_extents();
        assert_relative_eq!(half.x, 1.0);
        assert_relative_eq!(half.y, 0.5);
    }
}
