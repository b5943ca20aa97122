//! Orbit camera for the garment viewport

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Orbit camera (Y up, front view looks down -Z)
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Orbit center
    pub target: Vec3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Rotation around the up axis, 0 = front
    pub yaw: f32,
    /// Elevation above the horizon
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
}

impl Camera {
    /// Create a new camera looking at the front of the garment
    pub fn new(aspect: f32) -> Self {
        Self::with_config(aspect, &CameraConfig::default())
    }

    /// Create a camera from configuration
    pub fn with_config(aspect: f32, config: &CameraConfig) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: config.fov_degrees.clamp(10.0, 120.0).to_radians(),
            aspect,
            near: config.near_plane.max(0.001),
            far: config.far_plane.max(config.near_plane + 1.0),
            yaw: 0.0,
            pitch: 0.0,
            distance: config.distance.max(0.1),
        };
        camera.update_position_from_orbit();
        camera
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch =
            (self.pitch + delta_pitch).clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
        self.update_position_from_orbit();
    }

    /// Pan the camera (move target)
    pub fn pan(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * sensitivity;
        self.target += right * (-delta_x * scale) + up * (delta_y * scale);
        self.update_position_from_orbit();
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32, sensitivity: f32) {
        self.distance = (self.distance * (1.0 - delta * sensitivity)).clamp(0.2, 50.0);
        self.update_position_from_orbit();
    }

    fn update_position_from_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Fit camera to show the given bounding sphere
    pub fn fit_all(&mut self, center: Vec3, radius: f32) {
        self.target = center;
        self.distance = (radius * 2.5).max(0.5);
        self.update_position_from_orbit();
    }

    /// Set to front view
    pub fn set_front_view(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.update_position_from_orbit();
    }

    /// Set to back view
    pub fn set_back_view(&mut self) {
        self.yaw = std::f32::consts::PI;
        self.pitch = 0.0;
        self.update_position_from_orbit();
    }

    /// Set to side view
    pub fn set_side_view(&mut self) {
        self.yaw = 90.0_f32.to_radians();
        self.pitch = 0.0;
        self.update_position_from_orbit();
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Enable switch for camera orbit input
///
/// Cloned handles share one flag. A decal drag disables orbiting so the
/// camera and the drag do not both consume the pointer.
#[derive(Debug, Clone)]
pub struct OrbitGate(Arc<AtomicBool>);

impl OrbitGate {
    /// New gate, enabled
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Whether orbit input is currently accepted
    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Enable or disable orbiting for every holder of the gate
    pub fn set_enabled(&self, enabled: bool) {
        if self.0.swap(enabled, Ordering::AcqRel) != enabled {
            tracing::trace!("Orbit {}", if enabled { "enabled" } else { "disabled" });
        }
    }
}

impl Default for OrbitGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_front_view_on_positive_z() {
        let camera = Camera::new(1.0);
        assert_relative_eq!(camera.position.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(camera.position.y, 0.0, epsilon = 1e-6);
        assert!(camera.position.z > 0.0);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera::new(1.0);
        camera.orbit(0.0, 10.0);
        assert!(camera.pitch <= 89.0_f32.to_radians());
        assert_relative_eq!(
            (camera.position - camera.target).length(),
            camera.distance,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_back_view_behind_target() {
        let mut camera = Camera::new(1.0);
        camera.set_back_view();
        assert!(camera.position.z < 0.0);
    }

    #[test]
    fn test_orbit_gate_shared() {
        let gate = OrbitGate::new();
        let other = gate.clone();
        assert!(other.is_enabled());
        gate.set_enabled(false);
        assert!(!other.is_enabled());
    }
}
