use glam::Vec3;
use winit::event::MouseButton;

use crate::camera::Camera;
use crate::input::Input;

/// A camera rig that orbits around a target point.
///
/// Drives the free-flight half of the focus controller: the user rotates
/// with left mouse drag and zooms with the scroll wheel, while the target
/// point is moved onto whichever body currently has focus.
///
/// # Example
/// ```ignore
/// let mut rig = OrbitRig::new()
///     .target(Vec3::ZERO)
///     .distance(50.0);
///
/// // In frame loop:
/// rig.update(&input);
/// *camera = rig.camera();
/// ```
#[derive(Clone, Debug)]
pub struct OrbitRig {
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Distance from target.
    pub distance: f32,
    /// Horizontal angle in radians (yaw).
    pub azimuth: f32,
    /// Vertical angle in radians (pitch), clamped to avoid gimbal lock.
    pub elevation: f32,
    /// Field of view in radians.
    pub fov: f32,
    /// Mouse sensitivity for drag rotation.
    pub sensitivity: f32,
    /// Scroll zoom sensitivity.
    pub zoom_sensitivity: f32,
    /// Minimum distance from target.
    pub min_distance: f32,
    /// Maximum distance from target.
    pub max_distance: f32,
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 50.0,
            azimuth: 0.0,
            elevation: 0.3,
            fov: 75.0_f32.to_radians(),
            sensitivity: 0.005,
            zoom_sensitivity: 2.0,
            min_distance: 1.0,
            max_distance: 5000.0,
        }
    }
}

impl OrbitRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target point to orbit around.
    pub fn target(mut self, target: impl Into<Vec3>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the distance from target.
    pub fn distance(mut self, distance: f32) -> Self {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self
    }

    /// Set the field of view in degrees.
    pub fn fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self
    }

    /// Set the initial elevation (vertical angle) in radians.
    pub fn elevation(mut self, elevation: f32) -> Self {
        self.elevation = elevation.clamp(
            -std::f32::consts::FRAC_PI_2 + 0.01,
            std::f32::consts::FRAC_PI_2 - 0.01,
        );
        self
    }

    /// Move the orbit target, keeping the current viewing angles and zoom.
    ///
    /// Called when focus changes so subsequent drag/zoom revolves around the
    /// newly focused body.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Update the rig from this frame's input.
    pub fn update(&mut self, input: &Input) {
        // Rotate when left mouse button is held
        if input.mouse_down(MouseButton::Left) {
            let delta = input.mouse_delta();
            self.azimuth -= delta.x * self.sensitivity;
            self.elevation += delta.y * self.sensitivity;

            // Clamp elevation to avoid gimbal lock
            self.elevation = self.elevation.clamp(
                -std::f32::consts::FRAC_PI_2 + 0.01,
                std::f32::consts::FRAC_PI_2 - 0.01,
            );
        }

        // Zoom with scroll wheel
        let scroll = input.scroll_delta();
        if scroll.y.abs() > 0.0 {
            self.distance -= scroll.y * self.zoom_sensitivity;
            self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        }
    }

    /// Get the current camera state.
    pub fn camera(&self) -> Camera {
        // Spherical to Cartesian conversion
        let offset = Vec3::new(
            self.distance * self.elevation.cos() * self.azimuth.sin(),
            self.distance * self.elevation.sin(),
            self.distance * self.elevation.cos() * self.azimuth.cos(),
        );

        let position = self.target + offset;

        Camera {
            position,
            forward: (self.target - position).normalize_or(Vec3::NEG_Z),
            up: Vec3::Y,
            fov: self.fov,
            near: 0.1,
            far: 10000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_looks_at_target() {
        let rig = OrbitRig::new()
            .target(Vec3::new(150.0, 0.0, 0.0))
            .distance(30.0);

        let camera = rig.camera();
        let to_target = (rig.target - camera.position).normalize();
        assert!((camera.forward - to_target).length() < 1e-5);
        assert!((camera.position.distance(rig.target) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn retarget_preserves_angles_and_zoom() {
        let mut rig = OrbitRig::new().distance(40.0);
        let azimuth = rig.azimuth;
        let elevation = rig.elevation;

        rig.set_target(Vec3::new(0.0, 0.0, 600.0));

        assert_eq!(rig.azimuth, azimuth);
        assert_eq!(rig.elevation, elevation);
        assert_eq!(rig.distance, 40.0);
        assert_eq!(rig.target, Vec3::new(0.0, 0.0, 600.0));
    }
}
