use glam::{Mat4, Vec3};

/// A camera orientation: forward and up vectors, both unit length.
///
/// Saved and restored by the focus controller when lock-on mode toggles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub forward: Vec3,
    pub up: Vec3,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }
}

/// A simple perspective camera for 3D scenes.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// Field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 50.0),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 10000.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-orient the camera to face `target`, recomputing up from world up.
    pub fn look_at(&mut self, target: Vec3) {
        self.forward = (target - self.position).normalize_or(Vec3::NEG_Z);
        let right = self.forward.cross(Vec3::Y).normalize_or(Vec3::X);
        self.up = right.cross(self.forward).normalize_or(Vec3::Y);
    }

    /// Current orientation (forward/up pair).
    pub fn orientation(&self) -> Orientation {
        Orientation {
            forward: self.forward,
            up: self.up,
        }
    }

    /// Restore a previously saved orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.forward = orientation.forward;
        self.up = orientation.up;
    }

    /// World-to-camera transformation.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    /// Camera-to-clip transformation for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_points_forward_at_target() {
        let mut camera = Camera::new();
        camera.position = Vec3::new(130.0, 0.0, 0.0);
        camera.look_at(Vec3::new(100.0, 0.0, 0.0));

        assert!((camera.forward - Vec3::NEG_X).length() < 1e-6);
        assert!((camera.up - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn orientation_round_trips() {
        let mut camera = Camera::new();
        camera.position = Vec3::new(5.0, 3.0, -2.0);
        camera.look_at(Vec3::ZERO);
        let saved = camera.orientation();

        camera.look_at(Vec3::new(100.0, 0.0, 0.0));
        camera.set_orientation(saved);

        assert_eq!(camera.orientation(), saved);
    }
}
