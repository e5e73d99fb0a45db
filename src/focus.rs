//! Focus cycling and the lock-on camera.
//!
//! [`FocusController`] owns the current focus index into the scene's
//! focusable list and the lock-on flag. Arrow keys advance the index in
//! either direction, wrapping modulo the focusable count; `L` toggles
//! lock-on.
//!
//! In lock-on mode the camera snaps to a fixed offset behind the focused
//! body along its own forward direction and tracks it every frame. In free
//! mode the orbit rig keeps control and is simply retargeted at the focused
//! body.

use crate::camera::{Camera, Orientation};
use crate::orbit_camera::OrbitRig;
use crate::scene::{Scene, SceneBody};

/// Lock-on distance for bodies with no radius and no override.
pub const DEFAULT_FOCUS_DISTANCE: f32 = 30.0;

/// Bodies with a radius are framed at this multiple of it, so small bodies
/// are viewed closely and large ones from farther away.
pub const RADIUS_FRAMING_FACTOR: f32 = 4.0;

/// Camera focus state: which body is focused and how the camera follows it.
pub struct FocusController {
    index: usize,
    lock_on: bool,
    saved_orientation: Orientation,
}

impl Default for FocusController {
    fn default() -> Self {
        Self {
            index: 0,
            lock_on: false,
            saved_orientation: Orientation::default(),
        }
    }
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the focused entry in the scene's focusable list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn lock_on(&self) -> bool {
        self.lock_on
    }

    /// Step focus forward (`+1`) or backward (`-1`), wrapping modulo the
    /// focusable count, then reposition the camera.
    ///
    /// The focusable list must be non-empty.
    pub fn advance(&mut self, step: i32, scene: &Scene, camera: &mut Camera, rig: &mut OrbitRig) {
        let count = scene.focusable().len();
        debug_assert!(count > 0, "focus cycling requires a focusable body");
        self.index = (self.index as i64 + step as i64).rem_euclid(count as i64) as usize;
        self.update_camera(scene, camera, rig);
    }

    /// Flip lock-on mode, then reposition the camera.
    pub fn toggle_lock_on(&mut self, scene: &Scene, camera: &mut Camera, rig: &mut OrbitRig) {
        self.lock_on = !self.lock_on;
        self.update_camera(scene, camera, rig);
    }

    /// Re-aim the camera at the focused body.
    ///
    /// Lock-on: place the camera behind the body along its current forward
    /// direction, look at it, and remember the resulting orientation so that
    /// leaving lock-on later restores a sensible view. Free mode: restore
    /// the remembered orientation and hand the body to the orbit rig as its
    /// new target.
    ///
    /// Called once per frame while lock-on is active so the camera tracks
    /// the body along its orbit.
    pub fn update_camera(&mut self, scene: &Scene, camera: &mut Camera, rig: &mut OrbitRig) {
        let id = scene.focusable()[self.index];
        let target = scene.world_position(id);

        if self.lock_on {
            let distance = focus_distance(scene.body(id));
            camera.position = target - camera.forward * distance;
            camera.look_at(target);
            self.saved_orientation = camera.orientation();
        } else {
            camera.set_orientation(self.saved_orientation);
            rig.set_target(target);
        }
    }
}

/// Lock-on framing distance for a body: an explicit override wins, then
/// radius-proportional framing, then the fixed default.
pub fn focus_distance(body: &SceneBody) -> f32 {
    if let Some(distance) = body.focus_distance_override {
        distance
    } else if body.radius > 0.0 {
        RADIUS_FRAMING_FACTOR * body.radius
    } else {
        DEFAULT_FOCUS_DISTANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::OrbitSpec;
    use crate::scene::SceneBody;
    use glam::Vec3;

    fn eleven_body_scene() -> Scene {
        // 9 bodies + 1 moon + 1 activated orbiter = 11 focusable entries.
        let mut scene = Scene::new();
        let sun = scene.add_body(SceneBody::new("Sun", 30.0));
        let mut earth = sun;
        for (name, a, b) in [
            ("Mercury", 60.0, 58.0),
            ("Venus", 105.0, 103.0),
            ("Earth", 150.0, 148.0),
            ("Mars", 240.0, 238.0),
            ("Jupiter", 400.0, 398.0),
            ("Saturn", 600.0, 598.0),
            ("Uranus", 800.0, 798.0),
            ("Neptune", 1000.0, 998.0),
        ] {
            let id = scene.add_body(SceneBody::new(name, 1.0).orbit(OrbitSpec::new(a, b)));
            if name == "Earth" {
                earth = id;
            }
        }
        scene.add_body(
            SceneBody::new("Moon", 0.6)
                .parent(earth)
                .orbit(OrbitSpec::new(12.0, 12.0)),
        );
        let rocket = scene.add_pending_body(
            SceneBody::new("Rocket", 0.0)
                .parent(earth)
                .orbit(OrbitSpec::new(8.0, 8.0))
                .focus_distance(4.0),
        );
        scene.activate(rocket);
        scene.advance(0.0);
        scene
    }

    fn controller_parts() -> (Scene, Camera, OrbitRig) {
        (eleven_body_scene(), Camera::new(), OrbitRig::new())
    }

    #[test]
    fn advance_forward_then_backward_is_identity() {
        let (scene, mut camera, mut rig) = controller_parts();
        for start in 0..scene.focusable().len() {
            let mut focus = FocusController::new();
            for _ in 0..start {
                focus.advance(1, &scene, &mut camera, &mut rig);
            }
            assert_eq!(focus.index(), start);

            focus.advance(1, &scene, &mut camera, &mut rig);
            focus.advance(-1, &scene, &mut camera, &mut rig);
            assert_eq!(focus.index(), start);
        }
    }

    #[test]
    fn advancing_full_cycle_returns_to_start() {
        let (scene, mut camera, mut rig) = controller_parts();
        let mut focus = FocusController::new();
        let count = scene.focusable().len();

        for _ in 0..count {
            focus.advance(1, &scene, &mut camera, &mut rig);
        }
        assert_eq!(focus.index(), 0);
    }

    #[test]
    fn index_ten_wraps_to_zero_with_eleven_focusable() {
        let (scene, mut camera, mut rig) = controller_parts();
        assert_eq!(scene.focusable().len(), 11);

        let mut focus = FocusController::new();
        for _ in 0..10 {
            focus.advance(1, &scene, &mut camera, &mut rig);
        }
        assert_eq!(focus.index(), 10);

        focus.advance(1, &scene, &mut camera, &mut rig);
        assert_eq!(focus.index(), 0);
    }

    #[test]
    fn backward_from_zero_wraps_to_last() {
        let (scene, mut camera, mut rig) = controller_parts();
        let mut focus = FocusController::new();

        focus.advance(-1, &scene, &mut camera, &mut rig);
        assert_eq!(focus.index(), scene.focusable().len() - 1);
    }

    #[test]
    fn lock_on_places_camera_behind_target_along_forward() {
        // Focused body at (100, 0, 0), camera forward (-1, 0, 0),
        // distance 30: the camera must land at (130, 0, 0) looking at the
        // body.
        let mut scene = Scene::new();
        let mut body = SceneBody::new("Probe", 0.0).focus_distance(30.0);
        body.local_position = Vec3::new(100.0, 0.0, 0.0);
        scene.add_body(body);

        let mut camera = Camera::new();
        camera.position = Vec3::new(500.0, 0.0, 0.0);
        camera.forward = Vec3::NEG_X;
        camera.up = Vec3::Y;

        let mut rig = OrbitRig::new();
        let mut focus = FocusController::new();
        focus.toggle_lock_on(&scene, &mut camera, &mut rig);

        assert!((camera.position - Vec3::new(130.0, 0.0, 0.0)).length() < 1e-4);
        assert!((camera.forward - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn double_toggle_restores_mode_and_orientation() {
        let (scene, mut camera, mut rig) = controller_parts();
        camera.position = Vec3::new(0.0, 20.0, 300.0);
        camera.look_at(Vec3::ZERO);
        let before = camera.orientation();

        let mut focus = FocusController::new();
        // First update in free mode seeds the saved orientation.
        focus.saved_orientation = before;

        focus.toggle_lock_on(&scene, &mut camera, &mut rig);
        assert!(focus.lock_on());

        focus.toggle_lock_on(&scene, &mut camera, &mut rig);
        assert!(!focus.lock_on());

        let after = camera.orientation();
        assert!((after.forward - before.forward).length() < 1e-4);
        assert!((after.up - before.up).length() < 1e-4);
    }

    #[test]
    fn focus_distance_policy() {
        let rocket = SceneBody::new("Rocket", 0.0).focus_distance(4.0);
        assert_eq!(focus_distance(&rocket), 4.0);

        let jupiter = SceneBody::new("Jupiter", 15.0);
        assert_eq!(focus_distance(&jupiter), 60.0);

        let anonymous = SceneBody::new("Marker", 0.0);
        assert_eq!(focus_distance(&anonymous), DEFAULT_FOCUS_DISTANCE);
    }

    #[test]
    fn free_mode_retargets_rig_at_focused_body() {
        let (mut scene, mut camera, mut rig) = controller_parts();
        scene.advance(2.5);

        let mut focus = FocusController::new();
        focus.advance(1, &scene, &mut camera, &mut rig);

        let focused = scene.focusable()[1];
        assert_eq!(rig.target, scene.world_position(focused));
    }
}
