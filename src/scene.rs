//! The runtime body arena.
//!
//! [`Scene`] owns every celestial body as a flat arena indexed by typed
//! [`BodyId`] handles. Parent/child relationships are explicit indices, and
//! a body's world position is composed by walking its parent chain. There
//! is no hidden scene-graph hierarchy and no string-keyed lookup.
//!
//! Bodies that arrive late (the rocket, loaded off-thread) are inserted as
//! pending at startup so their arena index is deterministic; they join the
//! focusable list only when activated.

use glam::Vec3;

use crate::orbit::OrbitSpec;

/// Typed handle to a body in the scene arena, assigned at insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(usize);

impl BodyId {
    /// Arena index, for pairing bodies with render-side resources.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One body in the scene: simulation state only, no GPU resources.
pub struct SceneBody {
    pub name: String,
    pub radius: f32,
    pub parent: Option<BodyId>,
    pub orbit: Option<OrbitSpec>,
    /// Position relative to the parent's frame (world frame for roots).
    pub local_position: Vec3,
    /// Lock-on camera distance override; bodies without one are framed by
    /// radius.
    pub focus_distance_override: Option<f32>,
    /// Pending bodies are invisible and unfocusable until activated.
    pub active: bool,
}

impl SceneBody {
    pub fn new(name: impl Into<String>, radius: f32) -> Self {
        Self {
            name: name.into(),
            radius,
            parent: None,
            orbit: None,
            local_position: Vec3::ZERO,
            focus_distance_override: None,
            active: true,
        }
    }

    pub fn parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn orbit(mut self, orbit: OrbitSpec) -> Self {
        self.orbit = Some(orbit);
        self
    }

    pub fn focus_distance(mut self, distance: f32) -> Self {
        self.focus_distance_override = Some(distance);
        self
    }
}

/// Arena of bodies plus the ordered focusable list.
///
/// The focusable list is append-only and non-empty once setup completes;
/// the focus controller's index arithmetic relies on that.
#[derive(Default)]
pub struct Scene {
    bodies: Vec<SceneBody>,
    focusable: Vec<BodyId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body and register it as focusable, in creation order.
    pub fn add_body(&mut self, body: SceneBody) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        self.focusable.push(id);
        id
    }

    /// Insert a body whose geometry has not arrived yet.
    ///
    /// The arena slot is reserved immediately so indices stay deterministic
    /// across runs; the body becomes visible and focusable only via
    /// [`Scene::activate`].
    pub fn add_pending_body(&mut self, mut body: SceneBody) -> BodyId {
        body.active = false;
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Activate a pending body, appending it to the focusable list.
    pub fn activate(&mut self, id: BodyId) {
        let body = &mut self.bodies[id.0];
        if !body.active {
            body.active = true;
            self.focusable.push(id);
        }
    }

    pub fn body(&self, id: BodyId) -> &SceneBody {
        &self.bodies[id.0]
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &SceneBody)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    /// Focusable bodies in registration order.
    pub fn focusable(&self) -> &[BodyId] {
        &self.focusable
    }

    /// Recompute every orbiting body's local position for simulation time
    /// `t`. Bodies without an orbit keep their position.
    pub fn advance(&mut self, t: f32) {
        for body in &mut self.bodies {
            if let Some(orbit) = body.orbit {
                body.local_position = orbit.position_at(t);
            }
        }
    }

    /// World position of a body, composed up its parent chain.
    pub fn world_position(&self, id: BodyId) -> Vec3 {
        let mut position = Vec3::ZERO;
        let mut current = Some(id);
        while let Some(BodyId(i)) = current {
            let body = &self.bodies[i];
            position += body.local_position;
            current = body.parent;
        }
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level_scene() -> (Scene, BodyId, BodyId, BodyId) {
        let mut scene = Scene::new();
        let sun = scene.add_body(SceneBody::new("Sun", 30.0));
        let earth =
            scene.add_body(SceneBody::new("Earth", 3.0).orbit(OrbitSpec::new(150.0, 148.0)));
        let moon = scene.add_body(
            SceneBody::new("Moon", 0.6)
                .parent(earth)
                .orbit(OrbitSpec::new(12.0, 12.0)),
        );
        let _ = sun;
        (scene, sun, earth, moon)
    }

    #[test]
    fn world_position_composes_parent_chain() {
        let (mut scene, _, earth, moon) = two_level_scene();
        scene.advance(0.0);

        // At t = 0 every orbit sits at (a, 0, 0) relative to its parent.
        assert_eq!(scene.world_position(earth), Vec3::new(150.0, 0.0, 0.0));
        assert_eq!(scene.world_position(moon), Vec3::new(162.0, 0.0, 0.0));
    }

    #[test]
    fn advance_moves_orbiters_and_fixes_roots() {
        let (mut scene, sun, earth, _) = two_level_scene();
        scene.advance(3.7);

        assert_eq!(scene.world_position(sun), Vec3::ZERO);
        let orbit = scene.body(earth).orbit.unwrap();
        assert_eq!(scene.world_position(earth), orbit.position_at(3.7));
    }

    #[test]
    fn focusable_follows_creation_order() {
        let (scene, sun, earth, moon) = two_level_scene();
        assert_eq!(scene.focusable(), &[sun, earth, moon]);
    }

    #[test]
    fn pending_body_reserves_slot_without_focus_entry() {
        let (mut scene, _, earth, _) = two_level_scene();
        let rocket = scene.add_pending_body(
            SceneBody::new("Rocket", 0.0)
                .parent(earth)
                .orbit(OrbitSpec::new(8.0, 8.0))
                .focus_distance(4.0),
        );

        assert_eq!(rocket.index(), 3);
        assert_eq!(scene.focusable().len(), 3);
        assert!(!scene.body(rocket).active);

        scene.activate(rocket);
        assert_eq!(scene.focusable().len(), 4);
        assert_eq!(*scene.focusable().last().unwrap(), rocket);

        // Activating twice must not duplicate the focus entry.
        scene.activate(rocket);
        assert_eq!(scene.focusable().len(), 4);
    }
}
