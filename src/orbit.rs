//! Closed-form elliptical orbit parameterization.
//!
//! Every orbiting body moves on an axis-aligned ellipse in the horizontal
//! plane, centered on its parent's origin:
//!
//! ```text
//! x = a * cos(t * s)
//! y = 0
//! z = b * sin(t * s)
//! ```
//!
//! where `s = base_speed / sqrt(a)`: smaller orbits move faster, a
//! qualitative nod to Kepler's third law rather than a physical model.

use glam::Vec3;

/// Angular speed scale shared by every orbit.
pub const BASE_SPEED: f32 = 1.0;

/// An elliptical orbit around a parent body's origin.
///
/// `speed` is derived once at construction and never recomputed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSpec {
    /// Ellipse half-width along the X axis. Must be positive: it sits under
    /// a square root in the speed law.
    pub semi_major_axis: f32,
    /// Ellipse half-depth along the Z axis.
    pub semi_minor_axis: f32,
    /// Angular speed in radians per simulation-time unit.
    pub speed: f32,
}

impl OrbitSpec {
    /// Build an orbit, deriving its angular speed from [`BASE_SPEED`].
    pub fn new(semi_major_axis: f32, semi_minor_axis: f32) -> Self {
        debug_assert!(semi_major_axis > 0.0, "semi-major axis must be positive");
        Self {
            semi_major_axis,
            semi_minor_axis,
            speed: orbit_speed(BASE_SPEED, semi_major_axis),
        }
    }

    /// Position on the ellipse at simulation time `t`, relative to the
    /// parent's origin. Valid for any `t`, including zero and negative
    /// values.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let angle = t * self.speed;
        Vec3::new(
            self.semi_major_axis * angle.cos(),
            0.0,
            self.semi_minor_axis * angle.sin(),
        )
    }
}

/// The speed law: `base_speed / sqrt(semi_major_axis)`.
///
/// Monotonically decreasing in the semi-major axis for positive base speed.
pub fn orbit_speed(base_speed: f32, semi_major_axis: f32) -> f32 {
    base_speed / semi_major_axis.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_matches_closed_form() {
        let orbit = OrbitSpec::new(240.0, 238.0);
        for &t in &[-7.5f32, -1.0, 0.0, 0.5, 3.0, 100.0] {
            let expected = Vec3::new(
                240.0 * (t * orbit.speed).cos(),
                0.0,
                238.0 * (t * orbit.speed).sin(),
            );
            assert_eq!(orbit.position_at(t), expected);
        }
    }

    #[test]
    fn earth_starts_at_perihelion_axis() {
        let earth = OrbitSpec::new(150.0, 148.0);
        assert_eq!(earth.position_at(0.0), Vec3::new(150.0, 0.0, 0.0));
    }

    #[test]
    fn earth_quarter_orbit_reaches_minor_axis() {
        let earth = OrbitSpec::new(150.0, 148.0);
        let quarter = std::f32::consts::FRAC_PI_2 / earth.speed;
        let pos = earth.position_at(quarter);

        assert!(pos.x.abs() < 1e-3);
        assert_eq!(pos.y, 0.0);
        assert!((pos.z - 148.0).abs() < 1e-3);
    }

    #[test]
    fn speed_decreases_with_semi_major_axis() {
        let axes = [60.0f32, 105.0, 150.0, 240.0, 400.0, 600.0, 800.0, 1000.0];
        for pair in axes.windows(2) {
            assert!(orbit_speed(BASE_SPEED, pair[0]) > orbit_speed(BASE_SPEED, pair[1]));
        }
    }

    #[test]
    fn speed_is_precomputed_from_base_speed() {
        let orbit = OrbitSpec::new(60.0, 58.0);
        assert_eq!(orbit.speed, 1.0 / 60.0f32.sqrt());
    }
}
