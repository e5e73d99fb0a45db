//! The static registry of celestial bodies.
//!
//! Pure template data: radii, colors, texture paths, and orbital parameters
//! for the sun, the eight planets, Earth's moon, and the asynchronously
//! loaded rocket. Radii and orbit axes are display units, not kilometers.

use crate::orbit::OrbitSpec;

/// Simulation time advanced per rendered frame.
///
/// Animation speed is deliberately tied to frame rate rather than wall-clock
/// time.
pub const TIME_STEP: f32 = 0.01;

/// A moon orbiting a planet, positioned relative to the parent's frame.
pub struct Satellite {
    pub name: &'static str,
    pub radius: f32,
    pub color: [u8; 3],
    pub texture: &'static str,
    pub orbit: OrbitSpec,
}

/// A planetary ring, drawn as a flat annulus around its planet.
pub struct RingSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: [u8; 3],
}

/// Template data for one body in the registry.
///
/// `color` doubles as the render fallback when the texture file is missing.
/// A body without an orbit stays fixed at the origin.
pub struct CelestialBody {
    pub name: &'static str,
    pub radius: f32,
    pub color: [u8; 3],
    pub texture: &'static str,
    pub orbit: Option<OrbitSpec>,
    pub satellites: Vec<Satellite>,
    pub ring: Option<RingSpec>,
}

/// A body whose geometry comes from a 3D model file loaded off-thread.
pub struct ModelOrbiter {
    pub name: &'static str,
    pub model_path: &'static str,
    /// Visual size of the loaded model after normalization.
    pub scale: f32,
    pub color: [u8; 3],
    pub orbit: OrbitSpec,
    /// Camera distance when this body has lock-on focus. Small orbiters get
    /// a much closer framing than the radius-based default.
    pub focus_distance: f32,
}

/// The full body table, sun first, in focus-cycle order.
pub fn solar_system() -> Vec<CelestialBody> {
    vec![
        CelestialBody {
            name: "Sun",
            radius: 30.0,
            color: [0xff, 0xff, 0x00],
            texture: "assets/textures/sun.jpg",
            orbit: None,
            satellites: Vec::new(),
            ring: None,
        },
        CelestialBody {
            name: "Mercury",
            radius: 0.3,
            color: [0xc0, 0xc0, 0xc0],
            texture: "assets/textures/mercury.jpg",
            orbit: Some(OrbitSpec::new(60.0, 58.0)),
            satellites: Vec::new(),
            ring: None,
        },
        CelestialBody {
            name: "Venus",
            radius: 0.7,
            color: [0xff, 0xa5, 0x00],
            texture: "assets/textures/venus.jpg",
            orbit: Some(OrbitSpec::new(105.0, 103.0)),
            satellites: Vec::new(),
            ring: None,
        },
        CelestialBody {
            name: "Earth",
            radius: 3.0,
            color: [0x00, 0x00, 0xff],
            texture: "assets/textures/earth.jpg",
            orbit: Some(OrbitSpec::new(150.0, 148.0)),
            satellites: vec![Satellite {
                name: "Moon",
                radius: 0.6,
                color: [0xc0, 0xc0, 0xc0],
                texture: "assets/textures/moon.jpg",
                orbit: OrbitSpec::new(12.0, 12.0),
            }],
            ring: None,
        },
        CelestialBody {
            name: "Mars",
            radius: 1.5,
            color: [0xff, 0x00, 0x00],
            texture: "assets/textures/mars.jpg",
            orbit: Some(OrbitSpec::new(240.0, 238.0)),
            satellites: Vec::new(),
            ring: None,
        },
        CelestialBody {
            name: "Jupiter",
            radius: 15.0,
            color: [0xff, 0x99, 0x00],
            texture: "assets/textures/jupiter.jpg",
            orbit: Some(OrbitSpec::new(400.0, 398.0)),
            satellites: Vec::new(),
            ring: None,
        },
        CelestialBody {
            name: "Saturn",
            radius: 12.0,
            color: [0xff, 0xcc, 0x00],
            texture: "assets/textures/saturn.jpg",
            orbit: Some(OrbitSpec::new(600.0, 598.0)),
            satellites: Vec::new(),
            ring: Some(RingSpec {
                inner_radius: 14.0,
                outer_radius: 22.0,
                color: [0xaa, 0xaa, 0xaa],
            }),
        },
        CelestialBody {
            name: "Uranus",
            radius: 6.0,
            color: [0x00, 0xcc, 0xff],
            texture: "assets/textures/uranus.jpg",
            orbit: Some(OrbitSpec::new(800.0, 798.0)),
            satellites: Vec::new(),
            ring: None,
        },
        CelestialBody {
            name: "Neptune",
            radius: 6.0,
            color: [0x00, 0x00, 0xff],
            texture: "assets/textures/neptune.jpg",
            orbit: Some(OrbitSpec::new(1000.0, 998.0)),
            satellites: Vec::new(),
            ring: None,
        },
    ]
}

/// The rocket: a small Earth orbiter loaded asynchronously from an STL file.
pub fn rocket() -> ModelOrbiter {
    ModelOrbiter {
        name: "Rocket",
        model_path: "assets/models/rocket.stl",
        scale: 1.0,
        color: [0xdd, 0xdd, 0xdd],
        orbit: OrbitSpec::new(8.0, 8.0),
        focus_distance: 4.0,
    }
}

/// The name of the body the rocket orbits.
pub const ROCKET_PARENT: &str = "Earth";

/// Star-field texture wrapped around the sky sphere.
pub const SKY_TEXTURE: &str = "assets/textures/stars.jpg";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_matches_expected_shape() {
        let bodies = solar_system();
        assert_eq!(bodies.len(), 9);
        assert_eq!(bodies[0].name, "Sun");
        assert!(bodies[0].orbit.is_none());
        assert!(bodies.iter().skip(1).all(|b| b.orbit.is_some()));

        let satellites: usize = bodies.iter().map(|b| b.satellites.len()).sum();
        assert_eq!(satellites, 1);
    }

    #[test]
    fn all_orbit_axes_are_positive() {
        for body in solar_system() {
            if let Some(orbit) = body.orbit {
                assert!(orbit.semi_major_axis > 0.0);
                assert!(orbit.semi_minor_axis > 0.0);
            }
            for sat in &body.satellites {
                assert!(sat.orbit.semi_major_axis > 0.0);
            }
        }
        assert!(rocket().orbit.semi_major_axis > 0.0);
    }
}
