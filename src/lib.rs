//! # Orrery
//!
//! An animated solar-system viewer built on wgpu and winit.
//!
//! Nine celestial bodies (the sun and eight planets), Earth's moon, Saturn's
//! ring, and an asynchronously loaded rocket model orbit on closed-form
//! ellipses. The camera cycles focus between bodies with the arrow keys and
//! can lock on to track the focused body along its orbit with `L`; otherwise
//! a mouse-driven orbit rig controls the view.
//!
//! ## Modules
//!
//! - [`app`]: window, event loop, and per-frame orchestration
//! - [`bodies`]: the static registry of celestial bodies
//! - [`camera`]: perspective camera and saved orientations
//! - [`focus`]: focus cycling and the lock-on camera
//! - [`gpu`]: wgpu device, queue, and surface management
//! - [`input`]: keyboard and mouse state tracking
//! - [`loader`]: STL geometry loading on a background thread
//! - [`mesh`]: sphere, sky-sphere, and ring primitives
//! - [`orbit`]: elliptical orbit parameterization
//! - [`orbit_camera`]: the mouse-driven orbit rig
//! - [`scene`]: the runtime body arena
//! - [`scene_pass`]: the textured, sun-lit render pass
//! - [`texture`]: texture loading with flat-color fallback

pub mod app;
pub mod bodies;
pub mod camera;
pub mod focus;
pub mod gpu;
pub mod input;
pub mod loader;
pub mod mesh;
pub mod orbit;
pub mod orbit_camera;
pub mod scene;
pub mod scene_pass;
pub mod texture;

pub use app::{AppConfig, run};
pub use bodies::{CelestialBody, ModelOrbiter, TIME_STEP};
pub use camera::{Camera, Orientation};
pub use focus::FocusController;
pub use gpu::GpuContext;
pub use input::Input;
pub use loader::{GeometryError, ModelLoad, RawGeometry};
pub use mesh::{Mesh, Transform, Vertex3d};
pub use orbit::OrbitSpec;
pub use orbit_camera::OrbitRig;
pub use scene::{BodyId, Scene, SceneBody};
pub use scene_pass::ScenePass;
pub use texture::Texture;

// Re-export the math and windowing types that appear in public signatures.
pub use glam;
pub use winit;
