//! Window, event loop, and per-frame orchestration.
//!
//! The app follows a Pending -> Running state machine: winit hands us a
//! window in `resumed`, we bring up the GPU and build the scene, then every
//! `RedrawRequested` advances simulation time by a fixed step, applies
//! input, and renders.

use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowAttributes, WindowId};

use glam::Vec3;

use crate::bodies::{self, TIME_STEP};
use crate::camera::Camera;
use crate::focus::FocusController;
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::loader::ModelLoad;
use crate::mesh::{Mesh, Transform};
use crate::orbit_camera::OrbitRig;
use crate::scene::{BodyId, Scene, SceneBody};
use crate::scene_pass::{DrawCall, ModelBinding, ScenePass};
use crate::texture::Texture;

/// Configuration for the app window.
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Run the solar-system viewer until the window closes.
pub fn run(config: AppConfig) {
    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = OrreryApp::Pending { config };
    event_loop.run_app(&mut app).unwrap();
}

/// One renderable: a mesh/texture pair following a scene body.
///
/// `body` of `None` means a fixture pinned at the world origin (the sky
/// sphere). Several visuals may follow the same body; Saturn's ring shares
/// Saturn's position.
struct Visual {
    body: Option<BodyId>,
    mesh: usize,
    texture: usize,
    binding: ModelBinding,
    lit: bool,
}

/// The rocket's reserved scene slot while its model loads off-thread.
struct RocketSlot {
    id: BodyId,
    scale: f32,
    color: [u8; 3],
    name: &'static str,
    load: Option<ModelLoad>,
}

enum OrreryApp {
    Pending {
        config: AppConfig,
    },
    Running {
        window: Arc<Window>,
        gpu: GpuContext,
        pass: ScenePass,
        camera: Camera,
        rig: OrbitRig,
        input: Input,
        focus: FocusController,
        scene: Scene,
        meshes: Vec<Mesh>,
        textures: Vec<wgpu::BindGroup>,
        visuals: Vec<Visual>,
        rocket: RocketSlot,
        time: f32,
    },
}

impl ApplicationHandler for OrreryApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let OrreryApp::Pending { config } = self {
            let window_attrs = WindowAttributes::default()
                .with_title(&config.title)
                .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

            let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
            let gpu = GpuContext::new(window.clone());
            let pass = ScenePass::new(&gpu);

            let mut builder = SceneBuilder::new(&gpu, &pass);
            let rocket = builder.build();
            let SceneBuilder {
                scene,
                meshes,
                textures,
                visuals,
                ..
            } = builder;

            let rig = OrbitRig::new().target(Vec3::ZERO).distance(50.0);
            let camera = rig.camera();

            *self = OrreryApp::Running {
                window,
                gpu,
                pass,
                camera,
                rig,
                input: Input::new(),
                focus: FocusController::new(),
                scene,
                meshes,
                textures,
                visuals,
                rocket,
                time: 0.0,
            };
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let OrreryApp::Running {
            window,
            gpu,
            pass,
            camera,
            rig,
            input,
            focus,
            scene,
            meshes,
            textures,
            visuals,
            rocket,
            time,
        } = self
        else {
            return;
        };

        input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                // Fixed step per rendered frame: animation speed tracks the
                // display refresh rate.
                *time += TIME_STEP;
                scene.advance(*time);

                poll_rocket(gpu, pass, scene, meshes, textures, visuals, rocket);

                if input.key_pressed(KeyCode::ArrowRight) {
                    focus.advance(1, scene, camera, rig);
                }
                if input.key_pressed(KeyCode::ArrowLeft) {
                    focus.advance(-1, scene, camera, rig);
                }
                if input.key_pressed(KeyCode::KeyL) {
                    focus.toggle_lock_on(scene, camera, rig);
                }

                rig.update(input);
                if focus.lock_on() {
                    focus.update_camera(scene, camera, rig);
                } else {
                    *camera = rig.camera();
                }

                let mut calls = Vec::with_capacity(visuals.len());
                for visual in visuals.iter() {
                    if let Some(id) = visual.body {
                        if !scene.body(id).active {
                            continue;
                        }
                    }
                    let position = visual
                        .body
                        .map(|id| scene.world_position(id))
                        .unwrap_or(Vec3::ZERO);

                    calls.push(DrawCall {
                        mesh: &meshes[visual.mesh],
                        binding: &visual.binding,
                        texture: &textures[visual.texture],
                        transform: Transform::from_position(position),
                        lit: visual.lit,
                    });
                }

                pass.ensure_depth_size(gpu);

                let output = gpu.surface.get_current_texture().unwrap();
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                pass.render(gpu, &view, camera, *time, &calls);
                output.present();

                input.begin_frame();
                window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Builds the scene arena and its render-side resources from the body
/// registry.
struct SceneBuilder<'a> {
    gpu: &'a GpuContext,
    pass: &'a ScenePass,
    scene: Scene,
    meshes: Vec<Mesh>,
    textures: Vec<wgpu::BindGroup>,
    visuals: Vec<Visual>,
}

impl<'a> SceneBuilder<'a> {
    fn new(gpu: &'a GpuContext, pass: &'a ScenePass) -> Self {
        Self {
            gpu,
            pass,
            scene: Scene::new(),
            meshes: Vec::new(),
            textures: Vec::new(),
            visuals: Vec::new(),
        }
    }

    fn build(&mut self) -> RocketSlot {
        // Star-field sky: an inward-facing sphere around everything.
        let sky_mesh = self.add_mesh(Mesh::sky_sphere(self.gpu, 2000.0, 32, 32));
        let sky_texture = self.add_texture(bodies::SKY_TEXTURE, [5, 5, 10], "Sky");
        self.visuals.push(Visual {
            body: None,
            mesh: sky_mesh,
            texture: sky_texture,
            binding: self.pass.create_model_binding(self.gpu),
            lit: false,
        });

        let mut rocket_parent = None;

        for body in bodies::solar_system() {
            let mut scene_body = SceneBody::new(body.name, body.radius);
            if let Some(orbit) = body.orbit {
                scene_body = scene_body.orbit(orbit);
            }
            let id = self.scene.add_body(scene_body);
            if body.name == bodies::ROCKET_PARENT {
                rocket_parent = Some(id);
            }

            let mesh = self.add_mesh(Mesh::sphere(self.gpu, body.radius, 32, 32));
            let texture = self.add_texture(body.texture, body.color, body.name);
            self.visuals.push(Visual {
                body: Some(id),
                mesh,
                texture,
                binding: self.pass.create_model_binding(self.gpu),
                // The sun is self-luminous; everything else catches its light.
                lit: body.orbit.is_some(),
            });

            for satellite in &body.satellites {
                let sat_id = self.scene.add_body(
                    SceneBody::new(satellite.name, satellite.radius)
                        .parent(id)
                        .orbit(satellite.orbit),
                );
                let sat_mesh = self.add_mesh(Mesh::sphere(self.gpu, satellite.radius, 32, 32));
                let sat_texture =
                    self.add_texture(satellite.texture, satellite.color, satellite.name);
                self.visuals.push(Visual {
                    body: Some(sat_id),
                    mesh: sat_mesh,
                    texture: sat_texture,
                    binding: self.pass.create_model_binding(self.gpu),
                    lit: true,
                });
            }

            if let Some(ring) = &body.ring {
                let ring_mesh = self.add_mesh(Mesh::ring(
                    self.gpu,
                    ring.inner_radius,
                    ring.outer_radius,
                    64,
                ));
                let ring_texture = self.add_flat_texture(ring.color, "Ring");
                self.visuals.push(Visual {
                    body: Some(id),
                    mesh: ring_mesh,
                    texture: ring_texture,
                    binding: self.pass.create_model_binding(self.gpu),
                    lit: false,
                });
            }
        }

        // Reserve the rocket's arena slot now so body indices are stable
        // regardless of when (or whether) its model finishes loading.
        let rocket = bodies::rocket();
        let parent = rocket_parent.expect("rocket parent missing from registry");
        let id = self.scene.add_pending_body(
            SceneBody::new(rocket.name, 0.0)
                .parent(parent)
                .orbit(rocket.orbit)
                .focus_distance(rocket.focus_distance),
        );

        RocketSlot {
            id,
            scale: rocket.scale,
            color: rocket.color,
            name: rocket.name,
            load: Some(ModelLoad::spawn(rocket.model_path)),
        }
    }

    fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    fn add_texture(&mut self, path: &str, fallback: [u8; 3], name: &str) -> usize {
        let texture = match Texture::from_file(self.gpu, path) {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!("texture '{path}' for {name} unavailable ({e}); using flat color");
                Texture::flat_color(self.gpu, fallback, name)
            }
        };
        self.textures
            .push(self.pass.create_texture_bind_group(self.gpu, &texture));
        self.textures.len() - 1
    }

    fn add_flat_texture(&mut self, color: [u8; 3], name: &str) -> usize {
        let texture = Texture::flat_color(self.gpu, color, name);
        self.textures
            .push(self.pass.create_texture_bind_group(self.gpu, &texture));
        self.textures.len() - 1
    }
}

/// Check the rocket's background load and attach the model when it arrives.
///
/// A failed load leaves the rocket out of the scene and the focus cycle;
/// the warning below is the only diagnostic.
fn poll_rocket(
    gpu: &GpuContext,
    pass: &ScenePass,
    scene: &mut Scene,
    meshes: &mut Vec<Mesh>,
    textures: &mut Vec<wgpu::BindGroup>,
    visuals: &mut Vec<Visual>,
    rocket: &mut RocketSlot,
) {
    let Some(load) = rocket.load.take() else {
        return;
    };

    match load.poll() {
        None => rocket.load = Some(load),
        Some(Ok(mut geometry)) => {
            geometry.recenter();
            geometry.fit_to(rocket.scale);

            meshes.push(geometry.upload(gpu));
            let texture = Texture::flat_color(gpu, rocket.color, rocket.name);
            textures.push(pass.create_texture_bind_group(gpu, &texture));

            visuals.push(Visual {
                body: Some(rocket.id),
                mesh: meshes.len() - 1,
                texture: textures.len() - 1,
                binding: pass.create_model_binding(gpu),
                lit: true,
            });

            scene.activate(rocket.id);
            log::info!("{} model attached and focusable", rocket.name);
        }
        Some(Err(e)) => {
            log::warn!("{} model failed to load: {e}", rocket.name);
        }
    }
}
