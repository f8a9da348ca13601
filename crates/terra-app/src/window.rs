//! Window creation and event handling via winit.
//!
//! [`TerraApp`] implements winit's [`ApplicationHandler`]. Window events are
//! translated into viewport pointer events and controller key transitions;
//! each redraw integrates the fly controls and rebuilds the frame uniforms.
//! The planet is the controls' look target and is re-oriented after every
//! pointer event.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use glam::Vec2;
use terra_config::{Config, ConfigError};
use terra_controls::{FlyControls, Pose, PoseChanged, PointerEvent, Viewport};
use terra_scene::{FrameUniforms, PlanetTextures, Scene, SphereMesh, Starfield};
use tracing::{debug, error, info, instrument, trace, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::frame_clock::FrameClock;
use crate::platform::PlatformDirs;
use crate::{AppError, apply_tuning, build_controls};

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// Window title with the camera position appended.
#[must_use]
pub fn pose_title(base: &str, pose: &Pose) -> String {
    let p = pose.position;
    format!("{base} | ({:.0}, {:.0}, {:.0})", p.x, p.y, p.z)
}

/// What a renderer needs to draw the current frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawData<'a> {
    pub uniforms: &'a FrameUniforms,
    pub planet_mesh: &'a SphereMesh,
    /// `None` until the surface maps decode, or when they are missing.
    pub textures: Option<&'a PlanetTextures>,
    pub starfield: &'a Starfield,
}

/// Viewer state shared by every window event.
pub struct TerraApp {
    config: Config,
    config_dir: PathBuf,
    scene: Scene,
    viewport: Rc<Viewport>,
    controls: Rc<RefCell<FlyControls>>,
    clock: FrameClock,
    cursor: Vec2,
    asset_root: PathBuf,
    planet_mesh: SphereMesh,
    textures: Option<PlanetTextures>,
    uniforms: FrameUniforms,
    window: Option<Window>,
}

impl TerraApp {
    /// Builds the scene and attaches the controls, with the planet as look
    /// target. No window is opened until the event loop resumes.
    pub fn new(config: Config, dirs: &PlatformDirs) -> Self {
        let scene = Scene::build(&config);
        let viewport = Rc::new(Viewport::element(
            config.window.width as f32,
            config.window.height as f32,
        ));
        let controls = build_controls(
            &config.controls,
            scene.camera_start(),
            scene.look_target_start(),
            Rc::clone(&viewport),
        );

        let planet_mesh = scene.planet.mesh();
        debug!(
            vertices = planet_mesh.vertex_count(),
            triangles = planet_mesh.triangle_count(),
            "Planet mesh tessellated"
        );
        let uniforms = scene.frame_uniforms(controls.borrow().camera());

        Self {
            config,
            config_dir: dirs.config_dir.clone(),
            scene,
            viewport,
            controls,
            clock: FrameClock::new(),
            cursor: Vec2::ZERO,
            asset_root: dirs.data_dir.clone(),
            planet_mesh,
            textures: None,
            uniforms,
            window: None,
        }
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn controls(&self) -> &Rc<RefCell<FlyControls>> {
        &self.controls
    }

    #[must_use]
    pub fn viewport(&self) -> &Rc<Viewport> {
        &self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current frame's uniforms, mesh, maps and stars.
    #[must_use]
    pub fn draw_data(&self) -> DrawData<'_> {
        DrawData {
            uniforms: &self.uniforms,
            planet_mesh: &self.planet_mesh,
            textures: self.textures.as_ref(),
            starfield: &self.scene.starfield,
        }
    }

    /// Tracks a new drawable size. Minimised windows report zero and are skipped.
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport.set_offset_size(width as f32, height as f32);
        self.scene.resize(width, height);
        debug!(width, height, "Viewport resized");
    }

    pub fn handle_cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = Vec2::new(x, y);
        self.viewport.dispatch(&PointerEvent::moved(x, y));
        self.sync_planet();
    }

    /// Any button drags. The secondary button also raises a context menu
    /// request, which the controls always suppress.
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let Vec2 { x, y } = self.cursor;
        match state {
            ElementState::Pressed => {
                self.viewport.dispatch(&PointerEvent::press(x, y));
                if button == MouseButton::Right {
                    let response = self.viewport.dispatch(&PointerEvent::context_menu(x, y));
                    trace!(?response, "context menu");
                }
            }
            ElementState::Released => {
                self.viewport.dispatch(&PointerEvent::release(x, y));
            }
        }
        self.sync_planet();
    }

    /// Forwards a key transition. Returns `true` when the viewer should close.
    /// F5 reloads the config file.
    pub fn handle_key(&mut self, key: PhysicalKey, state: ElementState, repeat: bool) -> bool {
        if repeat {
            return false;
        }
        if state == ElementState::Pressed {
            match key {
                PhysicalKey::Code(KeyCode::Escape) => return true,
                PhysicalKey::Code(KeyCode::F5) => {
                    match self.reload_config() {
                        Ok(true) => info!("Config reloaded"),
                        Ok(false) => debug!("Config unchanged"),
                        Err(e) => warn!("Config reload failed: {e}"),
                    }
                    return false;
                }
                _ => {}
            }
        }
        self.controls.borrow_mut().on_key(key, state);
        false
    }

    /// Re-reads `config.ron`. When it changed, the controls tuning and
    /// `debug.show_pose` are taken from the file. Returns whether anything
    /// was applied.
    pub fn reload_config(&mut self) -> Result<bool, ConfigError> {
        let Some(fresh) = self.config.reload(&self.config_dir)? else {
            return Ok(false);
        };
        apply_tuning(&mut self.controls.borrow_mut(), &fresh.controls);
        self.config.controls = fresh.controls;
        self.config.debug.show_pose = fresh.debug.show_pose;
        Ok(true)
    }

    /// Releases held keys when focus leaves, since the release events will
    /// never arrive.
    pub fn handle_focus(&mut self, focused: bool) {
        if !focused {
            self.controls.borrow_mut().reset_input();
        }
    }

    /// Advances one frame by `delta` seconds and rebuilds the uniforms.
    pub fn frame(&mut self, delta: f32) -> Option<PoseChanged> {
        let changed = self.controls.borrow_mut().update(delta);
        self.sync_planet();
        self.uniforms = self.scene.frame_uniforms(self.controls.borrow().camera());
        if let Some(event) = changed
            && self.config.debug.show_pose
            && let Some(window) = &self.window
        {
            window.set_title(&pose_title(&self.config.window.title, &event.pose));
        }
        changed
    }

    /// Detaches the controls. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.controls.borrow_mut().dispose();
    }

    fn sync_planet(&mut self) {
        self.scene.follow_look_target(self.controls.borrow().look_target());
    }

    fn load_textures(&mut self) {
        match PlanetTextures::load(self.scene.planet.material(), &self.asset_root) {
            Ok(textures) => self.textures = Some(textures),
            Err(e) => warn!("Planet textures unavailable: {e}"),
        }
    }
}

impl ApplicationHandler for TerraApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window = match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => window,
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        info!(
            "Window created: {}x{} (scale: {:.2})",
            size.width,
            size.height,
            window.scale_factor()
        );
        self.handle_resize(size.width, size.height);
        if self.textures.is_none() {
            self.load_textures();
        }
        self.clock.reset();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.handle_resize(size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(button, state);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if self.handle_key(event.physical_key, event.state, event.repeat) {
                    info!("Escape pressed, shutting down");
                    event_loop.exit();
                }
            }
            WindowEvent::Focused(focused) => self.handle_focus(focused),
            WindowEvent::RedrawRequested => {
                let delta = self.clock.delta();
                self.frame(delta);
                let draw = self.draw_data();
                trace!(
                    vertices = draw.planet_mesh.vertex_count(),
                    textured = draw.textures.is_some(),
                    lights = draw.uniforms.lights.len(),
                    star_layers = draw.starfield.layers().len(),
                    "Frame prepared"
                );
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
        info!(frames = self.clock.frame_count(), "Viewer closed");
    }
}

/// Opens the viewer window and blocks until it closes.
#[instrument(skip(config))]
pub fn run(config: Config, dirs: &PlatformDirs) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = TerraApp::new(config, dirs);
    event_loop.run_app(&mut app)?;
    Ok(())
}
