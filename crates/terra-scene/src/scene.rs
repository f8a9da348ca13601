use glam::Vec3;
use terra_config::Config;
use terra_controls::Object3D;

use crate::camera::{CameraUniform, PerspectiveCamera};
use crate::lights::{DirectionalLight, DirectionalLightUniform, FogExp2, default_lights};
use crate::planet::{Planet, PlanetUniform};
use crate::starfield::Starfield;

/// Uniform blocks for one frame, in upload order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    pub camera: CameraUniform,
    pub planet: PlanetUniform,
    pub lights: Vec<DirectionalLightUniform>,
}

/// Everything the viewer draws, plus the lens it draws through.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: PerspectiveCamera,
    pub planet: Planet,
    pub lights: Vec<DirectionalLight>,
    pub fog: FogExp2,
    pub starfield: Starfield,
    camera_start: Object3D,
}

impl Scene {
    /// Assembles the scene from `config`. The camera starts on the +Z axis,
    /// `camera.start_distance_radii` planet radii from the centre, facing it.
    #[must_use]
    pub fn build(config: &Config) -> Self {
        let aspect = aspect_of(config.window.width, config.window.height);
        let camera = PerspectiveCamera::new(
            config.camera.fov_y_degrees,
            aspect,
            config.camera.near,
            config.camera.far,
        );
        let planet = Planet::from_config(&config.planet);
        let distance = planet.radius() * config.camera.start_distance_radii;
        let starfield = Starfield::generate(&config.stars, planet.radius());

        tracing::info!(
            radius = planet.radius(),
            distance,
            layers = starfield.layers().len(),
            "Scene built"
        );

        Self {
            camera,
            planet,
            lights: default_lights(),
            fog: FogExp2::default(),
            starfield,
            camera_start: Object3D::at(Vec3::new(0.0, 0.0, distance)),
        }
    }

    /// Initial transform for the fly camera.
    #[must_use]
    pub fn camera_start(&self) -> Object3D {
        self.camera_start.clone()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// The planet's starting transform. The fly controls take a copy as
    /// their look target, so a drag turns the planet.
    #[must_use]
    pub fn look_target_start(&self) -> Object3D {
        self.planet.transform().clone()
    }

    /// Orients the planet like the controls' look target.
    pub fn follow_look_target(&mut self, look_target: &Object3D) {
        self.planet.follow(look_target);
    }

    /// Uniforms for drawing the scene from a camera placed at `camera`.
    #[must_use]
    pub fn frame_uniforms(&self, camera: &Object3D) -> FrameUniforms {
        FrameUniforms {
            camera: self.camera.to_uniform(camera),
            planet: self.planet.to_uniform(&self.fog),
            lights: self.lights.iter().map(DirectionalLight::to_uniform).collect(),
        }
    }
}

fn aspect_of(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}
