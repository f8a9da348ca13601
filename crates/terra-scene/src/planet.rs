//! The planet: a Phong-shaded sphere with colour, specular and normal maps.

use std::path::PathBuf;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use terra_config::PlanetConfig;
use terra_controls::{Euler, Object3D};

use crate::color::hex_to_rgb;
use crate::lights::FogExp2;
use crate::sphere::SphereMesh;

/// Blinn-Phong surface description.
#[derive(Clone, Debug, PartialEq)]
pub struct PhongMaterial {
    pub specular: Vec3,
    pub shininess: f32,
    pub color_map: PathBuf,
    pub specular_map: PathBuf,
    pub normal_map: PathBuf,
    pub normal_scale: Vec2,
}

impl PhongMaterial {
    #[must_use]
    pub fn from_config(config: &PlanetConfig) -> Self {
        Self {
            specular: hex_to_rgb(config.specular),
            shininess: config.shininess,
            color_map: PathBuf::from(&config.color_map),
            specular_map: PathBuf::from(&config.specular_map),
            normal_map: PathBuf::from(&config.normal_map),
            normal_scale: Vec2::from_array(config.normal_scale),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Planet {
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    material: PhongMaterial,
    transform: Object3D,
}

impl Planet {
    /// Builds the planet at the origin, tilted about Z by `config.tilt`.
    #[must_use]
    pub fn from_config(config: &PlanetConfig) -> Self {
        Self {
            radius: config.radius,
            width_segments: config.width_segments,
            height_segments: config.height_segments,
            material: PhongMaterial::from_config(config),
            transform: Object3D::new().with_rotation(Euler::new(0.0, 0.0, config.tilt)),
        }
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[must_use]
    pub fn material(&self) -> &PhongMaterial {
        &self.material
    }

    #[must_use]
    pub fn transform(&self) -> &Object3D {
        &self.transform
    }

    /// Tessellates the surface at the configured resolution.
    #[must_use]
    pub fn mesh(&self) -> SphereMesh {
        SphereMesh::new(self.radius, self.width_segments, self.height_segments)
    }

    /// Copies the orientation of `target`, the look target the fly controls
    /// rotate while a drag is in progress. The planet stays at the origin.
    pub fn follow(&mut self, target: &Object3D) {
        self.transform.set_rotation(target.rotation());
    }

    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.transform.quaternion(), self.transform.position())
    }

    #[must_use]
    pub fn to_uniform(&self, fog: &FogExp2) -> PlanetUniform {
        let specular = self.material.specular;
        PlanetUniform {
            model: self.model_matrix().to_cols_array_2d(),
            fog: [fog.color.x, fog.color.y, fog.color.z, fog.density],
            specular: [specular.x, specular.y, specular.z, self.material.shininess],
        }
    }
}

/// GPU layout of the planet block, 96 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PlanetUniform {
    pub model: [[f32; 4]; 4],
    /// xyz = fog colour, w = density.
    pub fog: [f32; 4],
    /// xyz = specular colour, w = shininess.
    pub specular: [f32; 4],
}
