//! Directional lights and exponential fog.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::color::hex_to_rgb;

/// An infinitely distant light shining from `position` toward the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector from the origin toward the light.
    pub position: Vec3,
    /// Linear RGB.
    pub color: Vec3,
    pub intensity: f32,
}

impl DirectionalLight {
    /// White light of unit intensity placed along `position`. A zero vector
    /// yields a light overhead.
    #[must_use]
    pub fn white(position: Vec3) -> Self {
        Self {
            position: position.try_normalize().unwrap_or(Vec3::Y),
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }

    /// Direction the light travels.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        -self.position
    }

    #[must_use]
    pub fn to_uniform(&self) -> DirectionalLightUniform {
        let d = self.direction();
        DirectionalLightUniform {
            direction_intensity: [d.x, d.y, d.z, self.intensity],
            color_padding: [self.color.x, self.color.y, self.color.z, 0.0],
        }
    }
}

/// GPU layout of one directional light, 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct DirectionalLightUniform {
    /// xyz = travel direction, w = intensity.
    pub direction_intensity: [f32; 4],
    pub color_padding: [f32; 4],
}

/// Four white lights on the diagonals of the XZ plane so the planet is lit
/// evenly from every side of the orbit.
#[must_use]
pub fn default_lights() -> Vec<DirectionalLight> {
    [
        Vec3::new(-1.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(-1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, -1.0),
    ]
    .into_iter()
    .map(DirectionalLight::white)
    .collect()
}

/// Squared-exponential distance fog.
#[derive(Clone, Debug, PartialEq)]
pub struct FogExp2 {
    pub color: Vec3,
    pub density: f32,
}

impl Default for FogExp2 {
    fn default() -> Self {
        Self {
            color: hex_to_rgb(0x000000),
            density: 2.5e-7,
        }
    }
}

impl FogExp2 {
    /// Fraction of fog colour mixed in at view distance `depth`, in `[0, 1]`.
    #[must_use]
    pub fn factor(&self, depth: f32) -> f32 {
        let d = self.density * depth;
        (1.0 - (-d * d).exp()).clamp(0.0, 1.0)
    }
}
