//! Layered point-cloud starfield.
//!
//! Two vertex sets are sampled uniformly inside the cube `[-r, r]^3`, then
//! instanced as twenty randomly rotated layers with growing scale. Layers
//! alternate between the sparse and dense set and cycle through six dim grey
//! materials, which gives depth without a skybox texture. The same seed
//! always yields the same sky.

use glam::{Mat4, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use terra_config::StarsConfig;
use terra_controls::Euler;

use crate::color::hex_to_rgb;

/// Screen-space point sprite material.
#[derive(Clone, Debug, PartialEq)]
pub struct PointMaterial {
    pub color: Vec3,
    /// Pixel size.
    pub size: f32,
    /// Points shrink with distance when set.
    pub size_attenuation: bool,
}

impl PointMaterial {
    fn fixed(hex: u32, size: f32) -> Self {
        Self {
            color: hex_to_rgb(hex),
            size,
            size_attenuation: false,
        }
    }
}

/// One instance of a vertex set.
#[derive(Clone, Debug, PartialEq)]
pub struct StarLayer {
    /// Index into [`Starfield::point_sets`].
    pub point_set: usize,
    /// Index into [`Starfield::materials`].
    pub material: usize,
    pub rotation: Euler,
    pub scale: f32,
    /// Scale and rotation baked once; layers never move.
    pub model: Mat4,
}

#[derive(Clone, Debug)]
pub struct Starfield {
    point_sets: [Vec<Vec3>; 2],
    materials: Vec<PointMaterial>,
    layers: Vec<StarLayer>,
}

impl Starfield {
    /// Generates the starfield for a planet of `radius`.
    #[must_use]
    pub fn generate(config: &StarsConfig, radius: f32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let sparse = sample_cube(&mut rng, config.sparse_count, radius);
        let dense = sample_cube(&mut rng, config.dense_count, radius);

        let materials = vec![
            PointMaterial::fixed(0x555555, 2.0),
            PointMaterial::fixed(0x555555, 1.0),
            PointMaterial::fixed(0x333333, 2.0),
            PointMaterial::fixed(0x3a3a3a, 1.0),
            PointMaterial::fixed(0x1a1a1a, 2.0),
            PointMaterial::fixed(0x1a1a1a, 1.0),
        ];

        let layers: Vec<StarLayer> = (config.first_layer..config.end_layer)
            .map(|i| {
                let rotation = Euler::new(
                    rng.random::<f32>() * 6.0,
                    rng.random::<f32>() * 6.0,
                    rng.random::<f32>() * 6.0,
                );
                let scale = i as f32 * 10.0;
                StarLayer {
                    point_set: (i % 2) as usize,
                    material: (i % 6) as usize,
                    rotation,
                    scale,
                    model: Mat4::from_scale_rotation_translation(
                        Vec3::splat(scale),
                        rotation.to_quat(),
                        Vec3::ZERO,
                    ),
                }
            })
            .collect();

        tracing::debug!(
            seed = config.seed,
            layers = layers.len(),
            points = sparse.len() + dense.len(),
            "Generated starfield"
        );

        Self {
            point_sets: [sparse, dense],
            materials,
            layers,
        }
    }

    /// The sparse set (index 0) and the dense set (index 1).
    #[must_use]
    pub fn point_sets(&self) -> &[Vec<Vec3>; 2] {
        &self.point_sets
    }

    #[must_use]
    pub fn materials(&self) -> &[PointMaterial] {
        &self.materials
    }

    #[must_use]
    pub fn layers(&self) -> &[StarLayer] {
        &self.layers
    }

    /// World-space points of one layer.
    pub fn layer_points(&self, layer: &StarLayer) -> impl Iterator<Item = Vec3> + '_ {
        let model = layer.model;
        self.point_sets[layer.point_set]
            .iter()
            .map(move |p| model.transform_point3(*p))
    }
}

fn sample_cube(rng: &mut ChaCha8Rng, count: u32, radius: f32) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.random::<f32>() * 2.0 - 1.0,
                rng.random::<f32>() * 2.0 - 1.0,
                rng.random::<f32>() * 2.0 - 1.0,
            ) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f32 = 6371.0;

    #[test]
    fn test_default_layout() {
        let field = Starfield::generate(&StarsConfig::default(), RADIUS);
        assert_eq!(field.point_sets()[0].len(), 250);
        assert_eq!(field.point_sets()[1].len(), 1500);
        assert_eq!(field.materials().len(), 6);
        assert_eq!(field.layers().len(), 20);

        let first = &field.layers()[0];
        assert_eq!(first.point_set, 0);
        assert_eq!(first.material, 4);
        assert_eq!(first.scale, 100.0);
        let last = field.layers().last().unwrap();
        assert_eq!(last.point_set, 1);
        assert_eq!(last.material, 5);
        assert_eq!(last.scale, 290.0);
    }

    #[test]
    fn test_points_inside_cube() {
        let field = Starfield::generate(&StarsConfig::default(), RADIUS);
        for p in field.point_sets().iter().flatten() {
            assert!(p.abs().max_element() <= RADIUS);
        }
    }

    #[test]
    fn test_same_seed_same_sky() {
        let a = Starfield::generate(&StarsConfig::default(), RADIUS);
        let b = Starfield::generate(&StarsConfig::default(), RADIUS);
        assert_eq!(a.point_sets(), b.point_sets());
        assert_eq!(a.layers(), b.layers());
    }

    #[test]
    fn test_different_seed_different_sky() {
        let a = Starfield::generate(&StarsConfig::default(), RADIUS);
        let other = StarsConfig {
            seed: 7,
            ..StarsConfig::default()
        };
        let b = Starfield::generate(&other, RADIUS);
        assert_ne!(a.point_sets()[0], b.point_sets()[0]);
    }

    #[test]
    fn test_layer_rotation_range() {
        let field = Starfield::generate(&StarsConfig::default(), RADIUS);
        for layer in field.layers() {
            for angle in [layer.rotation.x, layer.rotation.y, layer.rotation.z] {
                assert!((0.0..6.0).contains(&angle));
            }
        }
    }

    #[test]
    fn test_materials_never_attenuate() {
        let field = Starfield::generate(&StarsConfig::default(), RADIUS);
        assert!(field.materials().iter().all(|m| !m.size_attenuation));
        assert_eq!(field.materials()[0].size, 2.0);
        assert_eq!(field.materials()[1].size, 1.0);
    }

    #[test]
    fn test_layer_points_scaled_out() {
        let field = Starfield::generate(&StarsConfig::default(), RADIUS);
        let layer = &field.layers()[0];
        let source = &field.point_sets()[layer.point_set];
        for (world, local) in field.layer_points(layer).zip(source) {
            let ratio = world.length() / local.length();
            assert!((ratio - layer.scale).abs() < 1e-2, "{ratio}");
        }
    }

    #[test]
    fn test_empty_layer_range() {
        let config = StarsConfig {
            first_layer: 5,
            end_layer: 5,
            ..StarsConfig::default()
        };
        assert!(Starfield::generate(&config, RADIUS).layers().is_empty());
    }
}
