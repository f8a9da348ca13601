//! UV sphere tessellation.

use glam::{Vec2, Vec3};

/// Indexed triangle mesh of a latitude/longitude sphere.
///
/// Rows run from the north pole (`+Y`) to the south pole. The seam column is
/// duplicated so texture coordinates wrap cleanly, and the pole rows emit one
/// triangle per segment instead of a degenerate quad.
#[derive(Debug, Clone, Default)]
pub struct SphereMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Segment counts below 3 (around) or 2 (down) are raised to those minimums.
    #[must_use]
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let w = width_segments.max(3);
        let h = height_segments.max(2);
        let vertex_count = ((w + 1) * (h + 1)) as usize;

        let mut mesh = Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity((w * (2 * h - 2) * 3) as usize),
        };

        for iy in 0..=h {
            let v = iy as f32 / h as f32;
            // Pole vertices sit at the middle of their segment in U.
            let u_offset = if iy == 0 {
                0.5 / w as f32
            } else if iy == h {
                -0.5 / w as f32
            } else {
                0.0
            };
            let theta = v * std::f32::consts::PI;

            for ix in 0..=w {
                let u = ix as f32 / w as f32;
                let phi = u * std::f32::consts::TAU;
                let normal = Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                mesh.positions.push(normal * radius);
                mesh.normals.push(normal);
                mesh.uvs.push(Vec2::new(u + u_offset, 1.0 - v));
            }
        }

        let row = w + 1;
        for iy in 0..h {
            for ix in 0..w {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                if iy != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != h - 1 {
                    mesh.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        mesh
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
