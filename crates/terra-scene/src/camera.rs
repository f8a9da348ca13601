//! Perspective projection for the fly camera.
//!
//! The camera's transform lives in the [`Object3D`] owned by the fly
//! controls; this type only carries the lens and derives matrices from
//! whatever transform it is handed.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use terra_controls::Object3D;

/// Lens parameters and cached projection matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    /// `fov_y_degrees` is the vertical field of view.
    #[must_use]
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    #[must_use]
    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Tracks a new drawable size. A zero dimension leaves the lens as is.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::debug!(width, height, "Ignoring degenerate resize");
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_projection_matrix();
    }

    /// Recomputes the cached matrix after a lens change.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view transform for a camera placed at `transform`.
    #[must_use]
    pub fn view_matrix(transform: &Object3D) -> Mat4 {
        Mat4::from_rotation_translation(transform.quaternion(), transform.position()).inverse()
    }

    #[must_use]
    pub fn view_projection_matrix(&self, transform: &Object3D) -> Mat4 {
        self.projection * Self::view_matrix(transform)
    }

    #[must_use]
    pub fn to_uniform(&self, transform: &Object3D) -> CameraUniform {
        let p: Vec3 = transform.position();
        CameraUniform {
            view_proj: self.view_projection_matrix(transform).to_cols_array_2d(),
            camera_pos: [p.x, p.y, p.z, 0.0],
        }
    }
}

/// GPU layout of the camera block, 80 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = world position, w unused.
    pub camera_pos: [f32; 4],
}
