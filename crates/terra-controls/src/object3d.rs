//! Transform handle shared by the camera and the look target.
//!
//! [`Object3D`] keeps an XYZ-ordered Euler rotation and the equivalent unit
//! quaternion in sync, so callers may write either representation. Euler
//! writes are stored verbatim: reading back [`Object3D::rotation`] after
//! [`Object3D::set_rotation`] returns exactly the angles that were written.

use glam::{EulerRot, Quat, Vec3};

use crate::pose::Pose;

/// XYZ-ordered Euler angles in radians (rotation = Rx * Ry * Rz).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Euler {
    /// Rotation about the local X axis (pitch).
    pub x: f32,
    /// Rotation about the local Y axis (yaw).
    pub y: f32,
    /// Rotation about the local Z axis (roll).
    pub z: f32,
}

impl Euler {
    /// No rotation.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates Euler angles from the three components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The unit quaternion for these angles.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.x, self.y, self.z)
    }

    /// Decomposes a unit quaternion into XYZ Euler angles.
    #[must_use]
    pub fn from_quat(q: Quat) -> Self {
        let (x, y, z) = q.to_euler(EulerRot::XYZ);
        Self { x, y, z }
    }
}

/// Position and orientation of a scene object.
#[derive(Clone, Debug, PartialEq)]
pub struct Object3D {
    position: Vec3,
    rotation: Euler,
    quaternion: Quat,
}

impl Default for Object3D {
    fn default() -> Self {
        Self::new()
    }
}

impl Object3D {
    /// An object at the origin with identity orientation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Euler::ZERO,
            quaternion: Quat::IDENTITY,
        }
    }

    /// An object at `position` with identity orientation.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    /// Builder-style Euler rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Euler) -> Self {
        self.set_rotation(rotation);
        self
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    #[must_use]
    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    /// Writes the Euler rotation and re-derives the quaternion.
    pub fn set_rotation(&mut self, rotation: Euler) {
        self.rotation = rotation;
        self.quaternion = rotation.to_quat();
    }

    #[must_use]
    pub fn quaternion(&self) -> Quat {
        self.quaternion
    }

    /// Writes the orientation quaternion and re-derives the Euler rotation.
    pub fn set_quaternion(&mut self, quaternion: Quat) {
        self.quaternion = quaternion;
        self.rotation = Euler::from_quat(quaternion);
    }

    /// Moves the object `distance` units along a local-space `axis`.
    ///
    /// `axis` must be normalized; the displacement follows the object's
    /// current facing.
    pub fn translate_on_axis(&mut self, axis: Vec3, distance: f32) {
        self.position += (self.quaternion * axis) * distance;
    }

    pub fn translate_x(&mut self, distance: f32) {
        self.translate_on_axis(Vec3::X, distance);
    }

    pub fn translate_y(&mut self, distance: f32) {
        self.translate_on_axis(Vec3::Y, distance);
    }

    pub fn translate_z(&mut self, distance: f32) {
        self.translate_on_axis(Vec3::Z, distance);
    }

    /// Right-multiplies `delta` onto the orientation, composing it in the
    /// object's local frame.
    pub fn rotate_local(&mut self, delta: Quat) {
        self.set_quaternion(self.quaternion * delta);
    }

    /// Local -Z expressed in world space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.quaternion * Vec3::NEG_Z
    }

    /// Current position and orientation.
    #[must_use]
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            orientation: self.quaternion,
        }
    }
}
