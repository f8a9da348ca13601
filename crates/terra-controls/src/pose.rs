//! Pose snapshots and the "pose changed" notification.

use glam::{Quat, Vec3};

use crate::viewport::ListenerId;

/// Threshold for both the squared positional delta and the angular proxy.
pub const POSE_EPSILON: f32 = 1e-6;

/// A camera's combined position and orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    /// Angular-difference proxy `8 * (1 - dot(a, b))`.
    #[must_use]
    pub fn angular_proxy(&self, other: &Pose) -> f32 {
        8.0 * (1.0 - self.orientation.dot(other.orientation))
    }

    /// Whether `other` has moved meaningfully away from `self`.
    #[must_use]
    pub fn differs_from(&self, other: &Pose) -> bool {
        self.position.distance_squared(other.position) > POSE_EPSILON
            || self.angular_proxy(other) > POSE_EPSILON
    }
}

/// Emitted by the controller when the camera pose crosses the movement
/// threshold since the previous notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseChanged {
    /// The pose at the time of emission.
    pub pose: Pose,
}

/// Callback invoked synchronously with each notification.
pub type PoseListener = Box<dyn FnMut(&PoseChanged)>;

/// Ordered set of pose-change subscribers.
#[derive(Default)]
pub struct PoseListeners {
    next_id: u64,
    entries: Vec<(ListenerId, PoseListener)>,
}

impl std::fmt::Debug for PoseListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoseListeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl PoseListeners {
    /// Registers a listener and returns its handle.
    pub fn add(&mut self, listener: PoseListener) -> ListenerId {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Removes a listener. Returns `false` if the handle was unknown.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Invokes every listener in registration order.
    pub fn emit(&mut self, event: &PoseChanged) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
