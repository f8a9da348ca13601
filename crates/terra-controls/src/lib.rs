//! Fly camera controls: pointer-drag look, keyboard movement, and per-frame
//! integration of both into a camera transform with pose-change notification.

pub mod fly_controls;
pub mod keybindings;
pub mod move_state;
pub mod object3d;
pub mod pose;
pub mod viewport;

pub use fly_controls::{DragState, FlyControls, ViewportBinding};
pub use keybindings::KeyBindings;
pub use move_state::{MoveFlag, MoveState, movement_vector, rotation_intent};
pub use object3d::{Euler, Object3D};
pub use pose::{Pose, PoseChanged, PoseListeners};
pub use viewport::{
    EventResponse, FixedSize, ListenerId, PointerEvent, PointerEventKind, PointerListener,
    SizeProvider, Viewport,
};
