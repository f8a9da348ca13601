//! Physical key to [`MoveFlag`] mapping.
//!
//! Physical key codes are used so that the layout-independent WASD cluster
//! works on every keyboard.

use std::collections::HashMap;

use winit::keyboard::{KeyCode, PhysicalKey};

use crate::move_state::MoveFlag;

/// Maps physical keys to movement/rotation intent flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, MoveFlag>,
}

impl Default for KeyBindings {
    /// WASD strafe, R/F up/down, arrow keys pitch/yaw, Q/E roll.
    fn default() -> Self {
        let bindings = [
            (KeyCode::KeyW, MoveFlag::Forward),
            (KeyCode::KeyS, MoveFlag::Back),
            (KeyCode::KeyA, MoveFlag::Left),
            (KeyCode::KeyD, MoveFlag::Right),
            (KeyCode::KeyR, MoveFlag::Up),
            (KeyCode::KeyF, MoveFlag::Down),
            (KeyCode::ArrowUp, MoveFlag::PitchUp),
            (KeyCode::ArrowDown, MoveFlag::PitchDown),
            (KeyCode::ArrowLeft, MoveFlag::YawLeft),
            (KeyCode::ArrowRight, MoveFlag::YawRight),
            (KeyCode::KeyQ, MoveFlag::RollLeft),
            (KeyCode::KeyE, MoveFlag::RollRight),
        ];
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl KeyBindings {
    /// The flag driven by `key`, if any. Unidentified keys never match.
    #[must_use]
    pub fn flag_for(&self, key: PhysicalKey) -> Option<MoveFlag> {
        match key {
            PhysicalKey::Code(code) => self.bindings.get(&code).copied(),
            PhysicalKey::Unidentified(_) => None,
        }
    }
}
