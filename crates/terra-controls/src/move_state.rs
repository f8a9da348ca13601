//! Discrete movement and rotation intent.
//!
//! [`MoveState`] holds one on/off flag per direction. The derived vectors are
//! pure functions of the flags ([`movement_vector`], [`rotation_intent`]), so
//! they can never drift from the input that produced them.

use glam::Vec3;

/// A single directional or rotational intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Up,
    Down,
    Left,
    Right,
    Forward,
    Back,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    RollLeft,
    RollRight,
}

impl MoveFlag {
    /// Every flag, in declaration order.
    pub const ALL: [MoveFlag; 12] = [
        MoveFlag::Up,
        MoveFlag::Down,
        MoveFlag::Left,
        MoveFlag::Right,
        MoveFlag::Forward,
        MoveFlag::Back,
        MoveFlag::PitchUp,
        MoveFlag::PitchDown,
        MoveFlag::YawLeft,
        MoveFlag::YawRight,
        MoveFlag::RollLeft,
        MoveFlag::RollRight,
    ];

    /// Whether the flag drives translation (as opposed to rotation).
    #[must_use]
    pub fn is_translation(self) -> bool {
        matches!(
            self,
            MoveFlag::Up
                | MoveFlag::Down
                | MoveFlag::Left
                | MoveFlag::Right
                | MoveFlag::Forward
                | MoveFlag::Back
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Currently-held intent flags. Each flag reads as exactly 0 or 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveState {
    flags: [bool; 12],
}

impl MoveState {
    /// All flags cleared.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_set(&self, flag: MoveFlag) -> bool {
        self.flags[flag.index()]
    }

    /// The flag as a number: 1.0 when held, 0.0 otherwise.
    #[must_use]
    pub fn value(&self, flag: MoveFlag) -> f32 {
        if self.is_set(flag) { 1.0 } else { 0.0 }
    }

    /// Sets a flag. Returns `true` if the stored value changed.
    pub fn set(&mut self, flag: MoveFlag, on: bool) -> bool {
        let slot = &mut self.flags[flag.index()];
        let changed = *slot != on;
        *slot = on;
        changed
    }

    /// Clears every flag.
    pub fn clear(&mut self) {
        self.flags = [false; 12];
    }

    /// `true` when no flag is held.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.flags.iter().all(|f| !f)
    }
}

/// Local-space translation intent: `(right - left, up - down, back - fwd)`
/// where `fwd = forward OR (auto_forward AND NOT back)`.
#[must_use]
pub fn movement_vector(state: &MoveState, auto_forward: bool) -> Vec3 {
    let forward = state.is_set(MoveFlag::Forward) || (auto_forward && !state.is_set(MoveFlag::Back));
    let forward = if forward { 1.0 } else { 0.0 };
    Vec3::new(
        state.value(MoveFlag::Right) - state.value(MoveFlag::Left),
        state.value(MoveFlag::Up) - state.value(MoveFlag::Down),
        state.value(MoveFlag::Back) - forward,
    )
}

/// Key-driven rotation intent as (pitch, yaw, roll).
#[must_use]
pub fn rotation_intent(state: &MoveState) -> Vec3 {
    Vec3::new(
        state.value(MoveFlag::PitchUp) - state.value(MoveFlag::PitchDown),
        state.value(MoveFlag::YawLeft) - state.value(MoveFlag::YawRight),
        state.value(MoveFlag::RollLeft) - state.value(MoveFlag::RollRight),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_from_bits(bits: u8) -> MoveState {
        let translation = [
            MoveFlag::Up,
            MoveFlag::Down,
            MoveFlag::Left,
            MoveFlag::Right,
            MoveFlag::Forward,
            MoveFlag::Back,
        ];
        let mut state = MoveState::new();
        for (i, flag) in translation.iter().enumerate() {
            state.set(*flag, bits & (1 << i) != 0);
        }
        state
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = MoveState::new();
        assert!(state.is_idle());
        for flag in MoveFlag::ALL {
            assert_eq!(state.value(flag), 0.0);
        }
    }

    #[test]
    fn test_set_reports_change() {
        let mut state = MoveState::new();
        assert!(state.set(MoveFlag::Forward, true));
        assert!(!state.set(MoveFlag::Forward, true));
        assert!(state.set(MoveFlag::Forward, false));
    }

    #[test]
    fn test_flags_are_independent() {
        let mut state = MoveState::new();
        state.set(MoveFlag::Left, true);
        state.set(MoveFlag::RollRight, true);
        for flag in MoveFlag::ALL {
            let expected = matches!(flag, MoveFlag::Left | MoveFlag::RollRight);
            assert_eq!(state.is_set(flag), expected, "{flag:?}");
        }
    }

    #[test]
    fn test_movement_vector_formula_for_every_combination() {
        for auto_forward in [false, true] {
            for bits in 0u8..64 {
                let state = state_from_bits(bits);
                let v = |f| state.value(f);
                let fwd = state.is_set(MoveFlag::Forward)
                    || (auto_forward && !state.is_set(MoveFlag::Back));
                let fwd = if fwd { 1.0 } else { 0.0 };
                let expected = Vec3::new(
                    v(MoveFlag::Right) - v(MoveFlag::Left),
                    v(MoveFlag::Up) - v(MoveFlag::Down),
                    v(MoveFlag::Back) - fwd,
                );
                assert_eq!(movement_vector(&state, auto_forward), expected, "bits={bits:06b}");
            }
        }
    }

    #[test]
    fn test_auto_forward_suppressed_by_back() {
        let mut state = MoveState::new();
        assert_eq!(movement_vector(&state, true), Vec3::new(0.0, 0.0, -1.0));
        state.set(MoveFlag::Back, true);
        assert_eq!(movement_vector(&state, true), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_forward_and_back_cancel() {
        let mut state = MoveState::new();
        state.set(MoveFlag::Forward, true);
        state.set(MoveFlag::Back, true);
        assert_eq!(movement_vector(&state, false).z, 0.0);
    }

    #[test]
    fn test_rotation_intent_signs() {
        let mut state = MoveState::new();
        state.set(MoveFlag::PitchUp, true);
        state.set(MoveFlag::YawRight, true);
        state.set(MoveFlag::RollLeft, true);
        assert_eq!(rotation_intent(&state), Vec3::new(1.0, -1.0, 1.0));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = MoveState::new();
        for flag in MoveFlag::ALL {
            state.set(flag, true);
        }
        state.clear();
        assert!(state.is_idle());
    }
}
