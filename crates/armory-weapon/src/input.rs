//! Weapon input edges
//!
//! The host reports raw press/release events per action; this layer turns
//! them into the per-frame `down` / `held` / `up` triple the controller reads.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Weapon actions a host can bind inputs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponAction {
    /// Primary trigger
    Fire,
    /// Charge-and-release trigger
    Charge,
    /// Manual reload
    Reload,
    /// Cycle to the next loadout slot
    NextWeapon,
    /// Cycle to the previous loadout slot
    PreviousWeapon,
}

/// Trigger edges for one action during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerInput {
    /// Pressed this frame
    pub down: bool,
    /// Currently held
    pub held: bool,
    /// Released this frame
    pub up: bool,
}

impl TriggerInput {
    pub fn new(down: bool, held: bool, up: bool) -> Self {
        Self { down, held, up }
    }

    /// A frame where the trigger went down and is still held
    pub fn pressed() -> Self {
        Self::new(true, true, false)
    }

    /// A frame where the trigger stayed down
    pub fn holding() -> Self {
        Self::new(false, true, false)
    }

    /// A frame where the trigger came up
    pub fn released() -> Self {
        Self::new(false, false, true)
    }
}

/// Current state of all weapon inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<WeaponAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<WeaponAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<WeaponAction>,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Repeated presses while held do not re-trigger `down`.
    pub fn press(&mut self, action: WeaponAction) {
        if !self.held.contains(&action) {
            self.just_pressed.insert(action);
        }
        self.held.insert(action);
    }

    pub fn release(&mut self, action: WeaponAction) {
        if self.held.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: WeaponAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: WeaponAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: WeaponAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Edges for `action` this frame
    pub fn trigger(&self, action: WeaponAction) -> TriggerInput {
        TriggerInput {
            down: self.is_just_pressed(action),
            held: self.is_held(action),
            up: self.is_just_released(action),
        }
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Clear all input state, e.g. when focus is lost
    pub fn clear_all(&mut self) {
        self.held.clear();
        self.clear_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_hold_release() {
        let mut state = InputState::new();
        state.press(WeaponAction::Fire);
        assert_eq!(state.trigger(WeaponAction::Fire), TriggerInput::pressed());

        state.clear_frame();
        state.press(WeaponAction::Fire);
        assert_eq!(state.trigger(WeaponAction::Fire), TriggerInput::holding());

        state.clear_frame();
        state.release(WeaponAction::Fire);
        assert_eq!(state.trigger(WeaponAction::Fire), TriggerInput::released());

        state.clear_frame();
        assert_eq!(state.trigger(WeaponAction::Fire), TriggerInput::default());
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut state = InputState::new();
        state.release(WeaponAction::Reload);
        assert!(!state.is_just_released(WeaponAction::Reload));
    }

    #[test]
    fn test_actions_are_independent() {
        let mut state = InputState::new();
        state.press(WeaponAction::Charge);
        assert!(state.is_held(WeaponAction::Charge));
        assert!(!state.is_held(WeaponAction::Fire));

        state.clear_all();
        assert!(!state.is_held(WeaponAction::Charge));
    }
}
