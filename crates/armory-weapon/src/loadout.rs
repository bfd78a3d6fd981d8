//! Loadout of carried weapons
//!
//! An ordered set of weapon slots with one active slot. Switching unequips the
//! outgoing weapon (aborting its burst and charge) before equipping the new one.

use armory_core::TimeSource;
use tracing::info;

use crate::controller::WeaponController;
use crate::error::LoadoutError;
use crate::input::{InputState, WeaponAction};

/// Default number of weapon slots
pub const DEFAULT_SLOTS: usize = 9;

#[derive(Debug)]
pub struct Loadout {
    weapons: Vec<WeaponController>,
    active: Option<usize>,
    max_slots: usize,
}

impl Default for Loadout {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}

impl Loadout {
    pub fn new(max_slots: usize) -> Self {
        Self {
            weapons: Vec::new(),
            active: None,
            max_slots: max_slots.max(1),
        }
    }

    /// Add a weapon to the next free slot and return its index. The first
    /// weapon added becomes active.
    pub fn add(&mut self, weapon: WeaponController) -> Result<usize, LoadoutError> {
        if self.weapons.len() >= self.max_slots {
            return Err(LoadoutError::Full(self.max_slots));
        }
        if self.position(weapon.name()).is_some() {
            return Err(LoadoutError::Duplicate(weapon.name().to_string()));
        }

        self.weapons.push(weapon);
        let index = self.weapons.len() - 1;
        if self.active.is_none() {
            self.switch_to(index);
        }
        Ok(index)
    }

    /// Make `index` the active slot. Returns false for an empty slot or when it
    /// is already active.
    pub fn switch_to(&mut self, index: usize) -> bool {
        if index >= self.weapons.len() || self.active == Some(index) {
            return false;
        }
        if let Some(current) = self.active_mut() {
            current.unequip();
        }
        self.active = Some(index);
        self.weapons[index].equip();
        info!("Switched to slot {}", index);
        true
    }

    /// Cycle forward (or backward) through the slots, wrapping around
    pub fn cycle(&mut self, forward: bool) -> bool {
        let len = self.weapons.len();
        let Some(current) = self.active else {
            return false;
        };
        if len < 2 {
            return false;
        }
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.switch_to(next)
    }

    /// Route one frame of input: slot cycling, then trigger, charge and
    /// reload on the active weapon. Returns whether the trigger mapped to a
    /// fire attempt.
    pub fn handle_input(&mut self, time: &impl TimeSource, input: &InputState) -> bool {
        if input.is_just_pressed(WeaponAction::NextWeapon) {
            self.cycle(true);
        } else if input.is_just_pressed(WeaponAction::PreviousWeapon) {
            self.cycle(false);
        }

        let Some(weapon) = self.active_mut() else {
            return false;
        };

        if input.is_just_pressed(WeaponAction::Reload) {
            weapon.start_reload_animation();
        }
        if input.is_just_released(WeaponAction::Reload) {
            weapon.stop_reload_animation();
            weapon.reload();
        }

        let fire = input.trigger(WeaponAction::Fire);
        if weapon.config().charge.is_some() {
            weapon.handle_triggers(time, fire, input.trigger(WeaponAction::Charge))
        } else {
            weapon.handle_trigger(time, fire)
        }
    }

    /// Tick every carried weapon so holstered ones keep regenerating
    pub fn tick(&mut self, time: &impl TimeSource) {
        for weapon in &mut self.weapons {
            weapon.tick(time);
        }
    }

    /// Index of the weapon named `name`, if carried
    pub fn position(&self, name: &str) -> Option<usize> {
        self.weapons.iter().position(|w| w.name() == name)
    }

    pub fn get(&self, index: usize) -> Option<&WeaponController> {
        self.weapons.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut WeaponController> {
        self.weapons.get_mut(index)
    }

    /// Carried weapon by name
    pub fn find_mut(&mut self, name: &str) -> Option<&mut WeaponController> {
        self.weapons.iter_mut().find(|w| w.name() == name)
    }

    pub fn active(&self) -> Option<&WeaponController> {
        self.active.and_then(|i| self.weapons.get(i))
    }

    pub fn active_mut(&mut self) -> Option<&mut WeaponController> {
        self.active.and_then(|i| self.weapons.get_mut(i))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeaponController> {
        self.weapons.iter()
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }
}
