//! Reserve ammo pickups

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::controller::WeaponController;
use crate::loadout::Loadout;

/// Ammo lying in the world for one named weapon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoPickup {
    /// Name of the weapon these rounds fit
    pub weapon: String,
    pub amount: u32,
}

impl AmmoPickup {
    pub fn new(weapon: impl Into<String>, amount: u32) -> Self {
        Self {
            weapon: weapon.into(),
            amount,
        }
    }

    /// Give the rounds to `weapon` if it is the right weapon and its reserve
    /// has room. Returns whether the pickup was consumed.
    pub fn apply(&self, weapon: &mut WeaponController) -> bool {
        if weapon.name() != self.weapon || weapon.state().is_reserve_full() {
            return false;
        }
        weapon.add_reserve_ammo(self.amount);
        debug!(weapon = %self.weapon, amount = self.amount, "Ammo picked up");
        true
    }

    /// Apply to the matching weapon in `loadout`, if carried
    pub fn apply_to_loadout(&self, loadout: &mut Loadout) -> bool {
        loadout
            .find_mut(&self.weapon)
            .is_some_and(|weapon| self.apply(weapon))
    }
}
