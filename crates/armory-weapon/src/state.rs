//! Live ammunition, charge and timing counters for one weapon instance

use crate::config::{WeaponConfig, INFINITE_CLIP};

/// Charge values this close to full snap to exactly 1.0 so float drift over
/// many ticks can't leave a charge stuck a hair below full.
const CHARGE_SNAP: f32 = 1e-5;

/// Counters owned by a single weapon. Only the controller mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponState {
    clip_capacity: u32,
    reserve_capacity: f32,
    current_ammo: f32,
    reserve_ammo: f32,
    carried_physical_bullets: u32,
    last_shot_time: f64,
    last_charge_start_time: f64,
    current_charge: f32,
    pub(crate) is_charging: bool,
    pub(crate) is_cooling: bool,
    pub(crate) is_reloading: bool,
    pub(crate) wants_to_shoot: bool,
}

impl WeaponState {
    /// Fresh state for a weapon being equipped: a full clip, half the reserve,
    /// and a full clip's worth of carried rounds.
    pub fn new(clip_capacity: u32) -> Self {
        let clip_capacity = clip_capacity.max(1);
        let reserve_capacity = clip_capacity as f32 * 4.0;
        Self {
            clip_capacity,
            reserve_capacity,
            current_ammo: clip_capacity as f32,
            reserve_ammo: reserve_capacity / 2.0,
            carried_physical_bullets: clip_capacity,
            last_shot_time: f64::NEG_INFINITY,
            last_charge_start_time: f64::NEG_INFINITY,
            current_charge: 0.0,
            is_charging: false,
            is_cooling: false,
            is_reloading: false,
            wants_to_shoot: false,
        }
    }

    pub fn from_config(config: &WeaponConfig) -> Self {
        Self::new(config.ammo.clip_capacity)
    }

    /// Spend `amount` of clip ammo and the matching number of carried rounds,
    /// and stamp the shot time.
    pub fn use_ammo(&mut self, amount: f32, now: f64) {
        let capacity = self.clip_capacity as f32;
        self.current_ammo = (self.current_ammo - amount).clamp(0.0, capacity);

        let carried = self.carried_physical_bullets as i64 - amount.round_ties_even() as i64;
        self.carried_physical_bullets = carried.clamp(0, self.clip_capacity as i64) as u32;

        self.last_shot_time = now;
    }

    /// Add pickup ammo to the reserve. Anything past the reserve capacity is dropped.
    pub fn add_reserve_ammo(&mut self, amount: u32) {
        self.reserve_ammo = (self.reserve_ammo + amount as f32).min(self.reserve_capacity);
    }

    /// Add (or with a negative count, remove) carried physical rounds.
    pub fn add_carried_bullets(&mut self, count: i64) {
        let carried = self.carried_physical_bullets as i64 + count;
        self.carried_physical_bullets = carried.clamp(0, self.clip_capacity as i64) as u32;
    }

    /// Take the whole unit of clip ammo a shot costs.
    pub(crate) fn spend_round(&mut self) {
        self.current_ammo = (self.current_ammo - 1.0).max(0.0);
    }

    pub(crate) fn mark_shot(&mut self, now: f64) {
        self.last_shot_time = now;
    }

    /// Passive regeneration, capped at the clip capacity
    pub(crate) fn regenerate(&mut self, amount: f32) {
        let capacity = self.clip_capacity as f32;
        self.current_ammo = (self.current_ammo + amount).clamp(0.0, capacity);
    }

    /// Refill the clip from carried rounds. Returns whether any ammo moved.
    pub(crate) fn reload_from_carried(&mut self) -> bool {
        if self.carried_physical_bullets == 0 {
            return false;
        }
        self.current_ammo = self.carried_physical_bullets.min(self.clip_capacity) as f32;
        true
    }

    pub(crate) fn start_charge(&mut self, now: f64) {
        self.is_charging = true;
        self.current_charge = 0.0;
        self.last_charge_start_time = now;
    }

    pub(crate) fn add_charge(&mut self, amount: f32) {
        let charge = (self.current_charge + amount).clamp(0.0, 1.0);
        self.current_charge = if charge > 1.0 - CHARGE_SNAP { 1.0 } else { charge };
    }

    pub(crate) fn end_charge(&mut self) {
        self.is_charging = false;
        self.current_charge = 0.0;
    }

    pub fn clip_capacity(&self) -> u32 {
        self.clip_capacity
    }

    pub fn reserve_capacity(&self) -> f32 {
        self.reserve_capacity
    }

    pub fn current_ammo(&self) -> f32 {
        self.current_ammo
    }

    /// Clip ammo in whole display units
    pub fn whole_ammo(&self) -> u32 {
        self.current_ammo.floor() as u32
    }

    pub fn reserve_ammo(&self) -> f32 {
        self.reserve_ammo
    }

    pub fn carried_physical_bullets(&self) -> u32 {
        self.carried_physical_bullets
    }

    pub fn last_shot_time(&self) -> f64 {
        self.last_shot_time
    }

    pub fn last_charge_start_time(&self) -> f64 {
        self.last_charge_start_time
    }

    pub fn current_charge(&self) -> f32 {
        self.current_charge
    }

    pub fn is_charging(&self) -> bool {
        self.is_charging
    }

    pub fn is_cooling(&self) -> bool {
        self.is_cooling
    }

    pub fn is_reloading(&self) -> bool {
        self.is_reloading
    }

    pub fn wants_to_shoot(&self) -> bool {
        self.wants_to_shoot
    }

    pub fn is_clip_full(&self) -> bool {
        self.current_ammo >= self.clip_capacity as f32
    }

    pub fn is_reserve_full(&self) -> bool {
        self.reserve_ammo >= self.reserve_capacity
    }

    /// Clip fill as a 0.0-1.0 fraction; always 1.0 for an infinite clip
    pub fn ammo_ratio(&self) -> f32 {
        if self.clip_capacity == INFINITE_CLIP {
            return 1.0;
        }
        self.current_ammo / self.clip_capacity as f32
    }

    /// Whether `delay` seconds have passed since the last shot. Compared in
    /// the delay's own precision so a shot exactly one delay later is allowed.
    pub fn cooldown_elapsed(&self, now: f64, delay: f32) -> bool {
        self.time_since_shot(now) >= delay
    }

    /// Seconds since the last shot; infinite before the first one
    pub fn time_since_shot(&self, now: f64) -> f32 {
        (now - self.last_shot_time) as f32
    }

    /// Whether passive regeneration applies at `now`
    pub fn regen_active(&self, config: &WeaponConfig, now: f64) -> bool {
        config.ammo.automatic_reload
            && !self.is_charging
            && !self.is_clip_full()
            && self.cooldown_elapsed(now, config.ammo.reload_delay_after_shot)
    }
}
