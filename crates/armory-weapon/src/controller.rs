//! Weapon controller
//!
//! Turns trigger input and simulation ticks into shots. Each tick runs, in
//! order: passive ammo regeneration, charge progression (with optional
//! auto-release), the burst continuation, continuous-fire audio, and muzzle
//! velocity tracking. Shots always go through one routine so ammo, timing,
//! hooks and observers stay in lockstep.

use armory_core::{TimeSource, Transform, WeaponId};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::burst::{BurstSequence, BurstStep};
use crate::config::{ShootType, WeaponConfig};
use crate::error::ConfigError;
use crate::hooks::{FlashParent, ShotEvent, ShotSource, WeaponHooks};
use crate::input::TriggerInput;
use crate::observers::ShotObservers;
use crate::shells::ShellRing;
use crate::spread;
use crate::state::WeaponState;

/// Coarse state of the fire state machine, derived from the live flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FireState {
    Idle,
    /// Passive regeneration is refilling the clip
    Cooling,
    Charging,
    BurstActive,
}

pub struct WeaponController {
    id: WeaponId,
    config: WeaponConfig,
    state: WeaponState,
    burst: BurstSequence,
    hooks: WeaponHooks,
    observers: ShotObservers,
    rng: StdRng,
    muzzle: Transform,
    ejection_port: Transform,
    last_muzzle_position: Vec3,
    muzzle_world_velocity: Vec3,
    is_active: bool,
    has_fired: bool,
    loop_playing: bool,
    total_shots: u64,
}

impl WeaponController {
    /// Build a controller for a validated definition. Physical-bullet weapons
    /// without a shell pool in `hooks` get a [`ShellRing`] of the configured size.
    pub fn new(config: WeaponConfig, mut hooks: WeaponHooks) -> Result<Self, ConfigError> {
        config.validate()?;

        if let Some(physical) = &config.ammo.physical_bullets {
            if hooks.shells.is_none() {
                hooks.shells = Some(Box::new(ShellRing::new(physical.shell_pool_size)));
            }
        }

        let state = WeaponState::from_config(&config);
        Ok(Self {
            id: WeaponId::new(),
            config,
            state,
            burst: BurstSequence::new(),
            hooks,
            observers: ShotObservers::new(),
            rng: StdRng::from_entropy(),
            muzzle: Transform::default(),
            ejection_port: Transform::default(),
            last_muzzle_position: Vec3::ZERO,
            muzzle_world_velocity: Vec3::ZERO,
            is_active: false,
            has_fired: false,
            loop_playing: false,
            total_shots: 0,
        })
    }

    /// Use a fixed seed for spread sampling so runs are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // ------------------------------------------------------------------
    // Host surface
    // ------------------------------------------------------------------

    /// Show the weapon and play its change sound
    pub fn equip(&mut self) {
        self.is_active = true;
        if let Some(clip) = &self.config.audio.change_weapon {
            self.hooks.audio.play_one_shot(clip);
        }
        info!("Equipped {}", self.config.name);
    }

    /// Hide the weapon, aborting anything in flight. A charge in progress is
    /// dropped without firing; the ammo it consumed stays spent.
    pub fn unequip(&mut self) {
        self.cancel_burst();
        if self.state.is_charging() {
            debug!(charge = self.state.current_charge(), "Charge abandoned");
            self.state.end_charge();
        }
        if self.loop_playing {
            self.hooks.audio.stop_loop();
            self.loop_playing = false;
        }
        self.state.wants_to_shoot = false;
        self.is_active = false;
        info!("Unequipped {}", self.config.name);
    }

    /// Advance the weapon by the time source's current delta
    pub fn tick(&mut self, time: &impl TimeSource) {
        let dt = time.delta();
        let now = time.now();

        self.update_ammo(dt, now);

        let full = self.update_charge(dt, now);
        let auto_release = self
            .config
            .charge
            .as_ref()
            .is_some_and(|charge| charge.auto_release_on_full_charge);
        if full && auto_release {
            self.release_charge(time);
        }

        self.advance_burst(dt, now);
        self.update_continuous_sound();

        if dt > 0.0 {
            self.muzzle_world_velocity = (self.muzzle.position - self.last_muzzle_position) / dt;
            self.last_muzzle_position = self.muzzle.position;
        }
    }

    /// Route one frame of trigger edges into the weapon's fire mode. Returns
    /// whether the input mapped to a fire attempt (not whether a shot fired).
    pub fn handle_input(&mut self, time: &impl TimeSource, down: bool, held: bool, _up: bool) -> bool {
        self.state.wants_to_shoot = down || held;

        match self.config.shoot_type {
            ShootType::Automatic if held => {
                self.try_shoot(time);
                true
            }
            ShootType::SemiAutomatic if down => {
                self.try_shoot(time);
                true
            }
            ShootType::Burst if held => {
                self.try_shoot_burst(time);
                true
            }
            _ => false,
        }
    }

    pub fn handle_trigger(&mut self, time: &impl TimeSource, input: TriggerInput) -> bool {
        self.handle_input(time, input.down, input.held, input.up)
    }

    /// Charge on press, fire on release. Returns whether a charge started or released.
    pub fn handle_charge_input(&mut self, time: &impl TimeSource, input: TriggerInput) -> bool {
        self.state.wants_to_shoot = input.down || input.held;
        if input.down {
            self.begin_charge(time)
        } else if input.up {
            self.release_charge(time)
        } else {
            false
        }
    }

    /// Route both triggers of a charge-capable weapon for one frame. The
    /// weapon wants to shoot while either trigger is down. Returns whether the
    /// fire trigger mapped to a fire attempt.
    pub fn handle_triggers(
        &mut self,
        time: &impl TimeSource,
        fire: TriggerInput,
        charge: TriggerInput,
    ) -> bool {
        self.handle_charge_input(time, charge);
        let attempted = self.handle_trigger(time, fire);
        self.state.wants_to_shoot = fire.down || fire.held || charge.down || charge.held;
        attempted
    }

    /// Fire once if there is a whole round in the clip and the shot delay has passed
    pub fn try_shoot(&mut self, time: &impl TimeSource) -> bool {
        let now = time.now();
        if self.state.current_ammo() >= 1.0
            && self.state.cooldown_elapsed(now, self.config.delay_between_shots)
        {
            self.handle_shoot(now, ShotSource::Single);
            true
        } else {
            false
        }
    }

    /// Start a burst; its first shot fires immediately. Fails while a previous
    /// burst or its cooldown is still running.
    pub fn try_shoot_burst(&mut self, time: &impl TimeSource) -> bool {
        if !self.burst.start() {
            return false;
        }
        self.advance_burst(0.0, time.now());
        true
    }

    /// Abort an in-flight burst. Does nothing when no burst is active.
    pub fn cancel_burst(&mut self) -> bool {
        self.burst.cancel()
    }

    pub fn begin_charge(&mut self, time: &impl TimeSource) -> bool {
        let Some(charge) = &self.config.charge else {
            return false;
        };
        let now = time.now();
        let cost = charge.ammo_on_start_charge;
        let ammo = self.state.current_ammo();
        let bullets_left = ((ammo - cost) * self.config.bullets_per_shot as f32).floor();

        if self.state.is_charging()
            || ammo < cost
            || bullets_left <= 0.0
            || !self.state.cooldown_elapsed(now, self.config.delay_between_shots)
        {
            return false;
        }

        self.state.use_ammo(cost, now);
        self.state.start_charge(now);
        debug!(weapon = %self.config.name, cost, "Charge started");
        true
    }

    /// Fire the charged shot. The shot still costs its whole round on top of
    /// whatever the charge consumed.
    pub fn release_charge(&mut self, time: &impl TimeSource) -> bool {
        if !self.state.is_charging() {
            return false;
        }
        let charge = self.state.current_charge();
        self.handle_shoot(time.now(), ShotSource::ChargeRelease { charge });
        self.state.end_charge();
        debug!(weapon = %self.config.name, charge, "Charge released");
        true
    }

    /// Finish a manual reload: refill the clip from carried physical rounds
    pub fn reload(&mut self) {
        if self.config.ammo.physical_bullets.is_some() && self.state.reload_from_carried() {
            info!(
                "Reloaded {} to {} rounds",
                self.config.name,
                self.state.whole_ammo()
            );
        }
        self.state.is_reloading = false;
    }

    pub fn start_reload_animation(&mut self) {
        self.state.is_reloading = true;
        self.hooks.effects.set_reload_animation(true);
        if let Some(clip) = &self.config.audio.manual_reload {
            self.hooks.audio.play_one_shot(clip);
        }
    }

    pub fn stop_reload_animation(&mut self) {
        self.hooks.effects.set_reload_animation(false);
    }

    pub fn add_reserve_ammo(&mut self, amount: u32) {
        self.state.add_reserve_ammo(amount);
    }

    pub fn add_carried_bullets(&mut self, count: i64) {
        self.state.add_carried_bullets(count);
    }

    /// Move the muzzle (shot origin and facing)
    pub fn set_muzzle(&mut self, muzzle: Transform) {
        self.muzzle = muzzle;
    }

    /// Move the shell ejection port
    pub fn set_ejection_port(&mut self, port: Transform) {
        self.ejection_port = port;
    }

    /// Read and clear the "fired since last asked" flag used for recoil
    pub fn take_has_fired(&mut self) -> bool {
        std::mem::take(&mut self.has_fired)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn id(&self) -> WeaponId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    pub fn state(&self) -> &WeaponState {
        &self.state
    }

    pub fn burst(&self) -> &BurstSequence {
        &self.burst
    }

    pub fn observers_mut(&mut self) -> &mut ShotObservers {
        &mut self.observers
    }

    pub fn fire_state(&self) -> FireState {
        if self.burst.is_shooting_burst() {
            FireState::BurstActive
        } else if self.state.is_charging() {
            FireState::Charging
        } else if self.state.is_cooling() {
            FireState::Cooling
        } else {
            FireState::Idle
        }
    }

    pub fn ammo_ratio(&self) -> f32 {
        self.state.ammo_ratio()
    }

    pub fn carried_physical_bullets(&self) -> u32 {
        self.state.carried_physical_bullets()
    }

    pub fn is_charging(&self) -> bool {
        self.state.is_charging()
    }

    pub fn current_charge(&self) -> f32 {
        self.state.current_charge()
    }

    pub fn is_cooling(&self) -> bool {
        self.state.is_cooling()
    }

    pub fn is_reloading(&self) -> bool {
        self.state.is_reloading()
    }

    pub fn is_shooting_burst(&self) -> bool {
        self.burst.is_shooting_burst()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn muzzle_world_velocity(&self) -> Vec3 {
        self.muzzle_world_velocity
    }

    /// Shots fired over the weapon's lifetime
    pub fn total_shots(&self) -> u64 {
        self.total_shots
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn update_ammo(&mut self, dt: f32, now: f64) {
        let mut regenerated = false;
        if self.state.regen_active(&self.config, now) {
            // Only the part of the tick after the reload delay ran out counts
            let since_ready =
                self.state.time_since_shot(now) - self.config.ammo.reload_delay_after_shot;
            let amount = self.config.ammo.reload_rate * dt.min(since_ready);
            if amount > 0.0 {
                self.state.regenerate(amount);
                regenerated = true;
            }
        }
        self.state.is_cooling = regenerated;
    }

    /// Accrue charge for this tick if the clip can pay for it. Returns whether
    /// the charge is full.
    fn update_charge(&mut self, dt: f32, now: f64) -> bool {
        let Some(charge) = &self.config.charge else {
            return false;
        };
        if !self.state.is_charging() {
            return false;
        }

        let current = self.state.current_charge();
        if current < 1.0 {
            let left = 1.0 - current;
            let added = if charge.max_charge_duration <= 0.0 {
                left
            } else {
                dt / charge.max_charge_duration
            }
            .clamp(0.0, left);

            let cost = added * charge.ammo_rate_while_charging;
            if cost <= self.state.current_ammo() {
                self.state.use_ammo(cost, now);
                self.state.add_charge(added);
            }
        }

        self.state.current_charge() >= 1.0
    }

    fn advance_burst(&mut self, dt: f32, now: f64) {
        let mut budget = dt;
        loop {
            let has_ammo = self.state.current_ammo() > 0.0;
            match self.burst.poll(&mut budget, &self.config.burst, has_ammo) {
                BurstStep::Fire => {
                    let shot = self.burst.shots_fired().saturating_sub(1);
                    self.handle_shoot(now, ShotSource::Burst { shot });
                }
                BurstStep::Continue => {}
                BurstStep::Waiting | BurstStep::Finished | BurstStep::Idle => break,
            }
        }
    }

    fn update_continuous_sound(&mut self) {
        let Some(continuous) = &self.config.audio.continuous else {
            return;
        };

        if self.state.wants_to_shoot() && self.state.current_ammo() >= 1.0 {
            if !self.loop_playing {
                if let Some(shoot) = &self.config.audio.shoot {
                    self.hooks.audio.play_one_shot(shoot);
                }
                self.hooks.audio.play_one_shot(&continuous.start);
                self.hooks.audio.play_loop(&continuous.loop_clip);
                self.loop_playing = true;
            }
        } else if self.loop_playing {
            self.hooks.audio.play_one_shot(&continuous.end);
            self.hooks.audio.stop_loop();
            self.loop_playing = false;
        }
    }

    fn handle_shoot(&mut self, now: f64, source: ShotSource) {
        self.state.spend_round();
        self.has_fired = true;

        let origin = self.muzzle.position;
        let forward = self.muzzle.forward();
        let mut projectiles = Vec::with_capacity(self.config.bullets_per_shot as usize);
        for _ in 0..self.config.bullets_per_shot {
            let direction =
                spread::shot_direction(forward, self.config.spread_angle_degrees, &mut self.rng);
            projectiles.push(self.hooks.emitter.spawn(origin, direction, self.id));
        }

        if let Some(flash) = &self.config.muzzle_flash {
            let parent = if flash.detach_on_spawn {
                FlashParent::World
            } else {
                FlashParent::Muzzle
            };
            self.hooks
                .effects
                .spawn_muzzle_flash(origin, self.muzzle.rotation, parent);
        }

        if let Some(physical) = &self.config.ammo.physical_bullets {
            if let Some(shells) = self.hooks.shells.as_mut() {
                let shell = shells.next();
                let impulse = self.ejection_port.up() * physical.ejection_force;
                shells.launch(shell, self.ejection_port, impulse);
            }
            self.state.add_carried_bullets(-1);
        }

        self.state.mark_shot(now);

        if self.config.audio.continuous.is_none() {
            if let Some(clip) = &self.config.audio.shoot {
                self.hooks.audio.play_one_shot(clip);
            }
        }
        self.hooks.effects.trigger_attack_animation();

        self.total_shots += 1;
        debug!(
            weapon = %self.config.name,
            ?source,
            ammo = self.state.current_ammo(),
            "Shot fired"
        );

        let event = ShotEvent {
            weapon: self.id,
            source,
            time: now,
            origin,
            projectiles,
            remaining_ammo: self.state.current_ammo(),
        };
        self.observers.notify(&event);
    }
}

impl std::fmt::Debug for WeaponController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeaponController")
            .field("id", &self.id)
            .field("name", &self.config.name)
            .field("state", &self.state)
            .field("burst", &self.burst)
            .field("is_active", &self.is_active)
            .finish()
    }
}
