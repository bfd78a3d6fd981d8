//! Collaborator interfaces the controller calls when a shot actually happens
//!
//! Projectiles, visual effects, sound and shell casings belong to the host.
//! The controller only asks for them through these traits, once per shot.

use armory_core::{Transform, WeaponId};
use glam::{Quat, Vec3};

use crate::config::ClipId;

/// Handle to a projectile the host spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileHandle(pub u64);

/// Handle to a pooled shell casing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShellHandle(pub usize);

/// Where a freshly spawned muzzle flash lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashParent {
    /// Follows the muzzle as the weapon moves
    Muzzle,
    /// Stays where it was spawned
    World,
}

/// Spawns projectiles. Must not block.
pub trait ShotEmitter {
    fn spawn(&mut self, origin: Vec3, direction: Vec3, owner: WeaponId) -> ProjectileHandle;
}

/// Visual feedback; every effect expires on its own.
pub trait EffectsSink {
    fn spawn_muzzle_flash(&mut self, origin: Vec3, orientation: Quat, parent: FlashParent);

    /// Fire the weapon's attack animation trigger
    fn trigger_attack_animation(&mut self) {}

    /// Raise or lower the reload animation flag
    fn set_reload_animation(&mut self, _reloading: bool) {}
}

pub trait AudioSink {
    fn play_one_shot(&mut self, clip: &ClipId);
    fn play_loop(&mut self, clip: &ClipId);
    fn stop_loop(&mut self);
}

/// A fixed set of shell casings handed out round-robin
pub trait ShellPool {
    fn next(&mut self) -> ShellHandle;

    /// Reposition `shell` at `pose`, activate it and push it with `impulse`
    fn launch(&mut self, shell: ShellHandle, pose: Transform, impulse: Vec3);
}

/// What produced a shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotSource {
    Single,
    Burst { shot: u32 },
    ChargeRelease { charge: f32 },
}

/// Everything observers learn about one shot
#[derive(Debug, Clone, PartialEq)]
pub struct ShotEvent {
    pub weapon: WeaponId,
    pub source: ShotSource,
    pub time: f64,
    pub origin: Vec3,
    pub projectiles: Vec<ProjectileHandle>,
    /// Clip ammo left after the shot
    pub remaining_ammo: f32,
}

/// The set of collaborators one weapon talks to
pub struct WeaponHooks {
    pub emitter: Box<dyn ShotEmitter>,
    pub effects: Box<dyn EffectsSink>,
    pub audio: Box<dyn AudioSink>,
    /// Shell pool for physical-bullet weapons. When left empty the controller
    /// builds a [`crate::ShellRing`] sized from the weapon definition.
    pub shells: Option<Box<dyn ShellPool>>,
}

impl WeaponHooks {
    pub fn new(
        emitter: impl ShotEmitter + 'static,
        effects: impl EffectsSink + 'static,
        audio: impl AudioSink + 'static,
    ) -> Self {
        Self {
            emitter: Box::new(emitter),
            effects: Box::new(effects),
            audio: Box::new(audio),
            shells: None,
        }
    }

    pub fn with_shells(mut self, shells: impl ShellPool + 'static) -> Self {
        self.shells = Some(Box::new(shells));
        self
    }

    /// Hooks that discard every request
    pub fn silent() -> Self {
        Self::new(Silent::default(), Silent::default(), Silent::default())
    }
}

/// Collaborator that accepts every request and does nothing with it
#[derive(Debug, Default)]
pub struct Silent {
    next_projectile: u64,
}

impl ShotEmitter for Silent {
    fn spawn(&mut self, _origin: Vec3, _direction: Vec3, _owner: WeaponId) -> ProjectileHandle {
        self.next_projectile += 1;
        ProjectileHandle(self.next_projectile)
    }
}

impl EffectsSink for Silent {
    fn spawn_muzzle_flash(&mut self, _origin: Vec3, _orientation: Quat, _parent: FlashParent) {}
}

impl AudioSink for Silent {
    fn play_one_shot(&mut self, _clip: &ClipId) {}
    fn play_loop(&mut self, _clip: &ClipId) {}
    fn stop_loop(&mut self) {}
}
