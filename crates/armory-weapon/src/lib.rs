//! Armory Weapon - Weapon firing and ammunition
//!
//! Provides the per-weapon fire controller and everything it drives:
//! - Weapon definitions with validation and built-in presets
//! - Ammunition, charge and timing state
//! - Automatic, semi-automatic, burst and charge-and-release fire
//! - Collaborator traits for projectiles, effects, audio and shell casings
//! - Shot observers, loadouts and ammo pickups

pub mod burst;
pub mod config;
pub mod controller;
pub mod error;
pub mod hooks;
pub mod input;
pub mod loadout;
pub mod observers;
pub mod pickup;
pub mod shells;
pub mod spread;
pub mod state;

#[cfg(test)]
mod test_support;

pub use burst::{BurstPhase, BurstSequence, BurstStep};
pub use config::{
    AmmoConfig, BurstConfig, ChargeConfig, ClipId, ContinuousShootAudio, MuzzleFlashConfig,
    PhysicalBulletConfig, ShootType, WeaponAudio, WeaponConfig, INFINITE_CLIP,
};
pub use controller::{FireState, WeaponController};
pub use error::{ConfigError, LoadoutError};
pub use hooks::{
    AudioSink, EffectsSink, FlashParent, ProjectileHandle, ShellHandle, ShellPool, ShotEmitter,
    ShotEvent, ShotSource, Silent, WeaponHooks,
};
pub use input::{InputState, TriggerInput, WeaponAction};
pub use loadout::Loadout;
pub use observers::{ShotObservers, SubscriptionId};
pub use pickup::AmmoPickup;
pub use shells::{ShellLaunch, ShellRing};
pub use state::WeaponState;
