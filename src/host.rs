//! Headless collaborators that report weapon requests through `tracing`
//!
//! Stand-ins for the projectile, effects and audio systems of a real game.
//! Every request is logged and tallied so the run can print a summary.

use std::cell::RefCell;
use std::rc::Rc;

use armory_core::WeaponId;
use armory_weapon::{
    AudioSink, ClipId, EffectsSink, FlashParent, ProjectileHandle, ShotEmitter, WeaponHooks,
};
use glam::{Quat, Vec3};
use tracing::{debug, trace};

/// Running totals of everything the weapons asked the host for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostStats {
    pub projectiles: u64,
    pub muzzle_flashes: u64,
    pub sounds: u64,
    /// Loops currently playing
    pub active_loops: u32,
}

/// Shared handle to the tallies, cloned into each collaborator
#[derive(Debug, Clone, Default)]
pub struct LogHost {
    stats: Rc<RefCell<HostStats>>,
}

impl LogHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks for one weapon, all reporting into this host
    pub fn hooks(&self) -> WeaponHooks {
        WeaponHooks::new(self.clone(), self.clone(), self.clone())
    }

    pub fn stats(&self) -> HostStats {
        self.stats.borrow().clone()
    }
}

impl ShotEmitter for LogHost {
    fn spawn(&mut self, origin: Vec3, direction: Vec3, owner: WeaponId) -> ProjectileHandle {
        let mut stats = self.stats.borrow_mut();
        stats.projectiles += 1;
        trace!(%owner, ?origin, ?direction, "Projectile spawned");
        ProjectileHandle(stats.projectiles)
    }
}

impl EffectsSink for LogHost {
    fn spawn_muzzle_flash(&mut self, origin: Vec3, _orientation: Quat, parent: FlashParent) {
        self.stats.borrow_mut().muzzle_flashes += 1;
        trace!(?origin, ?parent, "Muzzle flash");
    }

    fn set_reload_animation(&mut self, reloading: bool) {
        debug!(reloading, "Reload animation");
    }
}

impl AudioSink for LogHost {
    fn play_one_shot(&mut self, clip: &ClipId) {
        self.stats.borrow_mut().sounds += 1;
        debug!("Playing sound {}", clip);
    }

    fn play_loop(&mut self, clip: &ClipId) {
        self.stats.borrow_mut().active_loops += 1;
        debug!("Looping sound {}", clip);
    }

    fn stop_loop(&mut self) {
        let mut stats = self.stats.borrow_mut();
        stats.active_loops = stats.active_loops.saturating_sub(1);
        debug!("Stopped looping sound");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armory_core::ManualClock;
    use armory_weapon::{WeaponConfig, WeaponController};

    #[test]
    fn test_tallies_shotgun_blast() {
        let host = LogHost::new();
        let mut weapon = WeaponController::new(WeaponConfig::shotgun(), host.hooks())
            .unwrap()
            .with_seed(5);
        weapon.try_shoot(&ManualClock::new());

        let stats = host.stats();
        assert_eq!(stats.projectiles, 8);
        assert_eq!(stats.muzzle_flashes, 1);
        assert_eq!(stats.sounds, 1);
    }

    #[test]
    fn test_loop_count_never_underflows() {
        let mut host = LogHost::new();
        host.stop_loop();
        host.play_loop(&ClipId::new("hum"));
        assert_eq!(host.stats().active_loops, 1);
        host.stop_loop();
        host.stop_loop();
        assert_eq!(host.stats().active_loops, 0);
    }
}
