//! Recording collaborators for controller tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use armory_core::{Transform, WeaponId};
use glam::{Quat, Vec3};

use crate::config::ClipId;
use crate::hooks::{
    AudioSink, EffectsSink, FlashParent, ProjectileHandle, ShellHandle, ShellPool, ShotEmitter,
    WeaponHooks,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Spawn { origin: Vec3, direction: Vec3 },
    MuzzleFlash { parent: FlashParent },
    AttackAnimation,
    ReloadAnimation(bool),
    OneShot(String),
    Loop(String),
    StopLoop,
    ShellLaunch { shell: usize, impulse: Vec3 },
}

/// Implements every hook trait and logs each call into a shared list
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
    next_id: Rc<Cell<u64>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hooks(&self) -> WeaponHooks {
        WeaponHooks::new(self.clone(), self.clone(), self.clone()).with_shells(self.clone())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn spawns(&self) -> usize {
        self.count(|c| matches!(c, Call::Spawn { .. }))
    }

    pub fn one_shots(&self, clip: &str) -> usize {
        self.count(|c| matches!(c, Call::OneShot(id) if id == clip))
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl ShotEmitter for Recorder {
    fn spawn(&mut self, origin: Vec3, direction: Vec3, _owner: WeaponId) -> ProjectileHandle {
        self.push(Call::Spawn { origin, direction });
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        ProjectileHandle(id)
    }
}

impl EffectsSink for Recorder {
    fn spawn_muzzle_flash(&mut self, _origin: Vec3, _orientation: Quat, parent: FlashParent) {
        self.push(Call::MuzzleFlash { parent });
    }

    fn trigger_attack_animation(&mut self) {
        self.push(Call::AttackAnimation);
    }

    fn set_reload_animation(&mut self, reloading: bool) {
        self.push(Call::ReloadAnimation(reloading));
    }
}

impl AudioSink for Recorder {
    fn play_one_shot(&mut self, clip: &ClipId) {
        self.push(Call::OneShot(clip.as_str().to_string()));
    }

    fn play_loop(&mut self, clip: &ClipId) {
        self.push(Call::Loop(clip.as_str().to_string()));
    }

    fn stop_loop(&mut self) {
        self.push(Call::StopLoop);
    }
}

impl ShellPool for Recorder {
    fn next(&mut self) -> ShellHandle {
        ShellHandle(self.count(|c| matches!(c, Call::ShellLaunch { .. })))
    }

    fn launch(&mut self, shell: ShellHandle, _pose: Transform, impulse: Vec3) {
        self.push(Call::ShellLaunch {
            shell: shell.0,
            impulse,
        });
    }
}
