//! Armory - Headless weapon simulation
//!
//! Loads weapon definitions, builds a loadout and drives it through a scripted
//! sequence of trigger presses on a fixed timestep, logging every request the
//! weapons make of the host.

mod definitions;
mod host;
mod logging;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use armory_core::{GameTime, ManualClock, TimeSource, Transform};
use armory_weapon::{AmmoPickup, InputState, Loadout, WeaponAction, WeaponConfig, WeaponController};
use glam::Vec3;
use tracing::{info, warn};

use host::LogHost;
use settings::HostSettings;

/// One scripted input event
#[derive(Debug, Clone, Copy)]
struct Cue {
    at: f64,
    action: WeaponAction,
    press: bool,
}

const fn cue(at: f64, action: WeaponAction, press: bool) -> Cue {
    Cue { at, action, press }
}

/// Exercises every fire mode of the built-in presets in loadout order
const SCRIPT: &[Cue] = &[
    cue(0.0, WeaponAction::Fire, true),
    cue(0.1, WeaponAction::Fire, false),
    cue(0.5, WeaponAction::NextWeapon, true),
    cue(0.55, WeaponAction::NextWeapon, false),
    cue(0.6, WeaponAction::Fire, true),
    cue(1.4, WeaponAction::Fire, false),
    cue(1.5, WeaponAction::Reload, true),
    cue(1.9, WeaponAction::Reload, false),
    cue(2.0, WeaponAction::NextWeapon, true),
    cue(2.05, WeaponAction::NextWeapon, false),
    cue(2.1, WeaponAction::Fire, true),
    cue(2.9, WeaponAction::Fire, false),
    cue(3.0, WeaponAction::NextWeapon, true),
    cue(3.05, WeaponAction::NextWeapon, false),
    cue(3.1, WeaponAction::Fire, true),
    cue(3.2, WeaponAction::Fire, false),
    cue(3.5, WeaponAction::NextWeapon, true),
    cue(3.55, WeaponAction::NextWeapon, false),
    cue(3.6, WeaponAction::Charge, true),
    cue(4.0, WeaponAction::Charge, false),
    cue(4.5, WeaponAction::Charge, true),
    cue(5.5, WeaponAction::Charge, false),
];

fn main() -> Result<()> {
    // Logging first so settings fallbacks are reported
    let log_filter = logging::init()?;
    let settings = HostSettings::load();
    logging::apply_level(&log_filter, &settings.logging.level);

    info!("Starting Armory simulation...");

    let weapons_file = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.weapons_file.clone());
    let configs = match &weapons_file {
        Some(path) => definitions::load(path)?,
        None => {
            info!("No weapons file configured, using built-in presets");
            WeaponConfig::presets()
        }
    };

    let host = LogHost::new();
    let loadout = build_loadout(configs, &host, settings.simulation.seed)?;
    let loadout = run(loadout, &settings)?;

    let stats = host.stats();
    info!(
        "Simulation finished: {} projectiles, {} muzzle flashes, {} sounds",
        stats.projectiles, stats.muzzle_flashes, stats.sounds
    );
    for weapon in loadout.iter() {
        info!(
            "{}: {} shots, clip {}/{}, reserve {}",
            weapon.name(),
            weapon.total_shots(),
            weapon.state().whole_ammo(),
            weapon.state().clip_capacity(),
            weapon.state().reserve_ammo()
        );
    }

    if !HostSettings::settings_path().is_some_and(|p| p.exists()) {
        if let Err(e) = settings.save() {
            warn!("Failed to save default settings: {}", e);
        }
    }

    Ok(())
}

fn build_loadout(configs: Vec<WeaponConfig>, host: &LogHost, seed: Option<u64>) -> Result<Loadout> {
    let mut loadout = Loadout::new(configs.len());
    for (i, config) in configs.into_iter().enumerate() {
        let name = config.name.clone();
        let mut weapon = WeaponController::new(config, host.hooks())
            .with_context(|| format!("Invalid weapon '{}'", name))?;
        if let Some(seed) = seed {
            weapon = weapon.with_seed(seed.wrapping_add(i as u64));
        }
        weapon.set_muzzle(Transform::from_position(Vec3::new(0.2, 1.5, -0.6)));
        weapon.set_ejection_port(Transform::from_position(Vec3::new(0.25, 1.55, -0.3)));
        weapon.observers_mut().on_shot_processed(|event| {
            tracing::debug!(
                source = ?event.source,
                projectiles = event.projectiles.len(),
                ammo = event.remaining_ammo,
                "Shot processed"
            );
        });
        loadout.add(weapon)?;
    }
    Ok(loadout)
}

/// Drive the loadout through the script on a fixed timestep
fn run(mut loadout: Loadout, settings: &HostSettings) -> Result<Loadout> {
    let sim = &settings.simulation;
    let mut time = GameTime::new(sim.time.clone());
    let step = time.config.fixed_timestep;
    let mut clock = ManualClock::new();
    let mut input = InputState::new();
    let mut cues = SCRIPT.iter().peekable();
    let mut pickup_given = false;

    // Frames arrive at the fixed rate; the accumulator splits them into ticks
    while time.now() < sim.duration as f64 {
        time.update(step);
        for _ in 0..time.fixed_steps() {
            clock.advance(step);

            while let Some(next) = cues.next_if(|c| c.at <= clock.now()) {
                if next.press {
                    input.press(next.action);
                } else {
                    input.release(next.action);
                }
            }

            loadout.handle_input(&clock, &input);
            loadout.tick(&clock);
            input.clear_frame();

            if !pickup_given && clock.now() >= 5.0 {
                pickup_given = true;
                let pickup = AmmoPickup::new(
                    loadout.active().map(|w| w.name().to_string()).unwrap_or_default(),
                    20,
                );
                if pickup.apply_to_loadout(&mut loadout) {
                    info!("Picked up {} rounds for {}", pickup.amount, pickup.weapon);
                }
            }
        }

        if time.frame_count > 1_000_000 {
            anyhow::bail!("Simulation did not finish");
        }
    }

    Ok(loadout)
}
