//! Weapon definitions
//!
//! Static tuning for a weapon: fire mode, rates, ammo handling, burst and
//! charge parameters, and the audio clips it asks the host to play. Definitions
//! are plain serde data so they can live in TOML or JSON files; every field
//! has a default so a file only needs to name what it changes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Clip capacity that marks a weapon as never running dry. The ammo ratio of
/// such a weapon is always reported as full.
pub const INFINITE_CLIP: u32 = u32::MAX;

/// How a held or pressed trigger turns into shots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShootType {
    /// Fires repeatedly while the trigger is held
    #[default]
    Automatic,
    /// Fires once per trigger press
    SemiAutomatic,
    /// Fires a fixed-length burst while the trigger is held
    Burst,
}

impl ShootType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Automatic => "Automatic",
            Self::SemiAutomatic => "Semi-Automatic",
            Self::Burst => "Burst",
        }
    }
}

/// Identifier of an audio clip known to the host's audio backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Clip sizes, passive regeneration and physical rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmmoConfig {
    /// Rounds held in the clip
    pub clip_capacity: u32,
    /// Regenerate clip ammo over time after a pause in firing
    pub automatic_reload: bool,
    /// Ammo regenerated per second
    pub reload_rate: f32,
    /// Seconds after the last shot before regeneration starts
    pub reload_delay_after_shot: f32,
    /// Present when the weapon tracks physical rounds and ejects shells
    pub physical_bullets: Option<PhysicalBulletConfig>,
}

impl Default for AmmoConfig {
    fn default() -> Self {
        Self {
            clip_capacity: 8,
            automatic_reload: true,
            reload_rate: 1.0,
            reload_delay_after_shot: 2.0,
            physical_bullets: None,
        }
    }
}

/// Shell casing ejection for weapons with physical rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalBulletConfig {
    /// Shells spawned up front and reused round-robin (1..=30)
    pub shell_pool_size: usize,
    /// Impulse applied along the ejection port's up axis (0..=5)
    pub ejection_force: f32,
}

impl Default for PhysicalBulletConfig {
    fn default() -> Self {
        Self {
            shell_pool_size: 1,
            ejection_force: 2.0,
        }
    }
}

/// Burst-fire pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Shots per burst
    pub burst_length: u32,
    /// Seconds between shots inside a burst
    pub inter_shot_delay: f32,
    /// Seconds after the last shot of a burst before another may start
    pub inter_burst_delay: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            burst_length: 3,
            inter_shot_delay: 0.1,
            inter_burst_delay: 0.5,
        }
    }
}

/// Charge-up firing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeConfig {
    /// Seconds to reach full charge; 0 charges instantly
    pub max_charge_duration: f32,
    /// Ammo consumed when charging starts
    pub ammo_on_start_charge: f32,
    /// Ammo consumed over a full 0-to-1 charge
    pub ammo_rate_while_charging: f32,
    /// Fire as soon as the charge is full
    pub auto_release_on_full_charge: bool,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            max_charge_duration: 2.0,
            ammo_on_start_charge: 1.0,
            ammo_rate_while_charging: 1.0,
            auto_release_on_full_charge: false,
        }
    }
}

/// Muzzle flash spawning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuzzleFlashConfig {
    /// Leave the flash in world space instead of following the muzzle
    pub detach_on_spawn: bool,
}

/// Start/loop/end clips for weapons whose firing sound is one continuous loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousShootAudio {
    pub start: ClipId,
    pub loop_clip: ClipId,
    pub end: ClipId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponAudio {
    /// Played once per shot (or once when a continuous loop starts)
    pub shoot: Option<ClipId>,
    /// Played when the weapon is equipped
    pub change_weapon: Option<ClipId>,
    /// Played when a manual reload animation starts
    pub manual_reload: Option<ClipId>,
    pub continuous: Option<ContinuousShootAudio>,
}

/// Complete static definition of a weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Display name, also used to match ammo pickups
    pub name: String,
    pub shoot_type: ShootType,
    /// Minimum seconds between two shots
    pub delay_between_shots: f32,
    /// Cone angle for random spread; 0 shoots straight down the muzzle
    pub spread_angle_degrees: f32,
    /// Projectiles spawned per shot
    pub bullets_per_shot: u32,
    /// Kick applied by the host after each shot (0..=2)
    pub recoil_force: f32,
    /// Fraction of the default FOV used while aiming (0..=1)
    pub aim_zoom_ratio: f32,
    /// Arm offset applied while aiming
    pub aim_offset: Vec3,
    pub ammo: AmmoConfig,
    pub burst: BurstConfig,
    /// Present for weapons fired by charging and releasing
    pub charge: Option<ChargeConfig>,
    /// Present when the weapon spawns a muzzle flash
    pub muzzle_flash: Option<MuzzleFlashConfig>,
    pub audio: WeaponAudio,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            name: "Weapon".to_string(),
            shoot_type: ShootType::Automatic,
            delay_between_shots: 0.5,
            spread_angle_degrees: 0.0,
            bullets_per_shot: 1,
            recoil_force: 1.0,
            aim_zoom_ratio: 1.0,
            aim_offset: Vec3::ZERO,
            ammo: AmmoConfig::default(),
            burst: BurstConfig::default(),
            charge: None,
            muzzle_flash: Some(MuzzleFlashConfig::default()),
            audio: WeaponAudio::default(),
        }
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl WeaponConfig {
    /// Reject definitions that would leave the weapon unable to fire or feed
    /// NaN into its counters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ammo.clip_capacity == 0 {
            return Err(ConfigError::ZeroClipCapacity);
        }
        if !(self.delay_between_shots.is_finite() && self.delay_between_shots > 0.0) {
            return Err(ConfigError::InvalidShotDelay(self.delay_between_shots));
        }
        if self.bullets_per_shot == 0 {
            return Err(ConfigError::ZeroBulletsPerShot);
        }
        if self.burst.burst_length == 0 {
            return Err(ConfigError::ZeroBurstLength);
        }

        non_negative("spread_angle_degrees", self.spread_angle_degrees)?;
        non_negative("reload_rate", self.ammo.reload_rate)?;
        non_negative("reload_delay_after_shot", self.ammo.reload_delay_after_shot)?;
        non_negative("inter_shot_delay", self.burst.inter_shot_delay)?;
        non_negative("inter_burst_delay", self.burst.inter_burst_delay)?;
        in_range("recoil_force", self.recoil_force, 0.0, 2.0)?;
        in_range("aim_zoom_ratio", self.aim_zoom_ratio, 0.0, 1.0)?;

        if let Some(charge) = &self.charge {
            non_negative("max_charge_duration", charge.max_charge_duration)?;
            non_negative("ammo_on_start_charge", charge.ammo_on_start_charge)?;
            non_negative("ammo_rate_while_charging", charge.ammo_rate_while_charging)?;
        }

        if let Some(physical) = &self.ammo.physical_bullets {
            in_range(
                "shell_pool_size",
                physical.shell_pool_size as f32,
                1.0,
                30.0,
            )?;
            in_range("ejection_force", physical.ejection_force, 0.0, 5.0)?;
        }

        Ok(())
    }

    /// Whether the clip never runs dry
    pub fn has_infinite_clip(&self) -> bool {
        self.ammo.clip_capacity == INFINITE_CLIP
    }

    /// Fraction of a full clip one projectile represents
    pub fn ammo_needed_to_shoot(&self) -> f32 {
        1.0 / (self.ammo.clip_capacity as f32 * self.bullets_per_shot as f32)
    }

    /// Semi-automatic sidearm with no regeneration delay surprises
    pub fn pistol() -> Self {
        Self {
            name: "Pistol".to_string(),
            shoot_type: ShootType::SemiAutomatic,
            delay_between_shots: 0.25,
            spread_angle_degrees: 1.0,
            recoil_force: 0.6,
            aim_zoom_ratio: 0.8,
            ammo: AmmoConfig {
                clip_capacity: 12,
                reload_rate: 3.0,
                reload_delay_after_shot: 1.0,
                ..Default::default()
            },
            audio: WeaponAudio {
                shoot: Some(ClipId::new("pistol_shot")),
                change_weapon: Some(ClipId::new("weapon_change")),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Automatic rifle with a physical magazine and a continuous firing loop
    pub fn rifle() -> Self {
        Self {
            name: "Rifle".to_string(),
            shoot_type: ShootType::Automatic,
            delay_between_shots: 0.1,
            spread_angle_degrees: 2.5,
            recoil_force: 1.2,
            aim_zoom_ratio: 0.6,
            ammo: AmmoConfig {
                clip_capacity: 30,
                automatic_reload: false,
                physical_bullets: Some(PhysicalBulletConfig {
                    shell_pool_size: 10,
                    ejection_force: 2.0,
                }),
                ..Default::default()
            },
            audio: WeaponAudio {
                shoot: Some(ClipId::new("rifle_shot")),
                change_weapon: Some(ClipId::new("weapon_change")),
                manual_reload: Some(ClipId::new("rifle_reload")),
                continuous: Some(ContinuousShootAudio {
                    start: ClipId::new("rifle_loop_start"),
                    loop_clip: ClipId::new("rifle_loop"),
                    end: ClipId::new("rifle_loop_end"),
                }),
            },
            ..Default::default()
        }
    }

    /// Three-round burst carbine
    pub fn burst_carbine() -> Self {
        Self {
            name: "Burst Carbine".to_string(),
            shoot_type: ShootType::Burst,
            delay_between_shots: 0.1,
            spread_angle_degrees: 1.5,
            ammo: AmmoConfig {
                clip_capacity: 24,
                reload_rate: 4.0,
                reload_delay_after_shot: 1.5,
                ..Default::default()
            },
            burst: BurstConfig {
                burst_length: 3,
                inter_shot_delay: 0.08,
                inter_burst_delay: 0.4,
            },
            audio: WeaponAudio {
                shoot: Some(ClipId::new("carbine_shot")),
                change_weapon: Some(ClipId::new("weapon_change")),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Wide-spread multi-pellet shotgun
    pub fn shotgun() -> Self {
        Self {
            name: "Shotgun".to_string(),
            shoot_type: ShootType::SemiAutomatic,
            delay_between_shots: 0.8,
            spread_angle_degrees: 12.0,
            bullets_per_shot: 8,
            recoil_force: 2.0,
            ammo: AmmoConfig {
                clip_capacity: 6,
                reload_rate: 1.0,
                reload_delay_after_shot: 1.5,
                ..Default::default()
            },
            audio: WeaponAudio {
                shoot: Some(ClipId::new("shotgun_blast")),
                change_weapon: Some(ClipId::new("weapon_change")),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Charge-and-release launcher that fires itself at full charge
    pub fn charge_launcher() -> Self {
        Self {
            name: "Charge Launcher".to_string(),
            shoot_type: ShootType::SemiAutomatic,
            delay_between_shots: 1.0,
            recoil_force: 1.5,
            ammo: AmmoConfig {
                clip_capacity: 10,
                reload_rate: 1.5,
                reload_delay_after_shot: 2.0,
                ..Default::default()
            },
            charge: Some(ChargeConfig {
                max_charge_duration: 1.5,
                ammo_on_start_charge: 1.0,
                ammo_rate_while_charging: 2.0,
                auto_release_on_full_charge: true,
            }),
            audio: WeaponAudio {
                shoot: Some(ClipId::new("launcher_release")),
                change_weapon: Some(ClipId::new("weapon_change")),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// All built-in weapon definitions
    pub fn presets() -> Vec<WeaponConfig> {
        vec![
            Self::pistol(),
            Self::rifle(),
            Self::burst_carbine(),
            Self::shotgun(),
            Self::charge_launcher(),
        ]
    }

    /// Look up a built-in definition by name, ignoring case and separators
    pub fn preset(name: &str) -> Option<WeaponConfig> {
        let wanted = normalize(name);
        Self::presets()
            .into_iter()
            .find(|config| normalize(&config.name) == wanted)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for config in WeaponConfig::presets() {
            assert_eq!(config.validate(), Ok(()), "{} failed validation", config.name);
        }
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(
            WeaponConfig::preset("burst_carbine").map(|c| c.shoot_type),
            Some(ShootType::Burst)
        );
        assert!(WeaponConfig::preset("Charge Launcher").is_some());
        assert!(WeaponConfig::preset("railgun").is_none());
    }

    #[test]
    fn test_rejects_zero_clip() {
        let mut config = WeaponConfig::default();
        config.ammo.clip_capacity = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroClipCapacity));
    }

    #[test]
    fn test_rejects_bad_shot_delay() {
        for delay in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            let config = WeaponConfig {
                delay_between_shots: delay,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidShotDelay(_))
            ));
        }
    }

    #[test]
    fn test_rejects_zero_counts() {
        let config = WeaponConfig {
            bullets_per_shot: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBulletsPerShot));

        let mut config = WeaponConfig::default();
        config.burst.burst_length = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroBurstLength));
    }

    #[test]
    fn test_rejects_negative_charge_rate() {
        let config = WeaponConfig {
            charge: Some(ChargeConfig {
                ammo_rate_while_charging: -1.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "ammo_rate_while_charging",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_oversized_shell_pool() {
        let mut config = WeaponConfig::default();
        config.ammo.physical_bullets = Some(PhysicalBulletConfig {
            shell_pool_size: 31,
            ..Default::default()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "shell_pool_size",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: WeaponConfig = toml::from_str(
            r#"
            name = "Marksman"
            shoot_type = "semi_automatic"
            delay_between_shots = 0.75

            [ammo]
            clip_capacity = 5

            [charge]
            max_charge_duration = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "Marksman");
        assert_eq!(config.shoot_type, ShootType::SemiAutomatic);
        assert_eq!(config.ammo.clip_capacity, 5);
        assert_eq!(config.ammo.reload_rate, 1.0);
        assert_eq!(config.bullets_per_shot, 1);
        let charge = config.charge.unwrap();
        assert_eq!(charge.max_charge_duration, 0.0);
        assert_eq!(charge.ammo_on_start_charge, 1.0);
    }

    #[test]
    fn test_json_round_trip_keeps_clips() {
        let config = WeaponConfig::rifle();
        let json = serde_json::to_string(&config).unwrap();
        let back: WeaponConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_ammo_needed_to_shoot() {
        let config = WeaponConfig {
            bullets_per_shot: 2,
            ..Default::default()
        };
        assert!((config.ammo_needed_to_shoot() - 1.0 / 16.0).abs() < 1e-6);
    }
}
