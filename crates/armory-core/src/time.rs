//! Time system for the Armory simulation
//!
//! Handles frame time, fixed-step accumulation, and the `TimeSource` seam that
//! weapon logic reads "now" and "delta" from.

use serde::{Deserialize, Serialize};

/// Anything that can report the current simulation time and the length of
/// the last tick.
pub trait TimeSource {
    /// Seconds since the simulation started
    fn now(&self) -> f64;

    /// Seconds elapsed during the current tick
    fn delta(&self) -> f32;
}

/// Configuration for game time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for the weapon simulation (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Frame time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self {
            config: TimeConfig::default(),
            total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            fixed_accumulator: 0.0,
        }
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Update the game time with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.clamp(0.0, self.config.max_delta_time);
        self.frame_count += 1;
        self.delta_time = self.unscaled_delta_time * self.config.time_scale.max(0.0);
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        if self.config.fixed_timestep <= 0.0 {
            return 0;
        }
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }
}

impl TimeSource for GameTime {
    fn now(&self) -> f64 {
        self.total_time
    }

    fn delta(&self) -> f32 {
        self.delta_time
    }
}

/// A clock that only moves when told to. Drives fixed-step host loops and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f64,
    delta: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock already positioned at `now` with no pending delta
    pub fn at(now: f64) -> Self {
        Self { now, delta: 0.0 }
    }

    /// Move forward by `dt` seconds; `dt` becomes the current tick length
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.now += dt as f64;
        self.delta = dt;
    }

    /// Jump to an absolute time. The tick length is reset to zero.
    pub fn set(&mut self, now: f64) {
        self.now = now;
        self.delta = 0.0;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn delta(&self) -> f32 {
        self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);
        assert!((time.now() - 0.016).abs() < 1e-6);

        assert!((time.delta() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut time = GameTime::default();
        time.update(3.0);
        assert_eq!(time.delta_time, time.config.max_delta_time);

        time.update(-1.0);
        assert_eq!(time.delta_time, 0.0);
    }

    #[test]
    fn test_fixed_steps() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.1,
            ..Default::default()
        });
        time.update(0.25);
        assert_eq!(time.fixed_steps(), 2);
        time.update(0.06);
        assert_eq!(time.fixed_steps(), 1);
    }

    #[test]
    fn test_time_scale() {
        let mut time = GameTime::new(TimeConfig {
            time_scale: 2.0,
            ..Default::default()
        });
        time.update(0.1);
        assert!((time.delta_time - 0.2).abs() < 1e-6);
        assert!((time.unscaled_delta_time - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::new();
        clock.advance(0.5);
        assert_eq!(clock.now(), 0.5);
        assert_eq!(clock.delta(), 0.5);

        clock.set(10.0);
        assert_eq!(clock.now(), 10.0);
        assert_eq!(clock.delta(), 0.0);

        assert_eq!(ManualClock::at(3.0).now(), 3.0);
    }
}
