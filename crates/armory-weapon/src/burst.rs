//! Burst fire as a resumable state object
//!
//! A burst fires up to `burst_length` shots separated by `inter_shot_delay`,
//! then holds for `inter_burst_delay` before another burst may start. The
//! sequence never blocks: the controller polls it with the time budget of the
//! current tick and performs each shot it asks for.

use tracing::debug;

use crate::config::BurstConfig;

/// Where a burst currently is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurstPhase {
    /// No burst in flight
    Idle,
    /// Ready to fire shot number `shot` (zero-based)
    Firing { shot: u32 },
    /// Waiting after shot number `shot`
    BetweenShots { shot: u32, remaining: f32 },
    /// Waiting after the final shot before the burst latch reopens
    Cooldown { remaining: f32 },
}

/// What the controller should do after a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstStep {
    /// Perform one shot, then poll again
    Fire,
    /// The phase changed without firing; poll again
    Continue,
    /// The tick's time budget ran out mid-wait
    Waiting,
    /// The trailing cooldown elapsed and the sequence is idle again
    Finished,
    /// Nothing in flight
    Idle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BurstSequence {
    phase: BurstPhase,
    can_shoot_burst: bool,
    can_shoot_shot: bool,
    shots_fired: u32,
}

impl Default for BurstSequence {
    fn default() -> Self {
        Self {
            phase: BurstPhase::Idle,
            can_shoot_burst: true,
            can_shoot_shot: true,
            shots_fired: 0,
        }
    }
}

impl BurstSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a burst. Fails while a previous burst or its cooldown is in flight.
    pub fn start(&mut self) -> bool {
        if !self.can_shoot_burst {
            return false;
        }
        self.can_shoot_burst = false;
        self.shots_fired = 0;
        self.phase = BurstPhase::Firing { shot: 0 };
        debug!("Burst started");
        true
    }

    /// Advance one step, drawing waits from `budget`.
    ///
    /// `has_ammo` is sampled at each shot boundary; an empty clip ends the
    /// shooting part of the burst early and moves straight to the cooldown.
    pub fn poll(&mut self, budget: &mut f32, config: &BurstConfig, has_ammo: bool) -> BurstStep {
        match self.phase {
            BurstPhase::Idle => BurstStep::Idle,
            BurstPhase::Firing { shot } => {
                if shot >= config.burst_length || !has_ammo {
                    debug!(shots = self.shots_fired, "Burst entering cooldown");
                    self.phase = BurstPhase::Cooldown {
                        remaining: config.inter_burst_delay,
                    };
                    return BurstStep::Continue;
                }
                self.can_shoot_shot = false;
                self.shots_fired += 1;
                self.phase = BurstPhase::BetweenShots {
                    shot,
                    remaining: config.inter_shot_delay,
                };
                BurstStep::Fire
            }
            BurstPhase::BetweenShots { shot, remaining } => {
                if *budget >= remaining {
                    *budget -= remaining;
                    self.can_shoot_shot = true;
                    self.phase = BurstPhase::Firing { shot: shot + 1 };
                    BurstStep::Continue
                } else {
                    self.phase = BurstPhase::BetweenShots {
                        shot,
                        remaining: remaining - *budget,
                    };
                    *budget = 0.0;
                    BurstStep::Waiting
                }
            }
            BurstPhase::Cooldown { remaining } => {
                if *budget >= remaining {
                    *budget -= remaining;
                    self.reset();
                    debug!("Burst finished");
                    BurstStep::Finished
                } else {
                    self.phase = BurstPhase::Cooldown {
                        remaining: remaining - *budget,
                    };
                    *budget = 0.0;
                    BurstStep::Waiting
                }
            }
        }
    }

    /// Abort any in-flight burst and reopen both latches. Returns whether a
    /// burst was actually interrupted; calling it while idle changes nothing.
    pub fn cancel(&mut self) -> bool {
        if self.phase == BurstPhase::Idle {
            return false;
        }
        debug!(shots = self.shots_fired, "Burst cancelled");
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.phase = BurstPhase::Idle;
        self.can_shoot_burst = true;
        self.can_shoot_shot = true;
    }

    pub fn phase(&self) -> BurstPhase {
        self.phase
    }

    /// True from the moment a burst starts until its trailing cooldown ends
    pub fn is_shooting_burst(&self) -> bool {
        self.phase != BurstPhase::Idle
    }

    pub fn can_shoot_burst(&self) -> bool {
        self.can_shoot_burst
    }

    pub fn can_shoot_shot(&self) -> bool {
        self.can_shoot_shot
    }

    /// Shots fired by the current (or most recent) burst
    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BurstConfig {
        BurstConfig {
            burst_length: 3,
            inter_shot_delay: 0.1,
            inter_burst_delay: 0.5,
        }
    }

    /// Poll until the budget is spent, counting requested shots
    fn run(burst: &mut BurstSequence, dt: f32, ammo: &mut u32) -> u32 {
        let mut budget = dt;
        let mut fired = 0;
        loop {
            match burst.poll(&mut budget, &config(), *ammo > 0) {
                BurstStep::Fire => {
                    fired += 1;
                    *ammo -= 1;
                }
                BurstStep::Continue => {}
                BurstStep::Waiting | BurstStep::Finished | BurstStep::Idle => break,
            }
        }
        fired
    }

    #[test]
    fn test_full_burst() {
        let mut burst = BurstSequence::new();
        let mut ammo = 10;
        assert!(burst.start());
        assert_eq!(run(&mut burst, 0.0, &mut ammo), 1);
        assert!(!burst.can_shoot_shot());
        assert_eq!(run(&mut burst, 0.1, &mut ammo), 1);
        assert_eq!(run(&mut burst, 0.1, &mut ammo), 1);
        assert_eq!(ammo, 7);
        assert!(burst.is_shooting_burst());

        // Final wait after the third shot, then the cooldown
        assert_eq!(run(&mut burst, 0.1, &mut ammo), 0);
        assert!(matches!(burst.phase(), BurstPhase::Cooldown { .. }));
        assert!(!burst.start());
        assert_eq!(run(&mut burst, 0.25, &mut ammo), 0);
        assert!(burst.is_shooting_burst());
        assert_eq!(run(&mut burst, 0.25, &mut ammo), 0);
        assert!(!burst.is_shooting_burst());
        assert!(burst.can_shoot_burst());
        assert_eq!(burst.shots_fired(), 3);
    }

    #[test]
    fn test_large_tick_fires_whole_burst() {
        let mut burst = BurstSequence::new();
        let mut ammo = 10;
        burst.start();
        assert_eq!(run(&mut burst, 5.0, &mut ammo), 3);
        assert!(!burst.is_shooting_burst());
    }

    #[test]
    fn test_empty_clip_stops_early() {
        let mut burst = BurstSequence::new();
        let mut ammo = 1;
        burst.start();
        assert_eq!(run(&mut burst, 0.0, &mut ammo), 1);
        assert_eq!(run(&mut burst, 0.1, &mut ammo), 0);
        assert!(matches!(burst.phase(), BurstPhase::Cooldown { .. }));
        assert_eq!(burst.shots_fired(), 1);
    }

    #[test]
    fn test_cancel_resets_latches() {
        let mut burst = BurstSequence::new();
        let mut ammo = 10;
        burst.start();
        run(&mut burst, 0.0, &mut ammo);
        assert!(burst.cancel());
        assert_eq!(burst.phase(), BurstPhase::Idle);
        assert!(burst.can_shoot_burst());
        assert!(burst.can_shoot_shot());
        assert!(burst.start());
    }

    #[test]
    fn test_cancel_when_idle_is_noop() {
        let mut burst = BurstSequence::new();
        let before = burst.clone();
        assert!(!burst.cancel());
        assert_eq!(burst, before);
    }
}
