//! Armory Core - Core types and utilities shared by the Armory crates
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Transform for muzzle and ejection port poses
//! - Time sources for driving the simulation tick

pub mod time;
pub mod types;

pub use glam::{Quat, Vec3};
pub use time::{GameTime, ManualClock, TimeConfig, TimeSource};
pub use types::{Transform, WeaponId};
