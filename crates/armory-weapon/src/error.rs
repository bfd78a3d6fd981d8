use thiserror::Error;

/// A weapon definition that could never fire correctly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("clip capacity must be at least 1")]
    ZeroClipCapacity,

    #[error("delay between shots must be positive and finite, got {0}")]
    InvalidShotDelay(f32),

    #[error("bullets per shot must be at least 1")]
    ZeroBulletsPerShot,

    #[error("burst length must be at least 1")]
    ZeroBurstLength,

    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Errors from loadout management
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadoutError {
    #[error("loadout is full ({0} slots)")]
    Full(usize),

    #[error("a weapon named '{0}' is already in the loadout")]
    Duplicate(String),
}
