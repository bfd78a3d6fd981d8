//! Core types used throughout Armory

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a weapon instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponId(pub Uuid);

impl WeaponId {
    /// Create a new random weapon ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WeaponId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WeaponId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position and rotation of a point on the weapon (muzzle, ejection port)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the up direction (positive Y in local space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_axes() {
        let transform = Transform::default();
        assert!((transform.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((transform.up() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_rotation_turns_forward() {
        let transform = Transform {
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
        };
        // Quarter turn around +Y takes -Z to -X
        assert!((transform.forward() - Vec3::NEG_X).length() < 1e-5);
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_weapon_ids_unique() {
        assert_ne!(WeaponId::new(), WeaponId::new());
    }
}
