//! Random shot directions inside a spread cone

use glam::{Quat, Vec3};
use rand::Rng;

/// Uniform sample inside the unit sphere (rejection sampling)
pub fn random_in_unit_sphere(rng: &mut impl Rng) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}

/// Rotate `forward` toward `target` by `t` (0 keeps `forward`, 1 reaches
/// `target`'s direction). Returns a unit vector.
pub fn slerp_direction(forward: Vec3, target: Vec3, t: f32) -> Vec3 {
    let from = forward.normalize_or_zero();
    let to = target.normalize_or_zero();
    if from == Vec3::ZERO {
        return to;
    }
    if to == Vec3::ZERO || t <= 0.0 {
        return from;
    }
    let arc = Quat::from_rotation_arc(from, to);
    (Quat::IDENTITY.slerp(arc, t.min(1.0)) * from).normalize()
}

/// Direction for one projectile: the muzzle's forward axis pulled toward a
/// random direction by `spread_angle_degrees / 180`.
pub fn shot_direction(forward: Vec3, spread_angle_degrees: f32, rng: &mut impl Rng) -> Vec3 {
    let ratio = spread_angle_degrees / 180.0;
    if ratio <= 0.0 {
        return forward.normalize_or_zero();
    }
    slerp_direction(forward, random_in_unit_sphere(rng), ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_no_spread_is_forward() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let dir = shot_direction(Vec3::NEG_Z, 0.0, &mut rng);
            assert_eq!(dir, Vec3::NEG_Z);
        }
    }

    #[test]
    fn test_samples_inside_sphere() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() <= 1.0);
        }
    }

    #[test]
    fn test_spread_stays_in_cone() {
        let mut rng = StdRng::seed_from_u64(3);
        let spread = 10.0_f32;
        // Slerping by spread/180 can rotate at most spread degrees off-axis
        let max_angle = spread.to_radians() + 1e-4;
        for _ in 0..500 {
            let dir = shot_direction(Vec3::NEG_Z, spread, &mut rng);
            assert!((dir.length() - 1.0).abs() < 1e-4);
            assert!(dir.angle_between(Vec3::NEG_Z) <= max_angle);
        }
    }

    #[test]
    fn test_slerp_endpoints() {
        let from = Vec3::X;
        let to = Vec3::Y * 3.0;
        assert!((slerp_direction(from, to, 0.0) - Vec3::X).length() < 1e-5);
        assert!((slerp_direction(from, to, 1.0) - Vec3::Y).length() < 1e-5);
        let mid = slerp_direction(from, to, 0.5);
        assert!((mid.angle_between(Vec3::X) - std::f32::consts::FRAC_PI_4).abs() < 1e-4);
    }
}
