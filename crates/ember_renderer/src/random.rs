//! Stateless hash-based random numbers.
//!
//! Every pixel owns its seed, so there is no shared generator to contend on
//! and two runs with the same seeds produce the same image bit for bit.

use ember_math::Vec3;

/// PCG-style integer hash: multiply-add, data-dependent xorshift, multiply,
/// final xorshift.
#[inline]
pub fn pcg_hash(input: u32) -> u32 {
    let state = input.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    let word = ((state >> ((state >> 28) + 4)) ^ state).wrapping_mul(277_803_737);
    (word >> 22) ^ word
}

/// Advance `seed` and return a float in [0, 1].
#[inline]
pub fn random_f32(seed: &mut u32) -> f32 {
    *seed = pcg_hash(*seed);
    *seed as f32 / u32::MAX as f32
}

/// A normalized direction built from three draws in [-1, 1].
///
/// The distribution is not uniform over the sphere. A degenerate sample
/// (all three draws at zero) returns +Y instead of NaN.
pub fn random_unit_vector(seed: &mut u32) -> Vec3 {
    let x = random_f32(seed) * 2.0 - 1.0;
    let y = random_f32(seed) * 2.0 - 1.0;
    let z = random_f32(seed) * 2.0 - 1.0;

    Vec3::new(x, y, z).try_normalize().unwrap_or(Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcg_hash_known_values() {
        // 0 * a + c = 2891336453, shift = (2891336453 >> 28) + 4 = 14
        let state: u32 = 2_891_336_453;
        let word = ((state >> 14) ^ state).wrapping_mul(277_803_737);
        assert_eq!(pcg_hash(0), (word >> 22) ^ word);
        assert_ne!(pcg_hash(0), pcg_hash(1));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = 1234;
        let mut b = 1234;
        for _ in 0..100 {
            assert_eq!(random_f32(&mut a).to_bits(), random_f32(&mut b).to_bits());
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_f32_range() {
        let mut seed = 7;
        for _ in 0..10_000 {
            let v = random_f32(&mut seed);
            assert!((0.0..=1.0).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn test_random_f32_advances_seed() {
        let mut seed = 42;
        let v = random_f32(&mut seed);
        assert_eq!(seed, pcg_hash(42));
        assert_eq!(v, pcg_hash(42) as f32 / u32::MAX as f32);
    }

    #[test]
    fn test_random_unit_vector_is_normalized() {
        let mut seed = 99;
        for _ in 0..1000 {
            let v = random_unit_vector(&mut seed);
            assert!(v.is_finite());
            assert!((v.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_random_unit_vector_covers_all_octants() {
        let mut seed = 1;
        let mut seen = [false; 8];
        for _ in 0..1000 {
            let v = random_unit_vector(&mut seed);
            let octant = (v.x > 0.0) as usize | ((v.y > 0.0) as usize) << 1 | ((v.z > 0.0) as usize) << 2;
            seen[octant] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
