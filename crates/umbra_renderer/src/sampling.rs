//! Random sampling helpers.
//!
//! Every stochastic routine takes `&mut dyn RngCore` so callers decide how
//! generators are seeded.

use rand::{Rng, RngCore, SeedableRng};
use rand::rngs::StdRng;
use umbra_math::Vec3;

/// Uniform `f32` in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform point in the cube `[-1, 1]^3`.
pub fn random_in_cube(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(
        gen_f32(rng) * 2.0 - 1.0,
        gen_f32(rng) * 2.0 - 1.0,
        gen_f32(rng) * 2.0 - 1.0,
    )
}

/// Generator for one pixel, independent of render order.
pub fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let pixel = (u64::from(y) << 32) | u64::from(x);
    StdRng::seed_from_u64(seed ^ pixel.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
