// Provides random number generation.

use super::types::*;
use rand::distributions::Uniform;
pub use rand::Rng;
pub use rand::SeedableRng;

/// The [xoshiro](http://xoshiro.di.unimi.it/) generator is particularly well
/// suited for path tracing: it is a best-in-class PRNG (from a statistical and
/// performance POV), and it supports an efficient jump-ahead operation which is
/// essential to prevent threads from having similar patterns.
pub type PrtRng = rand_xoshiro::Xoshiro128Plus;

pub trait RngVector {
    /// Generates a random vector inside the unit sphere from a uniform
    /// distribution.
    fn gen_uniform_random_in_unit_sphere(rng: &mut PrtRng) -> Self;

    /// Generates a random vector inside the unit disc in the XY plane from a
    /// uniform distribution. The Z component shall be 0.
    fn gen_uniform_random_in_unit_disc(rng: &mut PrtRng) -> Self;

    /// Generates a random unit vector from a uniform distribution.
    fn gen_uniform_random_unit(rng: &mut PrtRng) -> Self;
}

impl RngVector for Vec3f {
    fn gen_uniform_random_in_unit_sphere(rng: &mut PrtRng) -> Vec3f {
        let d = Uniform::new_inclusive(-1., 1.);
        loop {
            let v = Vec3f::new(rng.sample(d), rng.sample(d), rng.sample(d));
            if v.dot(v) < 1. {
                return v;
            }
        }
    }

    fn gen_uniform_random_in_unit_disc(rng: &mut PrtRng) -> Vec3f {
        let d = Uniform::new_inclusive(-1., 1.);
        loop {
            let v = Vec3f::new(rng.sample(d), rng.sample(d), 0.);
            if v.dot(v) < 1. {
                return v;
            }
        }
    }

    fn gen_uniform_random_unit(rng: &mut PrtRng) -> Vec3f {
        let v = Vec3f::gen_uniform_random_in_unit_sphere(rng);
        v.normalized()
    }
}
