// Provides a seeded Perlin noise lattice.

use super::rng::*;
use super::types::*;

const POINT_COUNT: usize = 256;

pub struct Perlin {
    ranvec: Vec<Vec3f>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut PrtRng) -> Perlin {
        let ranvec = (0..POINT_COUNT)
            .map(|_| Vec3f::gen_uniform_random_unit(rng))
            .collect();
        Perlin {
            ranvec,
            perm_x: Perlin::generate_perm(rng),
            perm_y: Perlin::generate_perm(rng),
            perm_z: Perlin::generate_perm(rng),
        }
    }

    fn generate_perm(rng: &mut PrtRng) -> Vec<usize> {
        let mut p: Vec<usize> = (0..POINT_COUNT).collect();
        for i in (1..POINT_COUNT).rev() {
            let target = rng.gen_range(0..=i);
            p.swap(i, target);
        }
        p
    }

    /// Lattice gradient noise in `[-1, 1]`.
    pub fn noise(&self, p: Vec3f) -> f32 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();
        let i = p.x.floor() as i32;
        let j = p.y.floor() as i32;
        let k = p.z.floor() as i32;

        let mut c = [[[Vec3f::zero(); 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, cell) in row.iter_mut().enumerate() {
                    let xi = ((i + di as i32) & 255) as usize;
                    let yi = ((j + dj as i32) & 255) as usize;
                    let zi = ((k + dk as i32) & 255) as usize;
                    *cell = self.ranvec[self.perm_x[xi] ^ self.perm_y[yi] ^ self.perm_z[zi]];
                }
            }
        }
        perlin_interpolation(&c, u, v, w)
    }

    /// Summed octaves of `noise` with halving weights.
    pub fn turbulence(&self, p: Vec3f, depth: usize) -> f32 {
        let mut accum = 0.;
        let mut temp_p = p;
        let mut weight = 1.;
        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p = 2. * temp_p;
        }
        accum.abs()
    }
}

fn perlin_interpolation(c: &[[[Vec3f; 2]; 2]; 2], u: f32, v: f32, w: f32) -> f32 {
    // Hermitian smoothing of the interpolation weights.
    let uu = u * u * (3. - 2. * u);
    let vv = v * v * (3. - 2. * v);
    let ww = w * w * (3. - 2. * w);
    let mut accum = 0.;
    for (i, plane) in c.iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, cell) in row.iter().enumerate() {
                let (fi, fj, fk) = (i as f32, j as f32, k as f32);
                let weight_v = Vec3f::new(u - fi, v - fj, w - fk);
                accum += (fi * uu + (1. - fi) * (1. - uu))
                    * (fj * vv + (1. - fj) * (1. - vv))
                    * (fk * ww + (1. - fk) * (1. - ww))
                    * cell.dot(weight_v);
            }
        }
    }
    accum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_stays_in_range() {
        let mut rng = PrtRng::seed_from_u64(42);
        let perlin = Perlin::new(&mut rng);
        for _ in 0..500 {
            let p = 20. * Vec3f::gen_uniform_random_in_unit_sphere(&mut rng);
            let n = perlin.noise(p);
            assert!((-1. ..=1.).contains(&n), "noise out of range: {}", n);
        }
    }

    #[test]
    fn noise_is_deterministic_per_seed() {
        let mut rng_a = PrtRng::seed_from_u64(9);
        let mut rng_b = PrtRng::seed_from_u64(9);
        let a = Perlin::new(&mut rng_a);
        let b = Perlin::new(&mut rng_b);
        let p = Vec3f::new(1.7, -2.3, 0.4);
        assert_eq!(a.noise(p), b.noise(p));
        assert_eq!(a.turbulence(p, 7), b.turbulence(p, 7));
    }

    #[test]
    fn turbulence_is_non_negative() {
        let mut rng = PrtRng::seed_from_u64(13);
        let perlin = Perlin::new(&mut rng);
        for _ in 0..100 {
            let p = 5. * Vec3f::gen_uniform_random_in_unit_sphere(&mut rng);
            assert!(perlin.turbulence(p, 7) >= 0.);
        }
    }
}
