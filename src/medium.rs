use super::acceleration::*;
use super::error::BuildError;
use super::hittable::*;
use super::materials::*;
use super::rng::*;
use super::textures::*;
use super::types::*;
use std::borrow::Borrow;
use std::sync::Arc;

/// Homogeneous participating volume bounded by another object. A ray entering
/// the boundary scatters after an exponentially distributed distance; if that
/// distance overshoots the exit point the ray passes through untouched.
pub struct ConstantMedium {
    boundary: SharedHittable,
    phase_function: SharedMaterial,
    neg_inv_density: f32,
}

impl ConstantMedium {
    pub fn new(
        boundary: SharedHittable,
        density: f32,
        albedo: SharedTexture,
    ) -> Result<ConstantMedium, BuildError> {
        if density <= 0. {
            return Err(BuildError::InvalidDensity(density));
        }
        Ok(ConstantMedium {
            boundary,
            phase_function: Arc::new(Isotropic::new(albedo)),
            neg_inv_density: -1. / density,
        })
    }

    pub fn solid(
        boundary: SharedHittable,
        density: f32,
        color: Vec3f,
    ) -> Result<ConstantMedium, BuildError> {
        Self::new(boundary, density, Arc::new(SolidColor::new(color)))
    }
}

impl Hittable for ConstantMedium {
    fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut PrtRng,
    ) -> Option<Hit<'scene>> {
        // Entry and exit points of the full, unclipped boundary.
        let hit1 = self.boundary.hit(r, f32::MIN, f32::MAX, rng)?;
        let hit2 = self.boundary.hit(r, hit1.t + 1e-4, f32::MAX, rng)?;

        let mut t1 = hit1.t.max(t_min).max(0.);
        let t2 = hit2.t.min(t_max);
        if t1 > t2 {
            return None;
        }

        let ray_length = r.direction.mag();
        let distance_inside_boundary = (t2 - t1) * ray_length;
        let hit_distance = self.neg_inv_density * rng.gen::<f32>().ln();
        if hit_distance > distance_inside_boundary {
            return None;
        }

        t1 += hit_distance / ray_length;
        Some(Hit {
            p: r.point_at(t1),
            // Medium interactions have no meaningful surface orientation.
            normal: Vec3f::new(1., 0., 0.),
            t: t1,
            u: 0.,
            v: 0.,
            material: self.phase_function.borrow(),
            front_face: true,
        })
    }

    fn aabb(&self, time0: f32, time1: f32) -> Option<Aabb> {
        self.boundary.aabb(time0, time1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Lambertian;
    use crate::sphere::{Sphere, StationarySphere};

    fn boundary() -> SharedHittable {
        Arc::new(Sphere::from(StationarySphere {
            center: Vec3f::new(0., 0., -3.),
            radius: 1.,
            material: Arc::new(Lambertian::solid(Vec3f::broadcast(0.5))),
        }))
    }

    fn probe() -> Ray {
        Ray {
            origin: Vec3f::zero(),
            direction: Vec3f::new(0., 0., -1.),
            time: 0.,
        }
    }

    #[test]
    fn dense_medium_scatters_at_the_entry_point() {
        let medium = ConstantMedium::solid(boundary(), 1e7, Vec3f::one()).unwrap();
        let mut rng = PrtRng::seed_from_u64(2);
        for _ in 0..50 {
            let hit = medium.hit(&probe(), 0.001, f32::MAX, &mut rng).unwrap();
            // Boundary entry is at t = 2.
            assert!((hit.t - 2.).abs() < 1e-3);
        }
    }

    #[test]
    fn thin_medium_passes_rays_through() {
        let medium = ConstantMedium::solid(boundary(), 1e-7, Vec3f::one()).unwrap();
        let mut rng = PrtRng::seed_from_u64(2);
        for _ in 0..50 {
            assert!(medium.hit(&probe(), 0.001, f32::MAX, &mut rng).is_none());
        }
    }

    #[test]
    fn sampled_hits_stay_inside_the_boundary() {
        let medium = ConstantMedium::solid(boundary(), 2., Vec3f::one()).unwrap();
        let mut rng = PrtRng::seed_from_u64(4);
        for _ in 0..200 {
            if let Some(hit) = medium.hit(&probe(), 0.001, f32::MAX, &mut rng) {
                assert!(hit.t >= 2. && hit.t <= 4.);
            }
        }
    }

    #[test]
    fn ray_missing_the_boundary_misses_the_medium() {
        let medium = ConstantMedium::solid(boundary(), 10., Vec3f::one()).unwrap();
        let mut rng = PrtRng::seed_from_u64(0);
        let r = Ray {
            origin: Vec3f::zero(),
            direction: Vec3f::new(0., 1., 0.),
            time: 0.,
        };
        assert!(medium.hit(&r, 0.001, f32::MAX, &mut rng).is_none());
    }

    #[test]
    fn non_positive_density_is_rejected() {
        assert!(matches!(
            ConstantMedium::solid(boundary(), -0.5, Vec3f::one()),
            Err(BuildError::InvalidDensity(_))
        ));
        assert!(matches!(
            ConstantMedium::solid(boundary(), 0., Vec3f::one()),
            Err(BuildError::InvalidDensity(_))
        ));
    }
}
