use super::acceleration::*;
use super::hittable::*;
use super::rng::*;
use super::types::*;

/// What a ray that escapes the scene contributes.
#[derive(Clone, Copy)]
pub enum Background {
    /// White-to-blue gradient keyed on the ray's vertical direction.
    Sky,
    Solid(Vec3f),
}

impl Background {
    pub fn color(&self, r: &Ray) -> Vec3f {
        match self {
            Background::Solid(c) => *c,
            Background::Sky => {
                const WHITE: Vec3f = Vec3f::new(1., 1., 1.);
                const SKY_BLUE: Vec3f = Vec3f::new(0.5, 0.7, 1.0);
                let unit_direction = r.direction.normalized();
                let t = 0.5 * (unit_direction.y + 1.);
                (1. - t) * WHITE + t * SKY_BLUE
            }
        }
    }
}

/// Flat aggregate: tests every member and keeps the closest hit.
#[derive(Default)]
pub struct HittableList {
    pub objects: Vec<SharedHittable>,
}

impl HittableList {
    pub fn new() -> HittableList {
        HittableList { objects: vec![] }
    }

    pub fn push(&mut self, object: SharedHittable) {
        self.objects.push(object);
    }
}

impl Hittable for HittableList {
    fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut PrtRng,
    ) -> Option<Hit<'scene>> {
        let mut closest_t = t_max;
        let mut closest_hit: Option<Hit> = None;
        for object in &self.objects {
            if let Some(hit) = object.hit(r, t_min, closest_t, rng) {
                closest_t = hit.t;
                closest_hit = Some(hit);
            }
        }
        closest_hit
    }

    fn aabb(&self, time0: f32, time1: f32) -> Option<Aabb> {
        let mut bb: Option<Aabb> = None;
        for object in &self.objects {
            let obb = object.aabb(time0, time1)?;
            bb = Some(match bb {
                Some(b) => Aabb::surrounding(b, obb),
                None => obb,
            });
        }
        bb
    }
}

/// A fully constructed world: the intersection root (flat list or BVH) plus
/// the background term.
pub struct Scene {
    pub root: SharedHittable,
    pub background: Background,
}

impl Scene {
    pub fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut PrtRng,
    ) -> Option<Hit<'scene>> {
        self.root.hit(r, t_min, t_max, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Lambertian;
    use crate::sphere::{Sphere, StationarySphere};
    use std::sync::Arc;

    fn sphere_at(center: Vec3f, albedo: Vec3f) -> SharedHittable {
        Arc::new(Sphere::from(StationarySphere {
            center,
            radius: 0.5,
            material: Arc::new(Lambertian::solid(albedo)),
        }))
    }

    #[test]
    fn nearer_of_two_occluding_spheres_wins() {
        let mut list = HittableList::new();
        list.push(sphere_at(Vec3f::new(0., 0., -2.), Vec3f::broadcast(0.1)));
        list.push(sphere_at(Vec3f::new(0., 0., -5.), Vec3f::broadcast(0.9)));
        let r = Ray {
            origin: Vec3f::zero(),
            direction: Vec3f::new(0., 0., -1.),
            time: 0.,
        };
        let mut rng = PrtRng::seed_from_u64(0);
        let hit = list.hit(&r, 0.001, f32::MAX, &mut rng).unwrap();
        assert!((hit.t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn list_box_is_the_union() {
        let mut list = HittableList::new();
        assert!(list.aabb(0., 1.).is_none());
        list.push(sphere_at(Vec3f::new(0., 0., -2.), Vec3f::one()));
        list.push(sphere_at(Vec3f::new(3., 0., 0.), Vec3f::one()));
        let bb = list.aabb(0., 1.).unwrap();
        assert!((bb.minimum.z - (-2.5)).abs() < 1e-6);
        assert!((bb.maximum.x - 3.5).abs() < 1e-6);
    }

    #[test]
    fn sky_background_blends_by_elevation() {
        let up = Ray {
            origin: Vec3f::zero(),
            direction: Vec3f::new(0., 1., 0.),
            time: 0.,
        };
        let c = Background::Sky.color(&up);
        assert!((c.x - 0.5).abs() < 1e-6);
        let solid = Background::Solid(Vec3f::new(0.1, 0.2, 0.3)).color(&up);
        assert_eq!(solid.y, 0.2);
    }
}
