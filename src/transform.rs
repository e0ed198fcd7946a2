use super::acceleration::*;
use super::hittable::*;
use super::rng::*;
use super::types::*;

/// Moves the wrapped object by `offset` by shifting incoming rays the other
/// way.
pub struct Translate {
    object: SharedHittable,
    offset: Vec3f,
}

impl Translate {
    pub fn new(object: SharedHittable, offset: Vec3f) -> Translate {
        Translate { object, offset }
    }
}

impl Hittable for Translate {
    fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut PrtRng,
    ) -> Option<Hit<'scene>> {
        let moved = Ray {
            origin: r.origin - self.offset,
            direction: r.direction,
            time: r.time,
        };
        let mut hit = self.object.hit(&moved, t_min, t_max, rng)?;
        hit.p += self.offset;
        Some(hit)
    }

    fn aabb(&self, time0: f32, time1: f32) -> Option<Aabb> {
        let bb = self.object.aabb(time0, time1)?;
        Some(Aabb {
            minimum: bb.minimum + self.offset,
            maximum: bb.maximum + self.offset,
        })
    }
}

/// Rotates the wrapped object around the Y axis. The world-space box is
/// derived once at construction from the eight corners of the inner box.
pub struct RotateY {
    object: SharedHittable,
    sin_theta: f32,
    cos_theta: f32,
    aabb: Option<Aabb>,
}

impl RotateY {
    pub fn new(object: SharedHittable, degrees: f32) -> RotateY {
        let radians = degrees.to_radians();
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();
        let aabb = object.aabb(0., 1.).map(|bb| {
            let mut minimum = Vec3f::broadcast(f32::MAX);
            let mut maximum = Vec3f::broadcast(f32::MIN);
            for i in 0..2 {
                for j in 0..2 {
                    for k in 0..2 {
                        let (fi, fj, fk) = (i as f32, j as f32, k as f32);
                        let x = fi * bb.maximum.x + (1. - fi) * bb.minimum.x;
                        let y = fj * bb.maximum.y + (1. - fj) * bb.minimum.y;
                        let z = fk * bb.maximum.z + (1. - fk) * bb.minimum.z;
                        let new_x = cos_theta * x + sin_theta * z;
                        let new_z = -sin_theta * x + cos_theta * z;
                        let corner = Vec3f::new(new_x, y, new_z);
                        minimum = minimum.min_by_component(corner);
                        maximum = maximum.max_by_component(corner);
                    }
                }
            }
            Aabb { minimum, maximum }
        });
        RotateY {
            object,
            sin_theta,
            cos_theta,
            aabb,
        }
    }

    fn to_object(&self, v: Vec3f) -> Vec3f {
        Vec3f::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    fn to_world(&self, v: Vec3f) -> Vec3f {
        Vec3f::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut PrtRng,
    ) -> Option<Hit<'scene>> {
        let rotated = Ray {
            origin: self.to_object(r.origin),
            direction: self.to_object(r.direction),
            time: r.time,
        };
        let mut hit = self.object.hit(&rotated, t_min, t_max, rng)?;
        hit.p = self.to_world(hit.p);
        hit.normal = self.to_world(hit.normal);
        Some(hit)
    }

    fn aabb(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        self.aabb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Lambertian;
    use crate::rect::AxisBox;
    use crate::sphere::{Sphere, StationarySphere};
    use std::sync::Arc;

    fn test_rng() -> PrtRng {
        PrtRng::seed_from_u64(0)
    }

    fn grey_sphere(center: Vec3f, radius: f32) -> SharedHittable {
        Arc::new(Sphere::from(StationarySphere {
            center,
            radius,
            material: Arc::new(Lambertian::solid(Vec3f::broadcast(0.5))),
        }))
    }

    #[test]
    fn translate_shifts_hits_and_box() {
        let offset = Vec3f::new(2., 0., 0.);
        let t = Translate::new(grey_sphere(Vec3f::new(0., 0., -2.), 0.5), offset);
        let r = Ray {
            origin: Vec3f::new(2., 0., 0.),
            direction: Vec3f::new(0., 0., -1.),
            time: 0.,
        };
        let hit = t.hit(&r, 0.001, f32::MAX, &mut test_rng()).unwrap();
        assert!((hit.t - 1.5).abs() < 1e-5);
        assert!((hit.p.x - 2.).abs() < 1e-5);

        let bb = t.aabb(0., 1.).unwrap();
        assert!((bb.minimum.x - 1.5).abs() < 1e-6);
        assert!((bb.maximum.x - 2.5).abs() < 1e-6);
    }

    #[test]
    fn rotate_y_quarter_turn_swaps_axes() {
        // A box reaching along +x, rotated 90° about Y, reaches along -z.
        let b: SharedHittable = Arc::new(AxisBox::new(
            Vec3f::new(0., 0., 0.),
            Vec3f::new(2., 1., 1.),
            Arc::new(Lambertian::solid(Vec3f::broadcast(0.5))),
        ));
        let rotated = RotateY::new(b, 90.);
        let bb = rotated.aabb(0., 1.).unwrap();
        assert!((bb.minimum.z - (-2.)).abs() < 1e-5);
        assert!((bb.maximum.x - 1.).abs() < 1e-5);

        let r = Ray {
            origin: Vec3f::new(0.5, 0.5, -5.),
            direction: Vec3f::new(0., 0., 1.),
            time: 0.,
        };
        let hit = rotated.hit(&r, 0.001, f32::MAX, &mut test_rng()).unwrap();
        assert!((hit.t - 3.).abs() < 1e-4);
        assert!(hit.normal.dot(r.direction) < 0.);
    }
}
