#![allow(clippy::suspicious_operation_groupings)]

use super::acceleration::*;
use super::hittable::*;
use super::rng::*;
use super::types::*;
use std::borrow::Borrow;
use std::f32::consts::PI;

/// A sphere whose center moves linearly from `center0` at `time0` to
/// `center1` at `time1`. A stationary sphere is the degenerate case with both
/// control points equal.
pub struct Sphere {
    center0: Vec3f,
    center1: Vec3f,
    time0: f32,
    time1: f32,
    radius: f32,
    material: SharedMaterial,
}

pub struct StationarySphere {
    pub center: Vec3f,
    pub radius: f32,
    pub material: SharedMaterial,
}

impl Sphere {
    pub fn new(
        center0: Vec3f,
        center1: Vec3f,
        time0: f32,
        time1: f32,
        radius: f32,
        material: SharedMaterial,
    ) -> Sphere {
        Sphere {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
        }
    }

    pub fn from(s: StationarySphere) -> Sphere {
        Sphere::new(s.center, s.center, 0., 1., s.radius, s.material)
    }

    fn center_at(&self, t: f32) -> Vec3f {
        if self.time1 == self.time0 {
            return self.center0;
        }
        self.center0
            + ((t - self.time0) / (self.time1 - self.time0)) * (self.center1 - self.center0)
    }
}

/// Spherical coordinates of a point on the unit sphere, normalized to
/// `[0, 1]²`.
fn sphere_uv(outward_normal: Vec3f) -> (f32, f32) {
    let theta = (-outward_normal.y).acos();
    let phi = (-outward_normal.z).atan2(outward_normal.x) + PI;
    (phi / (2. * PI), theta / PI)
}

impl Hittable for Sphere {
    fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        _rng: &mut PrtRng,
    ) -> Option<Hit<'scene>> {
        let center = self.center_at(r.time);
        let oc = r.origin - center;
        let a = r.direction.dot(r.direction);
        if a == 0. {
            // Degenerate ray with a zero-length direction.
            return None;
        }
        let half_b = oc.dot(r.direction);
        let c = oc.dot(oc) - (self.radius * self.radius);
        let discriminant = (half_b * half_b) - (a * c);
        if discriminant < 0. {
            return None;
        }
        let discriminant_sqrt = discriminant.sqrt();
        let mut root = (-half_b - discriminant_sqrt) / a;
        if root <= t_min || t_max <= root {
            root = (-half_b + discriminant_sqrt) / a;
            if root <= t_min || t_max <= root {
                return None;
            }
        }
        let p = r.point_at(root);
        let outward_normal = (p - center) / self.radius;
        let (normal, front_face) = face_normal(r, outward_normal);
        let (u, v) = sphere_uv(outward_normal);
        Some(Hit {
            p,
            normal,
            t: root,
            u,
            v,
            material: self.material.borrow(),
            front_face,
        })
    }

    fn aabb(&self, time0: f32, time1: f32) -> Option<Aabb> {
        let r = Vec3f::broadcast(self.radius);
        let c0 = self.center_at(time0);
        let c1 = self.center_at(time1);
        let box0 = Aabb {
            minimum: c0 - r,
            maximum: c0 + r,
        };
        let box1 = Aabb {
            minimum: c1 - r,
            maximum: c1 + r,
        };
        Some(Aabb::surrounding(box0, box1))
    }
}
