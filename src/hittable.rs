use super::acceleration::*;
use super::materials::*;
use super::rng::*;
use super::types::*;
use std::sync::Arc;

/// Shared handles. Materials and textures are commonly referenced by several
/// primitives, and BVH leaves may be aliased by both children of a node.
pub type SharedHittable = Arc<dyn Hittable + Send + Sync>;
pub type SharedMaterial = Arc<dyn Material + Send + Sync>;

pub trait Hittable {
    /// Reports the closest intersection with `r` strictly inside
    /// `(t_min, t_max)`, if any. The RNG handle is threaded through explicitly
    /// so that probabilistic geometry (participating media) stays
    /// deterministic per worker; surface primitives ignore it.
    fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut PrtRng,
    ) -> Option<Hit<'scene>>;

    /// The bounding box over the shutter interval `[time0, time1]`, or `None`
    /// for unbounded geometry. Objects returning `None` cannot be placed in a
    /// BVH.
    fn aabb(&self, time0: f32, time1: f32) -> Option<Aabb>;
}

pub struct Hit<'scene> {
    pub p: Vec3f,
    pub normal: Vec3f,
    pub t: f32,
    pub u: f32,
    pub v: f32,
    pub material: &'scene (dyn Material + Send + Sync),
    pub front_face: bool,
}

/// Orients `outward_normal` against the incoming ray. Returns the oriented
/// normal and whether the front face was struck.
pub fn face_normal(r: &Ray, outward_normal: Vec3f) -> (Vec3f, bool) {
    let front_face = r.direction.dot(outward_normal) < 0.;
    let normal = if front_face {
        outward_normal
    } else {
        -outward_normal
    };
    (normal, front_face)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_normal_opposes_the_ray() {
        let outward = Vec3f::new(0., 0., 1.);
        for dir in &[Vec3f::new(0., 0., -1.), Vec3f::new(0., 0., 1.)] {
            let r = Ray {
                origin: Vec3f::zero(),
                direction: *dir,
                time: 0.,
            };
            let (normal, front_face) = face_normal(&r, outward);
            assert!(normal.dot(r.direction) < 0.);
            assert_eq!(front_face, dir.z < 0.);
        }
    }
}
