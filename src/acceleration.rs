use super::error::BuildError;
use super::hittable::*;
use super::rng::*;
use super::types::*;
use std::cmp::Ordering;
use std::sync::Arc;

#[derive(Clone, Copy)]
pub struct Aabb {
    pub minimum: Vec3f,
    pub maximum: Vec3f,
}

impl Aabb {
    /// The minimal box enclosing both `a` and `b`.
    pub fn surrounding(a: Aabb, b: Aabb) -> Aabb {
        Aabb {
            minimum: a.minimum.min_by_component(b.minimum),
            maximum: a.maximum.max_by_component(b.maximum),
        }
    }

    /// Orders two boxes by their minimum bound along `axis`. Ties (and NaN,
    /// which cannot occur for well-formed boxes) compare equal.
    pub fn axis_cmp(&self, other: &Aabb, axis: Axis) -> Ordering {
        let a = axis.of(self.minimum);
        let b = axis.of(other.minimum);
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }

    /// Slab test: whether `r` passes through the box inside `[t_min, t_max]`.
    pub fn hit(&self, r: &Ray, mut t_min: f32, mut t_max: f32) -> bool {
        for axis in Axis::ALL {
            let inv_d = 1. / axis.of(r.direction);
            let mut t0 = (axis.of(self.minimum) - axis.of(r.origin)) * inv_d;
            let mut t1 = (axis.of(self.maximum) - axis.of(r.origin)) * inv_d;
            if inv_d < 0. {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max <= t_min {
                return false;
            }
        }
        true
    }
}

pub struct BvhNode {
    left: SharedHittable,
    right: SharedHittable,
    aabb: Aabb,
}

impl BvhNode {
    /// Builds a BVH over `objects` for the shutter interval `[time0, time1]`.
    /// Every object must report a bounding box; unbounded geometry would make
    /// the spatial partition unsound, so it is rejected up front.
    pub fn new(
        objects: Vec<SharedHittable>,
        time0: f32,
        time1: f32,
        rng: &mut PrtRng,
    ) -> Result<BvhNode, BuildError> {
        if objects.is_empty() {
            return Err(BuildError::EmptyBvh);
        }
        let mut leaves = objects
            .into_iter()
            .map(|o| match o.aabb(time0, time1) {
                Some(bb) => Ok((o, bb)),
                None => Err(BuildError::UnboundedObject),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::build(&mut leaves, rng))
    }

    // Recursively splits `objects` at the midpoint along a random axis. A
    // single object becomes both children of its node; a pair is ordered by
    // minimum bound along the axis.
    fn build(objects: &mut [(SharedHittable, Aabb)], rng: &mut PrtRng) -> BvhNode {
        let axis = Axis::ALL[rng.gen_range(0..3)];
        match objects.len() {
            1 => {
                let (o, bb) = &objects[0];
                BvhNode {
                    left: o.clone(),
                    right: o.clone(),
                    aabb: *bb,
                }
            }
            2 => {
                let (a, box_a) = &objects[0];
                let (b, box_b) = &objects[1];
                let (left, right, lb, rb) = if box_a.axis_cmp(box_b, axis) != Ordering::Greater {
                    (a.clone(), b.clone(), *box_a, *box_b)
                } else {
                    (b.clone(), a.clone(), *box_b, *box_a)
                };
                BvhNode {
                    left,
                    right,
                    aabb: Aabb::surrounding(lb, rb),
                }
            }
            n => {
                objects.sort_unstable_by(|x, y| x.1.axis_cmp(&y.1, axis));
                let (lo, hi) = objects.split_at_mut(n / 2);
                let left = Self::build(lo, rng);
                let right = Self::build(hi, rng);
                let aabb = Aabb::surrounding(left.aabb, right.aabb);
                BvhNode {
                    left: Arc::new(left),
                    right: Arc::new(right),
                    aabb,
                }
            }
        }
    }
}

impl Hittable for BvhNode {
    fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut PrtRng,
    ) -> Option<Hit<'scene>> {
        if !self.aabb.hit(r, t_min, t_max) {
            return None;
        }
        let lh = self.left.hit(r, t_min, t_max, rng);
        // A left hit tightens the right child's search interval.
        let rt_max = if let Some(ref hit) = lh { hit.t } else { t_max };
        let rh = self.right.hit(r, t_min, rt_max, rng);
        if rh.is_some() {
            rh
        } else {
            lh
        }
    }

    fn aabb(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(self.aabb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Lambertian;
    use crate::scene::HittableList;
    use crate::sphere::{Sphere, StationarySphere};

    struct Unbounded;

    impl Hittable for Unbounded {
        fn hit<'scene>(
            &'scene self,
            _: &Ray,
            _: f32,
            _: f32,
            _: &mut PrtRng,
        ) -> Option<Hit<'scene>> {
            None
        }
        fn aabb(&self, _: f32, _: f32) -> Option<Aabb> {
            None
        }
    }

    fn sphere_at(center: Vec3f, radius: f32) -> SharedHittable {
        Arc::new(Sphere::from(StationarySphere {
            center,
            radius,
            material: Arc::new(Lambertian::solid(Vec3f::broadcast(0.5))),
        }))
    }

    fn test_spheres() -> Vec<SharedHittable> {
        vec![
            sphere_at(Vec3f::new(0., 0., -1.), 0.5),
            sphere_at(Vec3f::new(2., 1., -3.), 1.),
            sphere_at(Vec3f::new(-4., 0., 2.), 0.25),
            sphere_at(Vec3f::new(0., -100.5, -1.), 100.),
            sphere_at(Vec3f::new(5., 5., 5.), 0.1),
        ]
    }

    #[test]
    fn aabb_slab_test() {
        let bb = Aabb {
            minimum: Vec3f::new(-1., -1., -1.),
            maximum: Vec3f::new(1., 1., 1.),
        };
        let towards = Ray {
            origin: Vec3f::new(0., 0., -5.),
            direction: Vec3f::new(0., 0., 1.),
            time: 0.,
        };
        let away = Ray {
            origin: Vec3f::new(0., 0., -5.),
            direction: Vec3f::new(0., 0., -1.),
            time: 0.,
        };
        assert!(bb.hit(&towards, 0.001, f32::MAX));
        assert!(!bb.hit(&away, 0.001, f32::MAX));
        // Restricting the interval prunes the hit.
        assert!(!bb.hit(&towards, 0.001, 1.));
    }

    #[test]
    fn root_box_is_union_of_leaf_boxes() {
        let objects = test_spheres();
        let mut expected: Option<Aabb> = None;
        for o in &objects {
            let bb = o.aabb(0., 1.).unwrap();
            expected = Some(match expected {
                Some(e) => Aabb::surrounding(e, bb),
                None => bb,
            });
        }
        let expected = expected.unwrap();

        let mut rng = PrtRng::seed_from_u64(3);
        let bvh = BvhNode::new(objects, 0., 1., &mut rng).unwrap();
        let root = bvh.aabb(0., 1.).unwrap();
        assert_eq!(root.minimum.x, expected.minimum.x);
        assert_eq!(root.minimum.y, expected.minimum.y);
        assert_eq!(root.minimum.z, expected.minimum.z);
        assert_eq!(root.maximum.x, expected.maximum.x);
        assert_eq!(root.maximum.y, expected.maximum.y);
        assert_eq!(root.maximum.z, expected.maximum.z);
    }

    #[test]
    fn bvh_agrees_with_linear_scan() {
        let objects = test_spheres();
        let mut list = HittableList::new();
        for o in &objects {
            list.push(o.clone());
        }
        let mut rng = PrtRng::seed_from_u64(11);
        let bvh = BvhNode::new(objects, 0., 1., &mut rng).unwrap();

        let origins = [
            Vec3f::new(0., 0., 5.),
            Vec3f::new(-10., 1., 0.),
            Vec3f::new(3., 8., 3.),
        ];
        let targets = [
            Vec3f::new(0., 0., -1.),
            Vec3f::new(2., 1., -3.),
            Vec3f::new(5., 5., 5.),
            Vec3f::new(-4., 0., 2.),
        ];
        for origin in &origins {
            for target in &targets {
                let r = Ray {
                    origin: *origin,
                    direction: (*target - *origin).normalized(),
                    time: 0.,
                };
                let lh = list.hit(&r, 0.001, f32::MAX, &mut rng);
                let bh = bvh.hit(&r, 0.001, f32::MAX, &mut rng);
                match (lh, bh) {
                    (Some(a), Some(b)) => assert!((a.t - b.t).abs() < 1e-5),
                    (None, None) => {}
                    _ => panic!("bvh and list disagree"),
                }
            }
        }
    }

    #[test]
    fn unbounded_geometry_is_rejected() {
        let mut rng = PrtRng::seed_from_u64(0);
        let objects: Vec<SharedHittable> = vec![sphere_at(Vec3f::zero(), 1.), Arc::new(Unbounded)];
        assert!(matches!(
            BvhNode::new(objects, 0., 1., &mut rng),
            Err(BuildError::UnboundedObject)
        ));
        assert!(matches!(
            BvhNode::new(vec![], 0., 1., &mut rng),
            Err(BuildError::EmptyBvh)
        ));
    }
}
