use super::acceleration::*;
use super::hittable::*;
use super::rng::*;
use super::scene::*;
use super::types::*;
use std::borrow::Borrow;
use std::sync::Arc;

// Axis-aligned rectangle boxes are padded on the flat axis so they are never
// zero-thickness, which the BVH slab test requires.
const PAD: f32 = 1e-4;

/// Rectangle in the plane `z = k`, spanning `[x0, x1] × [y0, y1]`.
pub struct XyRect {
    pub x0: f32,
    pub x1: f32,
    pub y0: f32,
    pub y1: f32,
    pub k: f32,
    pub material: SharedMaterial,
}

impl Hittable for XyRect {
    fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        _rng: &mut PrtRng,
    ) -> Option<Hit<'scene>> {
        let t = (self.k - r.origin.z) / r.direction.z;
        if t <= t_min || t >= t_max {
            return None;
        }
        let x = r.origin.x + t * r.direction.x;
        let y = r.origin.y + t * r.direction.y;
        if x < self.x0 || x > self.x1 || y < self.y0 || y > self.y1 {
            return None;
        }
        let (normal, front_face) = face_normal(r, Vec3f::new(0., 0., 1.));
        Some(Hit {
            p: r.point_at(t),
            normal,
            t,
            u: (x - self.x0) / (self.x1 - self.x0),
            v: (y - self.y0) / (self.y1 - self.y0),
            material: self.material.borrow(),
            front_face,
        })
    }

    fn aabb(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(Aabb {
            minimum: Vec3f::new(self.x0, self.y0, self.k - PAD),
            maximum: Vec3f::new(self.x1, self.y1, self.k + PAD),
        })
    }
}

/// Rectangle in the plane `y = k`, spanning `[x0, x1] × [z0, z1]`.
pub struct XzRect {
    pub x0: f32,
    pub x1: f32,
    pub z0: f32,
    pub z1: f32,
    pub k: f32,
    pub material: SharedMaterial,
}

impl Hittable for XzRect {
    fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        _rng: &mut PrtRng,
    ) -> Option<Hit<'scene>> {
        let t = (self.k - r.origin.y) / r.direction.y;
        if t <= t_min || t >= t_max {
            return None;
        }
        let x = r.origin.x + t * r.direction.x;
        let z = r.origin.z + t * r.direction.z;
        if x < self.x0 || x > self.x1 || z < self.z0 || z > self.z1 {
            return None;
        }
        let (normal, front_face) = face_normal(r, Vec3f::new(0., 1., 0.));
        Some(Hit {
            p: r.point_at(t),
            normal,
            t,
            u: (x - self.x0) / (self.x1 - self.x0),
            v: (z - self.z0) / (self.z1 - self.z0),
            material: self.material.borrow(),
            front_face,
        })
    }

    fn aabb(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(Aabb {
            minimum: Vec3f::new(self.x0, self.k - PAD, self.z0),
            maximum: Vec3f::new(self.x1, self.k + PAD, self.z1),
        })
    }
}

/// Rectangle in the plane `x = k`, spanning `[y0, y1] × [z0, z1]`.
pub struct YzRect {
    pub y0: f32,
    pub y1: f32,
    pub z0: f32,
    pub z1: f32,
    pub k: f32,
    pub material: SharedMaterial,
}

impl Hittable for YzRect {
    fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        _rng: &mut PrtRng,
    ) -> Option<Hit<'scene>> {
        let t = (self.k - r.origin.x) / r.direction.x;
        if t <= t_min || t >= t_max {
            return None;
        }
        let y = r.origin.y + t * r.direction.y;
        let z = r.origin.z + t * r.direction.z;
        if y < self.y0 || y > self.y1 || z < self.z0 || z > self.z1 {
            return None;
        }
        let (normal, front_face) = face_normal(r, Vec3f::new(1., 0., 0.));
        Some(Hit {
            p: r.point_at(t),
            normal,
            t,
            u: (y - self.y0) / (self.y1 - self.y0),
            v: (z - self.z0) / (self.z1 - self.z0),
            material: self.material.borrow(),
            front_face,
        })
    }

    fn aabb(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(Aabb {
            minimum: Vec3f::new(self.k - PAD, self.y0, self.z0),
            maximum: Vec3f::new(self.k + PAD, self.y1, self.z1),
        })
    }
}

/// Axis-aligned box assembled from six rectangles.
pub struct AxisBox {
    minimum: Vec3f,
    maximum: Vec3f,
    sides: HittableList,
}

impl AxisBox {
    pub fn new(p0: Vec3f, p1: Vec3f, material: SharedMaterial) -> AxisBox {
        let mut sides = HittableList::new();
        sides.push(Arc::new(XyRect {
            x0: p0.x,
            x1: p1.x,
            y0: p0.y,
            y1: p1.y,
            k: p1.z,
            material: material.clone(),
        }));
        sides.push(Arc::new(XyRect {
            x0: p0.x,
            x1: p1.x,
            y0: p0.y,
            y1: p1.y,
            k: p0.z,
            material: material.clone(),
        }));
        sides.push(Arc::new(XzRect {
            x0: p0.x,
            x1: p1.x,
            z0: p0.z,
            z1: p1.z,
            k: p1.y,
            material: material.clone(),
        }));
        sides.push(Arc::new(XzRect {
            x0: p0.x,
            x1: p1.x,
            z0: p0.z,
            z1: p1.z,
            k: p0.y,
            material: material.clone(),
        }));
        sides.push(Arc::new(YzRect {
            y0: p0.y,
            y1: p1.y,
            z0: p0.z,
            z1: p1.z,
            k: p1.x,
            material: material.clone(),
        }));
        sides.push(Arc::new(YzRect {
            y0: p0.y,
            y1: p1.y,
            z0: p0.z,
            z1: p1.z,
            k: p0.x,
            material,
        }));
        AxisBox {
            minimum: p0,
            maximum: p1,
            sides,
        }
    }
}

impl Hittable for AxisBox {
    fn hit<'scene>(
        &'scene self,
        r: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut PrtRng,
    ) -> Option<Hit<'scene>> {
        self.sides.hit(r, t_min, t_max, rng)
    }

    fn aabb(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        Some(Aabb {
            minimum: self.minimum,
            maximum: self.maximum,
        })
    }
}
