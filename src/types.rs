// Provides basic types.

use ultraviolet;

pub type Vec3f = ultraviolet::Vec3;

#[derive(Clone, Copy)]
pub struct Ray {
    pub origin: Vec3f,
    pub direction: Vec3f,
    pub time: f32,
}

impl Ray {
    pub fn point_at(&self, t: f32) -> Vec3f {
        self.origin + (t * self.direction)
    }
}

#[derive(Clone, Copy)]
pub struct ScatteredRay {
    pub r: Ray,
    pub attenuation: Vec3f,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    X = 0,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Extracts this axis' component of `v`.
    pub fn of(self, v: Vec3f) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}
