use super::rng::*;
use super::types::*;

pub struct Camera {
    lower_left_corner: Vec3f,
    horizontal: Vec3f,
    vertical: Vec3f,
    origin: Vec3f,
    u: Vec3f,
    v: Vec3f,
    lens_radius: f32,
    time0: f32,
    time1: f32,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin: Vec3f,
        look_at: Vec3f,
        up: Vec3f,
        fov: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
        time0: f32,
        time1: f32,
    ) -> Camera {
        let theta = fov * std::f32::consts::PI / 180.;
        let half_height = f32::tan(theta / 2.);
        let half_width = aspect * half_height;
        let w = (origin - look_at).normalized();
        let u = up.cross(w).normalized();
        let v = w.cross(u);
        Camera {
            lower_left_corner: origin
                - (half_width * focus_dist * u)
                - (half_height * focus_dist * v)
                - focus_dist * w,
            horizontal: 2. * half_width * focus_dist * u,
            vertical: 2. * half_height * focus_dist * v,
            origin,
            u,
            v,
            lens_radius: aperture / 2.,
            time0,
            time1,
        }
    }

    /// Generates a primary ray through viewport coordinates `(s, t)`, with
    /// the origin jittered over the lens disc and the time stamp sampled over
    /// the shutter interval.
    pub fn gen_ray(&self, s: f32, t: f32, rng: &mut PrtRng) -> Ray {
        let rd = self.lens_radius * Vec3f::gen_uniform_random_in_unit_disc(rng);
        let offset = (self.u * rd.x) + (self.v * rd.y);
        let origin = self.origin + offset;
        Ray {
            origin,
            direction: self.lower_left_corner + (s * self.horizontal) + (t * self.vertical)
                - origin,
            time: rng.gen_range(self.time0..=self.time1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rays_stay_within_the_shutter_interval() {
        let camera = Camera::new(
            Vec3f::new(13., 2., 3.),
            Vec3f::zero(),
            Vec3f::new(0., 1., 0.),
            20.,
            1.5,
            0.1,
            10.,
            0.25,
            0.75,
        );
        let mut rng = PrtRng::seed_from_u64(0);
        for _ in 0..100 {
            let r = camera.gen_ray(0.5, 0.5, &mut rng);
            assert!(r.time >= 0.25 && r.time <= 0.75);
        }
    }

    #[test]
    fn pinhole_center_ray_points_at_the_target() {
        let origin = Vec3f::new(0., 0., 5.);
        let camera = Camera::new(
            origin,
            Vec3f::zero(),
            Vec3f::new(0., 1., 0.),
            90.,
            1.,
            0.,
            5.,
            0.,
            0.,
        );
        let mut rng = PrtRng::seed_from_u64(0);
        let r = camera.gen_ray(0.5, 0.5, &mut rng);
        let dir = r.direction.normalized();
        assert!((dir.z - (-1.)).abs() < 1e-5);
        assert!(dir.x.abs() < 1e-5);
        assert!(dir.y.abs() < 1e-5);
    }
}
