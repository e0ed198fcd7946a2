use super::error::BuildError;
use super::hittable::*;
use super::rng::*;
use super::textures::*;
use super::types::*;
use std::sync::Arc;

pub trait Material {
    /// Decides whether `r` scatters off the hit surface, returning the
    /// attenuation and the outgoing ray. `None` means the ray was absorbed.
    fn scatter(&self, r: &Ray, hit: &Hit, rng: &mut PrtRng) -> Option<ScatteredRay>;

    /// Radiance emitted at the hit, independent of scattering. Most materials
    /// emit nothing.
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3f) -> Vec3f {
        Vec3f::zero()
    }
}

pub fn reflect(v: Vec3f, n: Vec3f) -> Vec3f {
    v - 2. * v.dot(n) * n
}

/// Snell's law, decomposed into the components perpendicular and parallel to
/// the normal. `uv` must be a unit vector.
pub fn refract(uv: Vec3f, n: Vec3f, etai_over_etat: f32) -> Vec3f {
    let cos_theta = (-uv).dot(n).min(1.);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1. - r_out_perp.mag_sq()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

fn near_zero(v: Vec3f) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

// Lambertian

pub struct Lambertian {
    albedo: SharedTexture,
}

impl Lambertian {
    pub fn new(albedo: SharedTexture) -> Lambertian {
        Lambertian { albedo }
    }

    pub fn solid(color: Vec3f) -> Lambertian {
        Lambertian {
            albedo: Arc::new(SolidColor::new(color)),
        }
    }
}

impl Material for Lambertian {
    fn scatter(&self, r: &Ray, hit: &Hit, rng: &mut PrtRng) -> Option<ScatteredRay> {
        let direction = hit.normal + Vec3f::gen_uniform_random_unit(rng);
        Some(ScatteredRay {
            r: Ray {
                origin: hit.p,
                // Cancellation can leave a degenerate direction.
                direction: if near_zero(direction) {
                    hit.normal
                } else {
                    direction
                },
                time: r.time,
            },
            attenuation: self.albedo.value(hit.u, hit.v, hit.p),
        })
    }
}

// Metal

pub struct Metal {
    albedo: Vec3f,
    fuzz: f32,
}

impl Metal {
    pub fn new(albedo: Vec3f, fuzz: f32) -> Metal {
        Metal {
            albedo,
            fuzz: fuzz.clamp(0., 0.999),
        }
    }
}

impl Material for Metal {
    fn scatter(&self, r: &Ray, hit: &Hit, rng: &mut PrtRng) -> Option<ScatteredRay> {
        let direction = reflect(r.direction.normalized(), hit.normal)
            + self.fuzz * Vec3f::gen_uniform_random_in_unit_sphere(rng);
        if direction.dot(hit.normal) > 0. {
            Some(ScatteredRay {
                r: Ray {
                    origin: hit.p,
                    direction,
                    time: r.time,
                },
                attenuation: self.albedo,
            })
        } else {
            // Fuzzing pushed the ray below the surface: absorbed.
            None
        }
    }
}

// Dielectric

fn reflectance(cosine: f32, ref_idx: f32) -> f32 {
    // Use Schlick's approximation for reflectance.
    let r0 = ((1. - ref_idx) / (1. + ref_idx)).powf(2.);
    r0 + (1. - r0) * (1. - cosine).powf(5.)
}

pub struct Dielectric {
    ref_idx: f32,
}

impl Dielectric {
    pub fn new(ref_idx: f32) -> Result<Dielectric, BuildError> {
        if ref_idx < 0. {
            return Err(BuildError::InvalidRefractiveIndex(ref_idx));
        }
        Ok(Dielectric { ref_idx })
    }
}

impl Material for Dielectric {
    fn scatter(&self, r: &Ray, hit: &Hit, rng: &mut PrtRng) -> Option<ScatteredRay> {
        let refraction_ratio = if hit.front_face {
            1. / self.ref_idx
        } else {
            self.ref_idx
        };

        let unit_direction = r.direction.normalized();
        let cos_theta = (-unit_direction).dot(hit.normal).min(1.);
        let sin_theta = (1. - (cos_theta * cos_theta)).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.;
        let direction =
            if cannot_refract || reflectance(cos_theta, refraction_ratio) > rng.gen::<f32>() {
                reflect(unit_direction, hit.normal)
            } else {
                refract(unit_direction, hit.normal, refraction_ratio)
            };

        Some(ScatteredRay {
            r: Ray {
                origin: hit.p,
                direction,
                time: r.time,
            },
            attenuation: Vec3f::one(),
        })
    }
}

// DiffuseLight

pub struct DiffuseLight {
    emit: SharedTexture,
}

impl DiffuseLight {
    pub fn new(emit: SharedTexture) -> DiffuseLight {
        DiffuseLight { emit }
    }

    pub fn solid(color: Vec3f) -> DiffuseLight {
        DiffuseLight {
            emit: Arc::new(SolidColor::new(color)),
        }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _r: &Ray, _hit: &Hit, _rng: &mut PrtRng) -> Option<ScatteredRay> {
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Vec3f) -> Vec3f {
        self.emit.value(u, v, p)
    }
}

// Isotropic

pub struct Isotropic {
    albedo: SharedTexture,
}

impl Isotropic {
    pub fn new(albedo: SharedTexture) -> Isotropic {
        Isotropic { albedo }
    }

    pub fn solid(color: Vec3f) -> Isotropic {
        Isotropic {
            albedo: Arc::new(SolidColor::new(color)),
        }
    }
}

impl Material for Isotropic {
    fn scatter(&self, r: &Ray, hit: &Hit, rng: &mut PrtRng) -> Option<ScatteredRay> {
        Some(ScatteredRay {
            r: Ray {
                origin: hit.p,
                direction: Vec3f::gen_uniform_random_unit(rng),
                time: r.time,
            },
            attenuation: self.albedo.value(hit.u, hit.v, hit.p),
        })
    }
}
