use super::perlin::*;
use super::types::*;
use image::RgbImage;
use std::path::Path;
use std::sync::Arc;

pub type SharedTexture = Arc<dyn Texture + Send + Sync>;

pub trait Texture {
    fn value(&self, u: f32, v: f32, p: Vec3f) -> Vec3f;
}

// SolidColor

pub struct SolidColor {
    color: Vec3f,
}

impl SolidColor {
    pub fn new(color: Vec3f) -> SolidColor {
        SolidColor { color }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3f) -> Vec3f {
        self.color
    }
}

// CheckerTexture

pub struct CheckerTexture {
    even: SharedTexture,
    odd: SharedTexture,
}

impl CheckerTexture {
    pub fn new(even: SharedTexture, odd: SharedTexture) -> CheckerTexture {
        CheckerTexture { even, odd }
    }

    pub fn from_colors(even: Vec3f, odd: Vec3f) -> CheckerTexture {
        CheckerTexture {
            even: Arc::new(SolidColor::new(even)),
            odd: Arc::new(SolidColor::new(odd)),
        }
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3f) -> Vec3f {
        let sines = (10. * p.x).sin() * (10. * p.y).sin() * (10. * p.z).sin();
        if sines < 0. {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

// NoiseTexture

pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(noise: Perlin, scale: f32) -> NoiseTexture {
        NoiseTexture { noise, scale }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3f) -> Vec3f {
        // Remap gradient noise from [-1, 1] to a grey level in [0, 1].
        Vec3f::one() * 0.5 * (1. + self.noise.noise(self.scale * p))
    }
}

// TurbulenceTexture

pub struct TurbulenceTexture {
    noise: Perlin,
    scale: f32,
}

impl TurbulenceTexture {
    pub fn new(noise: Perlin, scale: f32) -> TurbulenceTexture {
        TurbulenceTexture { noise, scale }
    }
}

impl Texture for TurbulenceTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3f) -> Vec3f {
        // Marble-like banding: turbulence phase-shifts a sine along z.
        Vec3f::one() * 0.5 * (1. + (self.scale * p.z + 10. * self.noise.turbulence(p, 7)).sin())
    }
}

// ImageTexture

/// Fallback for a missing or undecodable raster, loud enough to spot in the
/// rendered output.
fn image_fallback() -> Vec3f {
    Vec3f::new(0., 1., 1.)
}

pub struct ImageTexture {
    image: Option<RgbImage>,
}

impl ImageTexture {
    /// Decodes the raster at `path`. A failure is not fatal: the texture
    /// degrades to a solid fallback color so the render still completes.
    pub fn open<P: AsRef<Path>>(path: P) -> ImageTexture {
        let image = match image::open(path.as_ref()) {
            Ok(img) => Some(img.into_rgb8()),
            Err(e) => {
                log::warn!(
                    "failed to load texture {}: {}",
                    path.as_ref().display(),
                    e
                );
                None
            }
        };
        ImageTexture { image }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3f) -> Vec3f {
        let image = match &self.image {
            Some(image) => image,
            None => return image_fallback(),
        };
        let (width, height) = image.dimensions();
        let u = u.clamp(0., 1.);
        // Image coordinates grow downward.
        let v = 1. - v.clamp(0., 1.);
        let i = ((u * width as f32) as u32).min(width - 1);
        let j = ((v * height as f32) as u32).min(height - 1);
        let pixel = image.get_pixel(i, j);
        const COLOR_SCALE: f32 = 1. / 255.;
        COLOR_SCALE * Vec3f::new(pixel[0] as f32, pixel[1] as f32, pixel[2] as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PrtRng, SeedableRng};

    #[test]
    fn solid_color_is_uniform() {
        let t = SolidColor::new(Vec3f::new(0.2, 0.4, 0.8));
        let c = t.value(0.3, 0.9, Vec3f::new(5., -5., 0.));
        assert_eq!(c.x, 0.2);
        assert_eq!(c.y, 0.4);
        assert_eq!(c.z, 0.8);
    }

    #[test]
    fn checker_alternates_by_sine_sign() {
        let t = CheckerTexture::from_colors(Vec3f::one(), Vec3f::zero());
        // sin(10 * π/20) = sin(π/2) = 1 on each axis: even cell.
        let p_even = Vec3f::broadcast(std::f32::consts::PI / 20.);
        assert_eq!(t.value(0., 0., p_even).x, 1.);
        // Flipping one axis flips the sign.
        let p_odd = Vec3f::new(
            -std::f32::consts::PI / 20.,
            std::f32::consts::PI / 20.,
            std::f32::consts::PI / 20.,
        );
        assert_eq!(t.value(0., 0., p_odd).x, 0.);
    }

    #[test]
    fn noise_texture_is_grey_in_range() {
        let mut rng = PrtRng::seed_from_u64(5);
        let t = NoiseTexture::new(Perlin::new(&mut rng), 4.);
        let c = t.value(0., 0., Vec3f::new(1.3, 2.1, -0.7));
        assert!(c.x >= 0. && c.x <= 1.);
        assert_eq!(c.x, c.y);
        assert_eq!(c.y, c.z);
    }

    #[test]
    fn missing_image_degrades_to_fallback() {
        let t = ImageTexture::open("definitely/not/a/real/file.png");
        let c = t.value(0.5, 0.5, Vec3f::zero());
        let fallback = image_fallback();
        assert_eq!(c.x, fallback.x);
        assert_eq!(c.y, fallback.y);
        assert_eq!(c.z, fallback.z);
    }
}
