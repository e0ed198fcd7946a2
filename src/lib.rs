pub mod acceleration;
pub mod camera;
pub mod error;
pub mod hittable;
pub mod materials;
pub mod medium;
pub mod perlin;
pub mod rect;
pub mod rng;
pub mod scene;
pub mod scenes;
pub mod sphere;
pub mod textures;
pub mod threadpool;
pub mod transform;
pub mod types;

use camera::Camera;
use rayon::prelude::*;
use rng::*;
use scene::Scene;
use std::sync::atomic::{AtomicUsize, Ordering};
use threadpool::THREAD_RNG_KEY;
use types::*;

/// Offset of the intersection interval, excluding self-intersections of
/// scattered rays with the surface they left ("shadow acne").
const T_MIN: f32 = 1e-4;

/// Estimates the radiance arriving along `r`. This is `ray_color` in the
/// book, rewritten as a bounded loop: emission is accumulated through the
/// running path throughput, and an exhausted bounce budget simply stops
/// contributing (a depth of 0 yields black).
pub fn trace(r: &Ray, scene: &Scene, depth: u32, rng: &mut PrtRng) -> Vec3f {
    let mut color = Vec3f::zero();
    let mut throughput = Vec3f::one();
    let mut ray = *r;
    for _ in 0..depth {
        match scene.hit(&ray, T_MIN, f32::MAX, rng) {
            Some(hit) => {
                color += throughput * hit.material.emitted(hit.u, hit.v, hit.p);
                match hit.material.scatter(&ray, &hit, rng) {
                    Some(sc) => {
                        throughput *= sc.attenuation;
                        ray = sc.r;
                    }
                    // Absorbed (or a pure emitter): the path ends here.
                    None => return color,
                }
            }
            None => {
                color += throughput * scene.background.color(&ray);
                return color;
            }
        }
    }
    color
}

/// Renders the scene into an 8-bit RGB buffer. The buffer is split into
/// contiguous horizontal bands, one per pool worker; every band is written by
/// exactly one worker and the bands are disjoint, so the only shared state is
/// the advisory `pxcount` progress counter.
#[allow(clippy::too_many_arguments)]
pub fn tracescene(
    nx: usize,
    ny: usize,
    ns: usize,
    depth: u32,
    scene: &Scene,
    camera: &Camera,
    pool: &rayon::ThreadPool,
    pxcount: &AtomicUsize,
) -> Vec<u8> {
    const BYTES_PER_PIXEL: usize = 3;
    let mut pixels = vec![0u8; ny * nx * BYTES_PER_PIXEL];
    let workers = pool.current_num_threads().max(1);
    let band_rows = (ny + workers - 1) / workers;
    let band_len = band_rows * nx * BYTES_PER_PIXEL;
    pool.install(|| {
        pixels
            .par_chunks_mut(band_len)
            .enumerate()
            .for_each(|(band, rows)| {
                let raw = THREAD_RNG_KEY.with(|uc| uc.get());
                // Each rayon worker only ever touches its own thread-local
                // generator.
                let rng = unsafe { &mut *raw };
                for (pixel, chunk) in rows.chunks_mut(BYTES_PER_PIXEL).enumerate() {
                    let idx = band * band_rows * nx + pixel;
                    let x = (idx % nx) as f32;
                    let y = (ny - 1 - idx / nx) as f32;
                    let mut c = Vec3f::zero();
                    for _ in 0..ns {
                        let ray = camera.gen_ray(
                            (x + rng.gen::<f32>()) / nx as f32,
                            (y + rng.gen::<f32>()) / ny as f32,
                            rng,
                        );
                        c += trace(&ray, scene, depth, rng);
                    }
                    // Exposure scaling, then the book's simple gamma 2.0
                    // (not the sRGB OETF), then clamp and quantize.
                    let scale = 1. / ns as f32;
                    chunk[0] = (256. * (scale * c.x).sqrt().clamp(0., 0.999)) as u8;
                    chunk[1] = (256. * (scale * c.y).sqrt().clamp(0., 0.999)) as u8;
                    chunk[2] = (256. * (scale * c.z).sqrt().clamp(0., 0.999)) as u8;
                    pxcount.fetch_add(1, Ordering::Relaxed);
                }
            });
    });
    pixels
}
