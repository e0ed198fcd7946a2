// Demo scene builders. Scene construction is plain configuration: every
// builder returns a fully assembled world root plus a camera, and any
// invalid parameter surfaces as a BuildError before rendering starts.

use super::acceleration::*;
use super::camera::*;
use super::error::BuildError;
use super::hittable::*;
use super::materials::*;
use super::medium::*;
use super::perlin::*;
use super::rect::*;
use super::rng::*;
use super::scene::*;
use super::sphere::*;
use super::textures::*;
use super::transform::*;
use super::types::*;
use itertools::iproduct;
use std::sync::Arc;

/// The book's randomized marble field: a checkered ground plane, a grid of
/// small diffuse/metal/glass spheres (the diffuse ones bobbing upward over
/// the shutter interval), and three large feature spheres. The world root is
/// a BVH.
pub fn random_scene(nx: usize, ny: usize, rng: &mut PrtRng) -> Result<(Scene, Camera), BuildError> {
    // Clone the RNG for BVH construction to keep it independent from the
    // scene contents.
    let mut bvh_rng = rng.clone();

    let mut objects: Vec<SharedHittable> = vec![];

    let checker = Arc::new(CheckerTexture::from_colors(
        Vec3f::new(0.2, 0.3, 0.1),
        Vec3f::new(0.9, 0.9, 0.9),
    ));
    objects.push(Arc::new(Sphere::from(StationarySphere {
        center: Vec3f::new(0., -1000., 0.),
        radius: 1000.,
        material: Arc::new(Lambertian::new(checker)),
    })));

    for (a, b) in iproduct!(-11..11, -11..11) {
        let center = Vec3f::new(
            a as f32 + 0.9 * rng.gen::<f32>(),
            0.2,
            b as f32 + 0.9 * rng.gen::<f32>(),
        );
        if (center - Vec3f::new(4., 0.2, 0.)).mag() <= 0.9 {
            continue;
        }
        let choose_mat = rng.gen::<f32>();
        let sphere: SharedHittable = if choose_mat < 0.8 {
            // Diffuse, drifting upward while the shutter is open.
            let albedo = Vec3f::new(
                rng.gen::<f32>() * rng.gen::<f32>(),
                rng.gen::<f32>() * rng.gen::<f32>(),
                rng.gen::<f32>() * rng.gen::<f32>(),
            );
            let center1 = center + Vec3f::new(0., rng.gen_range(0.0..0.5), 0.);
            Arc::new(Sphere::new(
                center,
                center1,
                0.,
                1.,
                0.2,
                Arc::new(Lambertian::solid(albedo)),
            ))
        } else if choose_mat < 0.95 {
            // Metal
            let albedo = Vec3f::new(
                0.5 * (1. + rng.gen::<f32>()),
                0.5 * (1. + rng.gen::<f32>()),
                0.5 * (1. + rng.gen::<f32>()),
            );
            let fuzz = 0.5 * rng.gen::<f32>();
            Arc::new(Sphere::from(StationarySphere {
                center,
                radius: 0.2,
                material: Arc::new(Metal::new(albedo, fuzz)),
            }))
        } else {
            // Glass
            Arc::new(Sphere::from(StationarySphere {
                center,
                radius: 0.2,
                material: Arc::new(Dielectric::new(1.5)?),
            }))
        };
        objects.push(sphere);
    }

    objects.push(Arc::new(Sphere::from(StationarySphere {
        center: Vec3f::new(0., 1., 0.),
        radius: 1.,
        material: Arc::new(Dielectric::new(1.5)?),
    })));
    objects.push(Arc::new(Sphere::from(StationarySphere {
        center: Vec3f::new(-4., 1., 0.),
        radius: 1.,
        material: Arc::new(Lambertian::solid(Vec3f::new(0.4, 0.2, 0.1))),
    })));
    objects.push(Arc::new(Sphere::from(StationarySphere {
        center: Vec3f::new(4., 1., 0.),
        radius: 1.,
        material: Arc::new(Metal::new(Vec3f::new(0.7, 0.6, 0.5), 0.)),
    })));

    let root = Arc::new(BvhNode::new(objects, 0., 1., &mut bvh_rng)?);
    let scene = Scene {
        root,
        background: Background::Sky,
    };

    let camera = Camera::new(
        Vec3f::new(13., 2., 3.),
        Vec3f::zero(),
        Vec3f::new(0., 1., 0.),
        20.,
        nx as f32 / ny as f32,
        0.1,
        10.,
        0.,
        1.,
    );

    Ok((scene, camera))
}

/// Procedural and raster textures under a rectangular area light: a Perlin
/// ground sphere, a marble sphere, and an image-mapped globe. The globe's
/// raster is looked up next to the binary; a missing file renders as the
/// fallback color instead of failing.
pub fn textured_spheres(
    nx: usize,
    ny: usize,
    rng: &mut PrtRng,
) -> Result<(Scene, Camera), BuildError> {
    let mut bvh_rng = rng.clone();

    let mut objects: Vec<SharedHittable> = vec![];

    let ground = Arc::new(NoiseTexture::new(Perlin::new(rng), 4.));
    objects.push(Arc::new(Sphere::from(StationarySphere {
        center: Vec3f::new(0., -1000., 0.),
        radius: 1000.,
        material: Arc::new(Lambertian::new(ground)),
    })));

    let marble = Arc::new(TurbulenceTexture::new(Perlin::new(rng), 4.));
    objects.push(Arc::new(Sphere::from(StationarySphere {
        center: Vec3f::new(0., 2., 0.),
        radius: 2.,
        material: Arc::new(Lambertian::new(marble)),
    })));

    let globe = Arc::new(ImageTexture::open("assets/earthmap.jpg"));
    objects.push(Arc::new(Sphere::from(StationarySphere {
        center: Vec3f::new(4., 1., 2.),
        radius: 1.,
        material: Arc::new(Lambertian::new(globe)),
    })));

    objects.push(Arc::new(XyRect {
        x0: 3.,
        x1: 5.,
        y0: 1.,
        y1: 3.,
        k: -2.,
        material: Arc::new(DiffuseLight::solid(Vec3f::broadcast(4.))),
    }));

    let root = Arc::new(BvhNode::new(objects, 0., 1., &mut bvh_rng)?);
    let scene = Scene {
        root,
        background: Background::Solid(Vec3f::broadcast(0.03)),
    };

    let camera = Camera::new(
        Vec3f::new(26., 3., 6.),
        Vec3f::new(0., 2., 0.),
        Vec3f::new(0., 1., 0.),
        20.,
        nx as f32 / ny as f32,
        0.,
        10.,
        0.,
        1.,
    );

    Ok((scene, camera))
}

/// The Cornell box with the two interior boxes replaced by participating
/// media: a dark smoke volume and a white fog volume.
pub fn cornell_smoke(
    nx: usize,
    ny: usize,
    rng: &mut PrtRng,
) -> Result<(Scene, Camera), BuildError> {
    let mut bvh_rng = rng.clone();

    let red: SharedMaterial = Arc::new(Lambertian::solid(Vec3f::new(0.65, 0.05, 0.05)));
    let white: SharedMaterial = Arc::new(Lambertian::solid(Vec3f::new(0.73, 0.73, 0.73)));
    let green: SharedMaterial = Arc::new(Lambertian::solid(Vec3f::new(0.12, 0.45, 0.15)));
    let light: SharedMaterial = Arc::new(DiffuseLight::solid(Vec3f::broadcast(7.)));

    let mut objects: Vec<SharedHittable> = vec![
        Arc::new(YzRect {
            y0: 0.,
            y1: 555.,
            z0: 0.,
            z1: 555.,
            k: 555.,
            material: green,
        }),
        Arc::new(YzRect {
            y0: 0.,
            y1: 555.,
            z0: 0.,
            z1: 555.,
            k: 0.,
            material: red,
        }),
        Arc::new(XzRect {
            x0: 113.,
            x1: 443.,
            z0: 127.,
            z1: 432.,
            k: 554.,
            material: light,
        }),
        Arc::new(XzRect {
            x0: 0.,
            x1: 555.,
            z0: 0.,
            z1: 555.,
            k: 0.,
            material: white.clone(),
        }),
        Arc::new(XzRect {
            x0: 0.,
            x1: 555.,
            z0: 0.,
            z1: 555.,
            k: 555.,
            material: white.clone(),
        }),
        Arc::new(XyRect {
            x0: 0.,
            x1: 555.,
            y0: 0.,
            y1: 555.,
            k: 555.,
            material: white.clone(),
        }),
    ];

    let box1: SharedHittable = Arc::new(Translate::new(
        Arc::new(RotateY::new(
            Arc::new(AxisBox::new(
                Vec3f::zero(),
                Vec3f::new(165., 330., 165.),
                white.clone(),
            )),
            15.,
        )),
        Vec3f::new(265., 0., 295.),
    ));
    objects.push(Arc::new(ConstantMedium::solid(
        box1,
        0.01,
        Vec3f::zero(),
    )?));

    let box2: SharedHittable = Arc::new(Translate::new(
        Arc::new(RotateY::new(
            Arc::new(AxisBox::new(
                Vec3f::zero(),
                Vec3f::new(165., 165., 165.),
                white,
            )),
            -18.,
        )),
        Vec3f::new(130., 0., 65.),
    ));
    objects.push(Arc::new(ConstantMedium::solid(box2, 0.01, Vec3f::one())?));

    let root = Arc::new(BvhNode::new(objects, 0., 1., &mut bvh_rng)?);
    let scene = Scene {
        root,
        background: Background::Solid(Vec3f::zero()),
    };

    let camera = Camera::new(
        Vec3f::new(278., 278., -800.),
        Vec3f::new(278., 278., 0.),
        Vec3f::new(0., 1., 0.),
        40.,
        nx as f32 / ny as f32,
        0.,
        10.,
        0.,
        1.,
    );

    Ok((scene, camera))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_produce_bounded_worlds() {
        let mut rng = PrtRng::seed_from_u64(0);
        for builder in &[random_scene, textured_spheres, cornell_smoke] {
            let (scene, _camera) = builder(300, 200, &mut rng).unwrap();
            assert!(scene.root.aabb(0., 1.).is_some());
        }
    }

    #[test]
    fn cornell_walls_enclose_the_camera_target() {
        let mut rng = PrtRng::seed_from_u64(0);
        let (scene, _camera) = cornell_smoke(300, 300, &mut rng).unwrap();
        let bb = scene.root.aabb(0., 1.).unwrap();
        assert!(bb.minimum.x <= 0. && bb.maximum.x >= 555.);
        assert!(bb.minimum.y <= 0. && bb.maximum.y >= 555.);
    }
}
