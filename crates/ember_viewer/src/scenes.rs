//! Scenes the viewer can build.

use ember_core::{Material, Scene, Sphere};
use ember_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The demo ground plus a grid of small random spheres.
///
/// Roughly one in eight spheres glows.
pub fn random_scene(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new();

    let ground = scene.add_material(Material::diffuse(Vec3::new(0.2, 0.3, 1.0)).with_roughness(0.1));
    scene.add_sphere(Sphere::new(Vec3::new(0.0, -101.0, 0.0), 100.0, ground));

    for a in -3..3 {
        for b in -3..3 {
            let radius = rng.gen_range(0.15..0.35);
            let center = Vec3::new(
                a as f32 + rng.gen_range(0.0..0.6),
                radius - 1.0,
                b as f32 + rng.gen_range(0.0..0.6),
            );

            let albedo = Vec3::new(rng.gen(), rng.gen(), rng.gen());
            let mut material = Material::diffuse(albedo).with_roughness(rng.gen());
            if rng.gen_bool(0.125) {
                material = material.with_emission(albedo, rng.gen_range(1.0..4.0));
            }

            let index = scene.add_material(material);
            scene.add_sphere(Sphere::new(center, radius, index));
        }
    }

    log::info!("Built random scene with {} spheres (seed {})", scene.sphere_count(), seed);
    scene
}
