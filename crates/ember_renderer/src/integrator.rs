//! Per-pixel path integrator.
//!
//! A simplified unidirectional path tracer: a fixed number of diffuse
//! bounces, emission picked up directly at every hit, and a constant sky
//! color for rays that escape.

use crate::intersect::find_closest_hit;
use crate::random::random_unit_vector;
use crate::Camera;
use ember_core::Scene;
use ember_math::{Ray, Vec3, Vec4};

/// Number of bounces traced per pixel per frame.
pub const BOUNCES: u32 = 5;

/// Radiance returned by rays that leave the scene.
pub const SKY_COLOR: Vec3 = Vec3::new(0.6, 0.7, 0.9);

/// Distance a bounced ray's origin is pushed along the surface normal.
pub const RAY_BIAS: f32 = 1e-4;

/// Seed for one pixel in one frame.
///
/// Frame 1 of every accumulation cycle uses the same seeds, which is what
/// makes a reset reproduce the first frame exactly.
#[inline]
pub fn pixel_seed(x: u32, y: u32, width: u32, frame_index: u32) -> u32 {
    x.wrapping_add(y.wrapping_mul(width)).wrapping_mul(frame_index)
}

/// Trace one path starting at `ray` and return the gathered light.
///
/// Emission is added without weighting by the path throughput. That is
/// not physically based, and it is the intended look.
pub fn trace_path(mut ray: Ray, scene: &Scene, mut seed: u32) -> Vec3 {
    let mut light = Vec3::ZERO;
    let mut contribution = Vec3::ONE;

    for bounce in 0..BOUNCES {
        seed = seed.wrapping_add(bounce);

        let Some(hit) = find_closest_hit(&ray, &scene.spheres) else {
            light += SKY_COLOR * contribution;
            break;
        };

        // Material indices are checked by Scene::validate before a frame starts.
        let sphere = &scene.spheres[hit.object_index];
        let material = &scene.materials[sphere.material_index];

        light += material.emission();
        contribution *= material.albedo;

        let normal = hit.world_normal;
        ray.origin = hit.world_position + normal * RAY_BIAS;
        ray.direction = (normal + random_unit_vector(&mut seed))
            .try_normalize()
            .unwrap_or(normal);
    }

    light
}

/// Radiance for pixel (x, y) of the camera's viewport in the given frame.
///
/// Returns `(light, 1.0)`.
pub fn trace_pixel(x: u32, y: u32, camera: &Camera, scene: &Scene, frame_index: u32) -> Vec4 {
    let ray = Ray::new(camera.position(), camera.ray_direction(x, y));
    let seed = pixel_seed(x, y, camera.viewport().0, frame_index);

    trace_path(ray, scene, seed).extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::{Material, Sphere};

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    fn camera(width: u32, height: u32) -> Camera {
        let mut camera = Camera::default();
        camera.resize(width, height);
        camera
    }

    #[test]
    fn test_pixel_seed() {
        assert_eq!(pixel_seed(3, 2, 10, 1), 23);
        assert_eq!(pixel_seed(3, 2, 10, 4), 92);
        assert_eq!(pixel_seed(0, 0, 10, 7), 0);
        // Wraps instead of overflowing
        assert_eq!(pixel_seed(u32::MAX, 0, 1, 2), u32::MAX.wrapping_mul(2));
    }

    #[test]
    fn test_miss_returns_sky() {
        let scene = Scene::new();
        let camera = camera(8, 4);

        for (x, y) in [(0, 0), (3, 2), (7, 3)] {
            let color = trace_pixel(x, y, &camera, &scene, 1);
            assert_eq!(color, SKY_COLOR.extend(1.0));
        }
    }

    #[test]
    fn test_black_absorber_blocks_sky() {
        let mut scene = Scene::new();
        let black = scene.add_material(Material::diffuse(Vec3::ZERO));
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, black));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let light = trace_path(ray, &scene, 17);
        assert_eq!(light, Vec3::ZERO);
    }

    #[test]
    fn test_single_bounce_to_sky() {
        // A lone convex sphere: the bounce leaves along the normal's
        // hemisphere and cannot hit the sphere again.
        let mut scene = Scene::new();
        let grey = scene.add_material(Material::diffuse(Vec3::splat(0.5)));
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, grey));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let light = trace_path(ray, &scene, 3);
        assert!(approx_eq(light, SKY_COLOR * 0.5));
    }

    #[test]
    fn test_emission_is_not_attenuated() {
        // Known deviation from physically based rendering: emission is added
        // at full strength even though the albedo would attenuate it.
        let mut scene = Scene::new();
        let lamp = scene.add_material(
            Material::diffuse(Vec3::ZERO).with_emission(Vec3::new(1.0, 0.5, 0.25), 2.0),
        );
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, lamp));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let light = trace_path(ray, &scene, 11);

        // Albedo is zero, so the sky term vanishes and only emission remains.
        assert!(approx_eq(light, Vec3::new(2.0, 1.0, 0.5)));
    }

    #[test]
    fn test_roughness_and_metallic_are_ignored() {
        let mut plain = Scene::new();
        let m = plain.add_material(Material::diffuse(Vec3::splat(0.7)));
        plain.add_sphere(Sphere::new(Vec3::ZERO, 1.0, m));
        plain.add_sphere(Sphere::new(Vec3::new(0.0, -101.0, 0.0), 100.0, m));

        let mut shiny = plain.clone();
        shiny.materials[0] = shiny.materials[0].clone().with_roughness(0.0).with_metallic(1.0);

        let ray = Ray::new(Vec3::new(0.3, 0.2, 5.0), Vec3::NEG_Z);
        for seed in [1, 99, 12345] {
            assert_eq!(trace_path(ray, &plain, seed), trace_path(ray, &shiny, seed));
        }
    }

    #[test]
    fn test_trace_pixel_is_deterministic() {
        let scene = Scene::demo();
        let camera = camera(16, 9);

        for frame in [1, 2, 50] {
            let a = trace_pixel(8, 4, &camera, &scene, frame);
            let b = trace_pixel(8, 4, &camera, &scene, frame);
            assert_eq!(a, b);
            assert_eq!(a.w, 1.0);
            assert!(a.is_finite());
        }
    }
}
