//! Ray/sphere intersection.

use ember_core::Sphere;
use ember_math::{Interval, Ray, Vec3};

/// Record of the nearest ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Ray parameter t where the intersection occurs (always > 0)
    pub hit_distance: f32,
    /// Point of intersection in world space
    pub world_position: Vec3,
    /// Outward unit normal at the intersection
    pub world_normal: Vec3,
    /// Index of the sphere that was hit
    pub object_index: usize,
}

/// Nearest root of `ray` against one sphere, if it lies in front of the origin.
///
/// Solves `a*t^2 + b*t + c = 0` in the sphere's local frame and only ever
/// considers the smaller root. A ray starting inside the sphere therefore
/// does not hit it.
#[inline]
pub fn hit_sphere(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    let origin = ray.origin - sphere.position;

    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * origin.dot(ray.direction);
    let c = origin.dot(origin) - sphere.radius * sphere.radius;

    // b^2 - 4ac
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    Interval::FORWARD.surrounds(t).then_some(t)
}

/// Find the closest sphere hit by `ray`.
///
/// Ties keep the earlier sphere, since a later one must be strictly closer
/// to replace it.
pub fn find_closest_hit(ray: &Ray, spheres: &[Sphere]) -> Option<HitRecord> {
    let mut closest: Option<(usize, f32)> = None;

    for (index, sphere) in spheres.iter().enumerate() {
        let Some(t) = hit_sphere(ray, sphere) else {
            continue;
        };

        let best = closest.map_or(f32::INFINITY, |(_, d)| d);
        if t < best {
            closest = Some((index, t));
        }
    }

    closest.map(|(index, t)| closest_hit(ray, t, index, &spheres[index]))
}

fn closest_hit(ray: &Ray, hit_distance: f32, object_index: usize, sphere: &Sphere) -> HitRecord {
    let origin = ray.origin - sphere.position;
    let local_position = origin + ray.direction * hit_distance;

    // Assumes an unscaled sphere: the local hit point is the normal direction.
    let world_normal = local_position.normalize();

    HitRecord {
        hit_distance,
        world_position: local_position + sphere.position,
        world_normal,
        object_index,
    }
}
