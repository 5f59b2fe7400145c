//! Scene types for Ember.
//!
//! A scene is two flat lists: spheres and the materials they reference by
//! index. The renderer borrows a scene immutably for the whole of a frame,
//! so edits happen between frames only.

use ember_math::Vec3;

use crate::error::{SceneError, SceneResult};

/// Surface description shared by any number of spheres.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Diffuse/albedo color (RGB, 0-1)
    pub albedo: Vec3,

    /// Roughness factor (0=smooth, 1=rough). Carried for editing; the
    /// diffuse bounce does not read it.
    pub roughness: f32,

    /// Metallic factor (0=dielectric, 1=metal). Not read by the bounce either.
    pub metallic: f32,

    /// Emitted light color (RGB)
    pub emission_color: Vec3,

    /// Scale applied to `emission_color`
    pub emission_power: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Vec3::ONE,
            roughness: 1.0,
            metallic: 0.0,
            emission_color: Vec3::ZERO,
            emission_power: 0.0,
        }
    }
}

impl Material {
    /// Create a non-emissive material with the given albedo.
    pub fn diffuse(albedo: Vec3) -> Self {
        Self {
            albedo,
            ..Default::default()
        }
    }

    /// Set roughness.
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    /// Set metallic.
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic;
        self
    }

    /// Make this material emit `color * power`.
    pub fn with_emission(mut self, color: Vec3, power: f32) -> Self {
        self.emission_color = color;
        self.emission_power = power;
        self
    }

    /// Emitted radiance, computed on demand.
    #[inline]
    pub fn emission(&self) -> Vec3 {
        self.emission_color * self.emission_power
    }

    // Emission only ever adds to a path's light, so keeping it finite and
    // non-negative rules out NaN radiance from mixed-sign sums.
    fn is_valid(&self) -> bool {
        self.albedo.is_finite()
            && self.roughness.is_finite()
            && self.metallic.is_finite()
            && self.emission_color.is_finite()
            && self.emission_color.min_element() >= 0.0
            && self.emission_power.is_finite()
            && self.emission_power >= 0.0
            && self.emission().is_finite()
    }
}

/// A sphere placed in world space. Only translation is supported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    /// Center in world space
    pub position: Vec3,
    pub radius: f32,
    /// Index into `Scene::materials`
    pub material_index: usize,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            radius: 0.5,
            material_index: 0,
        }
    }
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(position: Vec3, radius: f32, material_index: usize) -> Self {
        Self {
            position,
            radius,
            material_index,
        }
    }
}

/// The renderable world.
///
/// Sphere order is significant: hit results refer to spheres by index, and
/// the first of two spheres at exactly the same distance wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub materials: Vec<Material>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Append a sphere and return its index.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        self.spheres.push(sphere);
        self.spheres.len() - 1
    }

    /// Get the number of spheres.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Get the number of materials.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Check everything the renderer relies on without re-checking per ray:
    /// every material index is in range, radii are finite and positive, and
    /// no value is NaN or infinite.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, material) in self.materials.iter().enumerate() {
            if !material.is_valid() {
                return Err(SceneError::NonFiniteMaterial { material: index });
            }
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if sphere.material_index >= self.materials.len() {
                return Err(SceneError::MaterialIndexOutOfRange {
                    sphere: index,
                    index: sphere.material_index,
                    material_count: self.materials.len(),
                });
            }
            if !sphere.position.is_finite() {
                return Err(SceneError::NonFiniteSphere { sphere: index });
            }
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    sphere: index,
                    radius: sphere.radius,
                });
            }
        }

        Ok(())
    }

    /// The starter scene: a pink sphere, an orange light sphere beside it,
    /// and a large blue sphere acting as the ground.
    pub fn demo() -> Self {
        let mut scene = Self::new();

        let pink = scene.add_material(Material::diffuse(Vec3::new(1.0, 0.0, 1.0)).with_roughness(0.0));
        let blue = scene.add_material(Material::diffuse(Vec3::new(0.2, 0.3, 1.0)).with_roughness(0.1));
        let orange_albedo = Vec3::new(0.8, 0.5, 0.2);
        let orange = scene.add_material(
            Material::diffuse(orange_albedo)
                .with_roughness(0.1)
                .with_emission(orange_albedo, 2.0),
        );

        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, pink));
        scene.add_sphere(Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0, orange));
        scene.add_sphere(Sphere::new(Vec3::new(0.0, -101.0, 0.0), 100.0, blue));

        log::debug!(
            "Built demo scene with {} spheres, {} materials",
            scene.sphere_count(),
            scene.material_count()
        );

        scene
    }
}
