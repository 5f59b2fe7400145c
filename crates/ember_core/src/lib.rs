//! Ember Core - Scene description for the progressive path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Material`
//! - **Validation**: `Scene::validate` and the `SceneError` it reports
//!
//! # Example
//!
//! ```
//! use ember_core::{Material, Scene, Sphere};
//! use ember_math::Vec3;
//!
//! let mut scene = Scene::new();
//! let grey = scene.add_material(Material::diffuse(Vec3::splat(0.5)));
//! scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, grey));
//! assert!(scene.validate().is_ok());
//! ```

pub mod error;
pub mod scene;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use scene::{Material, Scene, Sphere};
