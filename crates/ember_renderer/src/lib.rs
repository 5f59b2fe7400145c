//! Ember Renderer - progressive CPU path tracing.
//!
//! Every frame traces one path per pixel, adds it to a running
//! per-pixel sum and shows the average. Frames keep accumulating until the
//! caller resets the frame index (camera moved, scene edited) or the
//! viewport is resized.
//!
//! # Example
//!
//! ```
//! use ember_core::Scene;
//! use ember_renderer::{Camera, Renderer};
//!
//! let scene = Scene::demo();
//! let mut camera = Camera::default();
//! let mut renderer = Renderer::new();
//!
//! camera.resize(32, 18);
//! renderer.resize(32, 18);
//! renderer.render(&scene, &camera).unwrap();
//! assert_eq!(renderer.image_data().len(), 32 * 18);
//! ```

mod accumulation;
mod bucket;
mod camera;
mod error;
mod integrator;
mod intersect;
pub mod random;
mod renderer;

pub use accumulation::{color_to_rgba, resolve, AccumulationBuffer};
pub use bucket::{generate_buckets, trace_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use integrator::{pixel_seed, trace_path, trace_pixel, BOUNCES, RAY_BIAS, SKY_COLOR};
pub use intersect::{find_closest_hit, hit_sphere, HitRecord};
pub use renderer::{DispatchMode, RenderSettings, RenderStatus, Renderer};

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Ray, Vec3, Vec4};
