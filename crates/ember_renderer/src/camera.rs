//! Camera for ray generation.
//!
//! The camera caches one primary ray direction per pixel. Directions are
//! rebuilt whenever the viewport, position or orientation changes, so the
//! integrator only ever indexes into a slice.

use ember_math::{Mat4, Quat, Vec2, Vec3, Vec4};
use rayon::prelude::*;

// Squared sine of the smallest angle allowed between forward and world up.
const MIN_UP_SIN_SQUARED: f32 = 1e-6;

/// Perspective camera that precomputes per-pixel ray directions.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,

    vertical_fov: f32, // Degrees
    near_clip: f32,
    far_clip: f32,

    viewport_width: u32,
    viewport_height: u32,

    // Cached computed values
    inverse_projection: Mat4,
    inverse_view: Mat4,
    ray_directions: Vec<Vec3>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(45.0, 0.1, 100.0)
    }
}

impl Camera {
    /// Create a camera at (0, 0, 6) looking down -Z.
    ///
    /// The viewport starts empty; call `resize` before rendering.
    pub fn new(vertical_fov: f32, near_clip: f32, far_clip: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 6.0),
            forward: Vec3::NEG_Z,
            vertical_fov,
            near_clip,
            far_clip,
            viewport_width: 0,
            viewport_height: 0,
            inverse_projection: Mat4::IDENTITY,
            inverse_view: Mat4::IDENTITY,
            ray_directions: Vec::new(),
        };
        camera.recalculate_view();
        camera
    }

    /// Update the viewport size. Same-size calls do nothing.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.viewport_width && height == self.viewport_height {
            return;
        }

        self.viewport_width = width;
        self.viewport_height = height;

        self.recalculate_projection();
        self.recalculate_ray_directions();
    }

    /// Move the camera to `position`. Returns true if it moved.
    pub fn set_position(&mut self, position: Vec3) -> bool {
        if position == self.position {
            return false;
        }

        self.position = position;
        self.recalculate_view();
        self.recalculate_ray_directions();
        true
    }

    /// Move the camera by `delta`. Returns true if it moved.
    pub fn translate(&mut self, delta: Vec3) -> bool {
        self.set_position(self.position + delta)
    }

    /// Point the camera along `direction`.
    ///
    /// Zero-length or non-finite directions are rejected and return false,
    /// as are directions (nearly) parallel to world up, which leave the
    /// view basis undefined.
    pub fn set_forward(&mut self, direction: Vec3) -> bool {
        let Some(forward) = direction.try_normalize() else {
            return false;
        };
        if forward.cross(Vec3::Y).length_squared() < MIN_UP_SIN_SQUARED {
            return false;
        }
        if forward == self.forward {
            return false;
        }

        self.forward = forward;
        self.recalculate_view();
        self.recalculate_ray_directions();
        true
    }

    /// Turn by `yaw` around world up and `pitch` around the camera's right
    /// axis, both in radians. Returns true if the orientation changed.
    ///
    /// A turn that would point the camera straight up or down is refused
    /// and leaves the orientation as it was.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) -> bool {
        if yaw == 0.0 && pitch == 0.0 {
            return false;
        }

        let Some(right) = self.forward.cross(Vec3::Y).try_normalize() else {
            return false;
        };

        let q = (Quat::from_axis_angle(right, -pitch) * Quat::from_axis_angle(Vec3::Y, -yaw)).normalize();
        self.set_forward(q * self.forward)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Viewport size as (width, height).
    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    /// One direction per pixel, row-major, top row first.
    pub fn ray_directions(&self) -> &[Vec3] {
        &self.ray_directions
    }

    /// Direction for a single pixel.
    pub fn ray_direction(&self, x: u32, y: u32) -> Vec3 {
        self.ray_directions[(x + y * self.viewport_width) as usize]
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, Vec3::Y)
    }

    /// Get the projection matrix (camera → clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        let aspect = self.viewport_width as f32 / self.viewport_height as f32;
        Mat4::perspective_rh(self.vertical_fov.to_radians(), aspect, self.near_clip, self.far_clip)
    }

    fn recalculate_projection(&mut self) {
        self.inverse_projection = self.projection_matrix().inverse();
    }

    fn recalculate_view(&mut self) {
        self.inverse_view = self.view_matrix().inverse();
    }

    fn recalculate_ray_directions(&mut self) {
        let width = self.viewport_width;
        let height = self.viewport_height;
        if width == 0 || height == 0 {
            self.ray_directions.clear();
            return;
        }

        let inverse_projection = self.inverse_projection;
        let inverse_view = self.inverse_view;

        self.ray_directions = (0..width * height)
            .into_par_iter()
            .map(|index| {
                let x = index % width;
                let y = index / width;

                // Row 0 is the top of the image.
                let coord = Vec2::new(x as f32 / width as f32, 1.0 - y as f32 / height as f32) * 2.0 - Vec2::ONE;

                let target = inverse_projection * Vec4::new(coord.x, coord.y, 1.0, 1.0);
                let local = (target.truncate() / target.w).normalize();
                (inverse_view * local.extend(0.0)).truncate()
            })
            .collect();
    }
}
