//! Bucket-based tile tracing.
//!
//! Divides the image into tiles (buckets) that are traced independently
//! and in parallel with rayon, then merged into the frame buffers.

use crate::integrator::trace_pixel;
use crate::Camera;
use ember_core::Scene;
use ember_math::Vec4;

/// A rectangular region of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Iterate over the image-space coordinates covered, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height).flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Split a `width` x `height` image into a row-major grid of buckets.
///
/// Buckets on the right and bottom edges are clipped to the image. A
/// `bucket_size` of 0 falls back to `DEFAULT_BUCKET_SIZE`.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = if bucket_size == 0 { DEFAULT_BUCKET_SIZE } else { bucket_size };
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = size.min(width - x);
            let bh = size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh));
            x += size;
        }
        y += size;
    }

    buckets
}

/// Result of tracing a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was traced
    pub bucket: Bucket,
    /// Radiance per pixel in row-major order within the bucket
    pub pixels: Vec<Vec4>,
}

/// Trace every pixel of one bucket for the given frame.
pub fn trace_bucket(bucket: &Bucket, camera: &Camera, scene: &Scene, frame_index: u32) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    pixels.extend(
        bucket
            .pixels()
            .map(|(x, y)| trace_pixel(x, y, camera, scene, frame_index)),
    );

    BucketResult { bucket: *bucket, pixels }
}
