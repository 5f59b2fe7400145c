//! Progressive frame renderer.
//!
//! Owns the accumulation and output buffers and the frame index, and
//! dispatches per-pixel tracing across rayon's thread pool. Each pixel's
//! slots are written by exactly one task per frame, so no locks are needed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::accumulation::{resolve, AccumulationBuffer};
use crate::bucket::{generate_buckets, trace_bucket, BucketResult};
use crate::error::{RenderError, RenderResult};
use crate::integrator::trace_pixel;
use crate::Camera;
use ember_core::Scene;
use rayon::prelude::*;

/// How the pixel grid is split across worker threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// One task per image row, writing straight into the buffers.
    #[default]
    Rows,
    /// Square tiles traced in parallel, then merged into the buffers.
    Buckets { size: u32 },
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// Keep summing frames until reset. When false every frame is a fresh
    /// single-sample image.
    pub accumulate: bool,
    /// Parallel dispatch strategy
    pub dispatch: DispatchMode,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            accumulate: true,
            dispatch: DispatchMode::Rows,
        }
    }
}

/// Outcome of a `Renderer::render` call that did not fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// The frame completed; `frame_index` is the index it was rendered with.
    Rendered { frame_index: u32 },
    /// Width or height is zero; nothing was done.
    EmptyViewport,
    /// The cancel flag was raised mid-frame. The accumulation cycle restarts
    /// on the next frame.
    Cancelled,
}

/// The progressive renderer.
pub struct Renderer {
    settings: RenderSettings,
    accumulation: AccumulationBuffer,
    image_data: Vec<u32>,
    frame_index: u32,
    last_render_time: Duration,
    cancel: Arc<AtomicBool>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer with an empty viewport and default settings.
    pub fn new() -> Self {
        Self::with_settings(RenderSettings::default())
    }

    pub fn with_settings(settings: RenderSettings) -> Self {
        Self {
            settings,
            accumulation: AccumulationBuffer::default(),
            image_data: Vec::new(),
            frame_index: 1,
            last_render_time: Duration::ZERO,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Reallocate both buffers for a new viewport size.
    ///
    /// Prior accumulation is discarded and the frame index restarts at 1.
    /// Returns false (and does nothing) when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.accumulation.resize(width, height) {
            return false;
        }

        self.image_data = vec![0; self.accumulation.len()];
        self.frame_index = 1;
        log::info!("Renderer resized to {}x{}", width, height);
        true
    }

    /// Render one frame of `scene` as seen by `camera`.
    ///
    /// On error nothing is modified: buffers, frame index and timing stay as
    /// they were.
    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> RenderResult<RenderStatus> {
        if self.accumulation.is_empty() {
            log::debug!("Skipping render of empty viewport");
            return Ok(RenderStatus::EmptyViewport);
        }

        if let Err(err) = self.validate(scene, camera) {
            log::warn!("Refusing to render frame: {}", err);
            return Err(err);
        }

        let start = Instant::now();
        let frame_index = self.frame_index;

        if frame_index == 1 {
            self.accumulation.clear();
        }

        let completed = match self.settings.dispatch {
            DispatchMode::Rows => self.render_rows(scene, camera, frame_index),
            DispatchMode::Buckets { size } => self.render_buckets(scene, camera, frame_index, size),
        };

        self.last_render_time = start.elapsed();

        if !completed {
            self.cancel.store(false, Ordering::Relaxed);
            self.frame_index = 1;
            log::warn!("Frame {} cancelled after {:?}", frame_index, self.last_render_time);
            return Ok(RenderStatus::Cancelled);
        }

        if self.settings.accumulate {
            self.frame_index = self.frame_index.saturating_add(1);
        } else {
            self.frame_index = 1;
        }

        log::debug!("Frame {} rendered in {:?}", frame_index, self.last_render_time);
        Ok(RenderStatus::Rendered { frame_index })
    }

    fn validate(&self, scene: &Scene, camera: &Camera) -> RenderResult<()> {
        scene.validate()?;

        let expected = (self.width(), self.height());
        if camera.viewport() != expected || camera.ray_directions().len() != self.accumulation.len() {
            return Err(RenderError::CameraViewportMismatch {
                expected,
                actual: camera.viewport(),
            });
        }

        if !camera.position().is_finite() {
            return Err(RenderError::NonFiniteCameraPosition);
        }

        if let Some(pixel) = camera
            .ray_directions()
            .iter()
            .position(|d| !d.is_finite() || d.length_squared() == 0.0)
        {
            return Err(RenderError::DegenerateRayDirection { pixel });
        }

        Ok(())
    }

    /// Returns false if the frame was cancelled.
    fn render_rows(&mut self, scene: &Scene, camera: &Camera, frame_index: u32) -> bool {
        let width = self.accumulation.width() as usize;
        let cancel = &self.cancel;

        self.accumulation
            .as_mut_slice()
            .par_chunks_mut(width)
            .zip(self.image_data.par_chunks_mut(width))
            .enumerate()
            .try_for_each(|(y, (accumulation_row, image_row))| {
                if cancel.load(Ordering::Relaxed) {
                    return None;
                }

                for (x, (sum, pixel)) in accumulation_row.iter_mut().zip(image_row.iter_mut()).enumerate() {
                    *sum += trace_pixel(x as u32, y as u32, camera, scene, frame_index);
                    *pixel = resolve(*sum, frame_index);
                }

                Some(())
            })
            .is_some()
    }

    /// Returns false if the frame was cancelled. Nothing is merged into the
    /// buffers unless every bucket finished.
    fn render_buckets(&mut self, scene: &Scene, camera: &Camera, frame_index: u32, size: u32) -> bool {
        let width = self.accumulation.width();
        let buckets = generate_buckets(width, self.accumulation.height(), size);
        let cancel = &self.cancel;

        let results: Option<Vec<BucketResult>> = buckets
            .par_iter()
            .map(|bucket| {
                if cancel.load(Ordering::Relaxed) {
                    None
                } else {
                    Some(trace_bucket(bucket, camera, scene, frame_index))
                }
            })
            .collect();

        let Some(results) = results else {
            return false;
        };

        let accumulation = self.accumulation.as_mut_slice();
        for result in &results {
            for ((x, y), color) in result.bucket.pixels().zip(&result.pixels) {
                let index = (x + y * width) as usize;
                accumulation[index] += *color;
                self.image_data[index] = resolve(accumulation[index], frame_index);
            }
        }

        true
    }

    /// Restart accumulation on the next frame.
    pub fn reset_frame_index(&mut self) {
        self.frame_index = 1;
    }

    /// Index the next frame will be rendered with.
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    /// Packed RGBA pixels, row-major, top row first.
    pub fn image_data(&self) -> &[u32] {
        &self.image_data
    }

    /// The output buffer as bytes. On little-endian targets this is RGBA8.
    pub fn image_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.image_data)
    }

    pub fn accumulation(&self) -> &AccumulationBuffer {
        &self.accumulation
    }

    pub fn width(&self) -> u32 {
        self.accumulation.width()
    }

    pub fn height(&self) -> u32 {
        self.accumulation.height()
    }

    /// Wall-clock duration of the last completed or cancelled frame.
    pub fn last_render_time(&self) -> Duration {
        self.last_render_time
    }

    /// Shared flag that cancels the frame in flight when set.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }
}
