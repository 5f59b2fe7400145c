use ember_core::SceneError;
use thiserror::Error;

/// Reasons a frame is refused before any buffer is touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("camera viewport {actual:?} does not match renderer viewport {expected:?}")]
    CameraViewportMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("camera position is not finite")]
    NonFiniteCameraPosition,

    #[error("camera ray direction for pixel {pixel} is zero or not finite")]
    DegenerateRayDirection { pixel: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;
