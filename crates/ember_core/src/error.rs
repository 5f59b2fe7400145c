use thiserror::Error;

/// Problems found when checking a scene before it is rendered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere {sphere} references material {index}, but the scene has {material_count} materials")]
    MaterialIndexOutOfRange {
        sphere: usize,
        index: usize,
        material_count: usize,
    },

    #[error("sphere {sphere} has invalid radius {radius} (must be finite and > 0)")]
    InvalidRadius { sphere: usize, radius: f32 },

    #[error("sphere {sphere} has a non-finite position")]
    NonFiniteSphere { sphere: usize },

    #[error("material {material} has non-finite or negative values")]
    NonFiniteMaterial { material: usize },
}

pub type SceneResult<T> = Result<T, SceneError>;
