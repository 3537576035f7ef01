use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for rendering and export.
pub type RenderResult<T> = Result<T, RenderError>;

/// Failures while producing a rendering or one of its exports.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Images are written into an existing directory only.
    #[error("output directory {} does not exist", .0.display())]
    MissingOutputDir(PathBuf),
    /// The drawing area or the PNG encoder reported an error.
    #[error("plotting backend failed: {0}")]
    Backend(String),
    /// Writing an export file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// An angle was NaN or infinite.
    #[error("{name} must be a finite angle in degrees, got {value}")]
    NonFiniteAngle { name: &'static str, value: f64 },
    /// No finite point to derive view limits from.
    #[error("point cloud contains no finite points")]
    EmptyPointCloud,
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
