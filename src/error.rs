use std::path::PathBuf;

use thiserror::Error;

pub type ShotResult<T> = Result<T, ShotError>;

#[derive(Debug, Error)]
pub enum ShotError {
    #[error("failed to access `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid shot document: {0}")]
    InvalidDocument(String),

    #[error("invalid session: {0}")]
    InvalidSession(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("render backend unavailable: {0}")]
    BackendUnavailable(&'static str),
}

impl ShotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
