use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions that abort an overlay run before anything is drawn.
#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("configuration {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("file not found: {0}")]
    MissingFile(PathBuf),

    #[error("parsing {path} failed: {reason}")]
    RecordingParse { path: PathBuf, reason: String },
}

impl OverlayError {
    pub fn config(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        OverlayError::Config {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        OverlayError::RecordingParse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OverlayError>;
