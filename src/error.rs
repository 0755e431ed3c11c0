// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the pose loading library.

use std::fmt;

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, PoseError>;

/// Main error type for the pose loading library.
#[derive(Debug)]
pub enum PoseError {
    /// IO error with path context (directory or file missing, unreadable).
    IoError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
    /// Malformed detection document or record.
    JsonError(String),
    /// An `image_id` that does not end in `_<digits>.<ext>`.
    ImageIdError(String),
    /// Frame index parsed from a record lies outside `[0, num_frames)`.
    FrameOutOfRange {
        /// Offending frame index.
        frame: usize,
        /// Number of frames the caller asked for.
        num_frames: usize,
    },
    /// Keypoint, box or image dimensions do not match the expected layout.
    ShapeError(String),
    /// Error decoding images.
    ImageError(String),
    /// Invalid configuration provided.
    ConfigError(String),
}

impl fmt::Display for PoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(msg) => write!(f, "IO error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::JsonError(msg) => write!(f, "JSON error: {msg}"),
            Self::ImageIdError(id) => write!(f, "Image id error: cannot read frame index from '{id}'"),
            Self::FrameOutOfRange { frame, num_frames } => {
                write!(f, "Frame index {frame} out of range for {num_frames} frames")
            }
            Self::ShapeError(msg) => write!(f, "Shape error: {msg}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for PoseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PoseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for PoseError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::ImageError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for PoseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
