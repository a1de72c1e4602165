use thiserror::Error;

/// Errors surfaced by the art pipeline.
///
/// All of these are configuration or programming errors: evaluation itself
/// is total, so nothing here is retried or recovered from.
#[derive(Debug, Error)]
pub enum ArtError {
    #[error("input interval [{start}, {end}] has zero width")]
    InvalidInterval { start: f64, end: f64 },

    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("a movie needs at least one frame")]
    InvalidFrameCount,

    #[error("invalid depth bounds: min {min_depth}, max {max_depth}")]
    InvalidDepth { min_depth: i32, max_depth: i32 },

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArtError>;
