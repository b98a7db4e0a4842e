use thiserror::Error;

/// Errors raised by the geometry pipeline and its I/O collaborators.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ShapeError {
    #[error("need at least 3 points, found {found}")]
    InsufficientPoints { found: usize },

    #[error("degenerate geometry: points are collinear")]
    Degenerate,

    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("render failed: {0}")]
    Render(String),

    #[error("axis must be either 'vertical' or 'horizontal', got '{0}'")]
    InvalidAxis(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
