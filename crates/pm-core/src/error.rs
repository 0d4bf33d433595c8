use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    /// The contour has too few points for the requested search window.
    InsufficientContour { points: usize, required: usize },
    InvalidWindow,
    InvalidThreshold,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::InsufficientContour { points, required } => {
                write!(
                    f,
                    "insufficient contour: {points} points, at least {required} required"
                )
            }
            Self::InvalidWindow => write!(f, "search window must be positive"),
            Self::InvalidThreshold => {
                write!(f, "angle threshold must be a finite value in [0, 180] degrees")
            }
        }
    }
}

impl std::error::Error for Error {}
