//! Error types for synthesis preconditions and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all synthesis operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// A source or target dimension is zero
    InvalidDimension {
        /// Which dimension was rejected
        parameter: &'static str,
        /// Provided value
        value: usize,
    },

    /// Neighborhood radius is zero or too large for the source grid
    ///
    /// A radius whose window `2 * radius + 1` exceeds the smaller source dimension
    /// wraps onto itself and produces duplicate offsets.
    InvalidRadius {
        /// Requested radius
        radius: usize,
        /// Source width in pixels
        source_width: usize,
        /// Source height in pixels
        source_height: usize,
    },

    /// Source grid holds no pixels
    EmptySource,

    /// Source data doesn't meet synthesis requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Target neighborhood length differs from the source neighborhoods
    NeighborhoodMismatch {
        /// Length of every source neighborhood
        expected: usize,
        /// Length of the supplied target neighborhood
        actual: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { parameter, value } => {
                write!(f, "Invalid dimension: {parameter} = {value}")
            }
            Self::InvalidRadius {
                radius,
                source_width,
                source_height,
            } => {
                write!(
                    f,
                    "Invalid radius {radius} for {source_width}x{source_height} source \
                     (needs 1 <= radius and 2 * radius + 1 <= {})",
                    source_width.min(source_height)
                )
            }
            Self::EmptySource => write!(f, "Source image has no pixels"),
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::NeighborhoodMismatch { expected, actual } => {
                write!(
                    f,
                    "Neighborhood length mismatch: expected {expected} pixels, found {actual}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for synthesis results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a path validation error
pub fn path_error(msg: &str) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}

/// Wrap an I/O failure with the path and operation it concerned
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> AlgorithmError {
    let path = path.into();
    move |source| AlgorithmError::FileSystem {
        path,
        operation,
        source,
    }
}
