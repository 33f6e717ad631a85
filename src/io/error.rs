//! Error types and context management for synthesis operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all synthesis operations
#[derive(Debug)]
pub enum SynthesisError {
    /// Failed to load the exemplar image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to save the generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
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

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Exemplar data doesn't meet algorithm requirements
    InvalidSourceData {
        /// Description of what's wrong with the exemplar
        reason: String,
    },

    /// The exemplar yields more distinct patterns than the solver supports
    TooManyPatterns {
        /// Number of distinct patterns extracted
        count: usize,
        /// Supported maximum
        limit: usize,
    },

    /// A cell's possibility set was drained to empty
    ///
    /// Terminal for the run; there is no backtracking.
    Contradiction {
        /// Grid position (row, col) of the empty cell
        cell: [usize; 2],
        /// Observation step on which the run ended, when known
        iteration: Option<usize>,
    },

    /// The run was cancelled cooperatively between steps
    Cancelled {
        /// Observation step on which the run stopped, when known
        iteration: Option<usize>,
    },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
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
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid exemplar: {reason}")
            }
            Self::TooManyPatterns { count, limit } => {
                write!(
                    f,
                    "Exemplar yields {count} distinct patterns (limit: {limit})"
                )
            }
            Self::Contradiction { cell, iteration } => match iteration {
                Some(step) => write!(
                    f,
                    "No solution: cell ({}, {}) ran out of patterns at step {step}",
                    cell[0], cell[1]
                ),
                None => write!(
                    f,
                    "No solution: cell ({}, {}) ran out of patterns",
                    cell[0], cell[1]
                ),
            },
            Self::Cancelled { iteration } => match iteration {
                Some(step) => write!(f, "Run cancelled at step {step}"),
                None => write!(f, "Run cancelled"),
            },
        }
    }
}

impl std::error::Error for SynthesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl SynthesisError {
    /// Process exit code for this error kind
    ///
    /// 1 for I/O failures, 2 when no solution exists, 3 for configuration
    /// problems, 4 for cooperative cancellation.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::ImageLoad { .. } | Self::ImageExport { .. } | Self::FileSystem { .. } => 1,
            Self::Contradiction { .. } => 2,
            Self::InvalidParameter { .. }
            | Self::InvalidSourceData { .. }
            | Self::TooManyPatterns { .. } => 3,
            Self::Cancelled { .. } => 4,
        }
    }
}

/// Convenience type alias for synthesis results
pub type Result<T> = std::result::Result<T, SynthesisError>;

/// Enriches run-terminating errors with the step they occurred on
pub trait WithContext<T> {
    /// Record the observation step on errors that carry one
    ///
    /// # Errors
    ///
    /// Propagates the original error with the iteration context applied
    fn with_iteration(self, iteration: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<SynthesisError>,
{
    fn with_iteration(self, iteration: usize) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only the run-terminating kinds carry a step number
            match &mut error {
                SynthesisError::Contradiction { iteration: slot, .. }
                | SynthesisError::Cancelled { iteration: slot } => {
                    *slot = Some(iteration);
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for SynthesisError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SynthesisError {
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
) -> SynthesisError {
    SynthesisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a generic path error for CLI target validation
pub fn target_error(msg: &str) -> SynthesisError {
    SynthesisError::InvalidParameter {
        parameter: "target",
        value: String::new(),
        reason: msg.to_string(),
    }
}
