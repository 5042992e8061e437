//! Error types and context management for generation and level I/O

use std::fmt;
use std::path::{Path, PathBuf};

/// Why a single generation attempt was discarded
///
/// Attempt failures never leave the engine on their own; the orchestrator
/// retries and only reports the last one inside
/// [`PuzzleError::GenerationExhausted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The spiral sweep and its top-up passes could not fit the requested tiles
    PlacementExhausted {
        /// Tiles accepted when packing gave up
        placed: usize,
        /// Tiles requested
        requested: usize,
    },

    /// The assembled layout has no clearing order
    VerificationFailed {
        /// Tiles in the rejected layout
        tiles: usize,
    },
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlacementExhausted { placed, requested } => {
                write!(f, "placement exhausted after {placed} of {requested} tiles")
            }
            Self::VerificationFailed { tiles } => {
                write!(f, "layout of {tiles} tiles has no clearing order")
            }
        }
    }
}

/// Main error type for all engine and I/O operations
#[derive(Debug)]
pub enum PuzzleError {
    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A supplied layout breaks containment, packing or id uniqueness
    InvalidLayout {
        /// Description of the violation
        reason: String,
    },

    /// Retry budget consumed without producing a solvable layout
    GenerationExhausted {
        /// Attempts made
        attempts: usize,
        /// Board size (rows, cols)
        dimensions: (usize, usize),
        /// Tiles requested
        requested: usize,
        /// Failure of the final attempt
        last_failure: Option<AttemptFailure>,
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

    /// Level data could not be encoded or decoded
    Serialization {
        /// Path of the level file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidLayout { reason } => write!(f, "Invalid layout: {reason}"),
            Self::GenerationExhausted {
                attempts,
                dimensions,
                requested,
                last_failure,
            } => {
                write!(
                    f,
                    "No solvable layout of {requested} tiles on a {}x{} board after {attempts} attempts",
                    dimensions.0, dimensions.1
                )?;
                if let Some(failure) = last_failure {
                    write!(f, " (last attempt: {failure})")?;
                }
                Ok(())
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
            Self::Serialization { path, source } => {
                write!(f, "Malformed level data in '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for engine results
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Attaches the file path and operation to low-level I/O and JSON errors
pub trait WithPath<T> {
    /// Wrap the error with the path it concerns
    ///
    /// # Errors
    ///
    /// Propagates the original error converted into a [`PuzzleError`]
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| PuzzleError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl<T> WithPath<T> for std::result::Result<T, serde_json::Error> {
    fn with_path(self, path: &Path, _operation: &'static str) -> Result<T> {
        self.map_err(|source| PuzzleError::Serialization {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl From<std::io::Error> for PuzzleError {
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
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid layout error
pub fn invalid_layout(reason: impl Into<String>) -> PuzzleError {
    PuzzleError::InvalidLayout {
        reason: reason.into(),
    }
}
