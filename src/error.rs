//! Error types for coogle.
//!
//! Error codes are organized by category:
//!
//! - **CGL-E001 to CGL-E029**: Input file and AST provider errors
//! - **CGL-E030 to CGL-E099**: Path validation errors
//! - **CGL-E900 to CGL-E999**: Internal and miscellaneous errors
//!
//! Query strings never produce an error. A query that makes no sense
//! simply matches nothing.

use thiserror::Error;

/// Main error type for coogle operations.
#[derive(Error, Debug)]
pub enum CoogleError {
    /// Input file does not exist.
    #[error("{path} not found!")]
    FileNotFound { path: String },

    /// The AST provider could not parse the input file at all.
    #[error("Failed to parse {path}: {reason}")]
    ProviderFailure { path: String, reason: String },

    /// Path exists but cannot be used as an input file.
    #[error("Invalid path: {path} ({reason})")]
    InvalidPath { path: String, reason: String },

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A built-in pattern failed to compile.
    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),
}

impl CoogleError {
    /// Returns the error code for this error.
    pub const fn error_code(&self) -> &'static str {
        match self {
            CoogleError::FileNotFound { .. } => "CGL-E001",
            CoogleError::ProviderFailure { .. } => "CGL-E002",
            CoogleError::InvalidPath { .. } => "CGL-E031",
            CoogleError::IoError(_) => "CGL-E901",
            CoogleError::JsonError(_) => "CGL-E902",
            CoogleError::PatternError(_) => "CGL-E903",
        }
    }

    /// Returns the severity level for this error.
    pub const fn severity(&self) -> &'static str {
        "error"
    }

    /// Returns remediation hints for this error, if available.
    pub const fn remediation(&self) -> Option<&'static str> {
        match self {
            CoogleError::FileNotFound { .. } => {
                Some("Ensure the file path is correct and the file exists.")
            }
            CoogleError::ProviderFailure { .. } => {
                Some("Check that the file is a readable C or C++ source/header.")
            }
            CoogleError::InvalidPath { .. } => Some("Pass a regular file, not a directory."),
            CoogleError::IoError(_) => Some("Check file permissions and disk space."),
            CoogleError::JsonError(_) => None,
            CoogleError::PatternError(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let err = CoogleError::FileNotFound {
            path: "missing.h".to_string(),
        };
        assert_eq!(err.error_code(), "CGL-E001");
        assert_eq!(err.to_string(), "missing.h not found!");
        assert!(err.remediation().is_some());

        let err = CoogleError::ProviderFailure {
            path: "bad.h".to_string(),
            reason: "no tree".to_string(),
        };
        assert_eq!(err.error_code(), "CGL-E002");
        assert_eq!(err.severity(), "error");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoogleError = io.into();
        assert_eq!(err.error_code(), "CGL-E901");
    }
}
