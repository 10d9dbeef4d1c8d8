//! Error handling for pa-tuner
//!
//! Every failure surfaced to the user carries a friendly message; none of
//! them are fatal to the process.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pa-tuner operations
pub type Result<T> = std::result::Result<T, PaError>;

/// Main error type for pa-tuner operations
#[derive(Error, Debug)]
pub enum PaError {
    // Input Errors
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("No layer heights available")]
    EmptyHeightIndex,

    // File Errors
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file: {}: {source}", path.display())]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {}: {source}", path.display())]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PaError {
    /// Shorthand for an `InvalidParameter` error.
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PaError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            PaError::InvalidParameter { .. } => "INVALID_PARAMETER",
            PaError::EmptyHeightIndex => "EMPTY_HEIGHT_INDEX",
            PaError::FileNotFound { .. } => "FILE_NOT_FOUND",
            PaError::FileReadError { .. } => "FILE_READ_ERROR",
            PaError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            PaError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if the user can fix this by changing their input and retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PaError::InvalidParameter { .. }
                | PaError::EmptyHeightIndex
                | PaError::FileNotFound { .. }
                | PaError::Serialization(_)
        )
    }

    /// Get a user-friendly message for this error
    pub fn friendly_message(&self) -> String {
        match self {
            PaError::EmptyHeightIndex => "Please load a G-code file first!".to_string(),
            PaError::InvalidParameter { .. } => {
                format!("Error: Please enter valid numerical values\n{}", self)
            }
            _ => format!("Error processing G-code: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PaError::invalid("start", "not a number");
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
        assert_eq!(PaError::EmptyHeightIndex.error_code(), "EMPTY_HEIGHT_INDEX");
    }

    #[test]
    fn test_friendly_messages() {
        assert_eq!(
            PaError::EmptyHeightIndex.friendly_message(),
            "Please load a G-code file first!"
        );

        let msg = PaError::invalid("step", "'abc' is not a number").friendly_message();
        assert!(msg.starts_with("Error: Please enter valid numerical values\n"));
        assert!(msg.contains("step"));

        let err = PaError::FileWriteError {
            path: PathBuf::from("/nope/out.gcode"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.friendly_message().starts_with("Error processing G-code: "));
        assert!(!err.is_recoverable());
    }
}
