//! Error handling for mixdown
//!
//! All failures propagate as typed errors; the composition engine never
//! degrades to a shorter or garbled clip.

use thiserror::Error;

/// Result type alias for mixdown operations
pub type Result<T> = std::result::Result<T, MixdownError>;

/// Main error type for mixdown operations
#[derive(Error, Debug)]
pub enum MixdownError {
    // Input Errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // Composition Errors
    #[error("Incompatible buffers: {details}")]
    FormatMismatch { details: String },

    #[error(
        "Background bed too short to loop: {bed_secs:.2}s bed with {window_secs:.2}s crossfade window"
    )]
    DegenerateLoop { bed_secs: f64, window_secs: f64 },

    // Output Errors
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },

    #[error("No background bed available to choose from")]
    NoBedAvailable,

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration Errors
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl MixdownError {
    /// Get the stable error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            MixdownError::FileNotFound { .. } => "FILE_NOT_FOUND",
            MixdownError::Decode { .. } => "DECODE_ERROR",
            MixdownError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            MixdownError::FormatMismatch { .. } => "FORMAT_MISMATCH",
            MixdownError::DegenerateLoop { .. } => "DEGENERATE_LOOP",
            MixdownError::Encode { .. } => "ENCODE_ERROR",
            MixdownError::NoBedAvailable => "NO_BED_AVAILABLE",
            MixdownError::Io(_) => "IO_ERROR",
            MixdownError::Config(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = MixdownError::FileNotFound {
            path: "narration.mp3".to_string(),
        };
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");

        let err = MixdownError::DegenerateLoop {
            bed_secs: 1.0,
            window_secs: 1.5,
        };
        assert_eq!(err.error_code(), "DEGENERATE_LOOP");
    }

    #[test]
    fn test_degenerate_loop_message() {
        let err = MixdownError::DegenerateLoop {
            bed_secs: 1.2,
            window_secs: 1.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("1.20s"));
        assert!(msg.contains("1.50s"));
    }
}
