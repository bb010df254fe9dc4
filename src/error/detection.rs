// Detection error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Detection error code constants
///
/// Single source of truth for the numeric codes reported by
/// [`DetectionError::code`], so callers can match on them without
/// depending on the enum layout.
///
/// Error code range: 3001-3004
pub struct DetectionErrorCodes {}

impl DetectionErrorCodes {
    /// Buffer holds fewer samples than one analysis window
    pub const BUFFER_TOO_SHORT: i32 = 3001;

    /// Sample rate is zero
    pub const INVALID_SAMPLE_RATE: i32 = 3002;

    /// Requested sample count exceeds the provided buffer
    pub const SAMPLE_COUNT_OUT_OF_RANGE: i32 = 3003;

    /// Detection configuration cannot produce valid segments
    pub const INVALID_CONFIG: i32 = 3004;
}

/// Log a detection error with structured context
///
/// This function logs detection errors with structured fields including:
/// - error_code: Numeric error code for programmatic handling
/// - component: The component where the error occurred
/// - message: Human-readable error message
/// - context: Additional contextual information
pub fn log_detection_error(err: &DetectionError, context: &str) {
    error!(
        "Detection error in {}: code={}, component=VoiceDetector, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Precondition failures rejected before any frame is processed
///
/// A detection call either runs to completion or fails with one of these
/// variants; partial results are never returned.
///
/// Error code range: 3001-3004
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// Fewer samples than `win_size`, so not even one frame fits
    BufferTooShort { sample_count: usize, win_size: usize },

    /// Sample rate must be > 0
    InvalidSampleRate { sample_rate: u32 },

    /// `sample_count` points past the end of the buffer
    SampleCountOutOfRange {
        sample_count: usize,
        buffer_len: usize,
    },

    /// Configuration violates a detector invariant
    InvalidConfig { reason: String },
}

impl ErrorCode for DetectionError {
    fn code(&self) -> i32 {
        match self {
            DetectionError::BufferTooShort { .. } => DetectionErrorCodes::BUFFER_TOO_SHORT,
            DetectionError::InvalidSampleRate { .. } => DetectionErrorCodes::INVALID_SAMPLE_RATE,
            DetectionError::SampleCountOutOfRange { .. } => {
                DetectionErrorCodes::SAMPLE_COUNT_OUT_OF_RANGE
            }
            DetectionError::InvalidConfig { .. } => DetectionErrorCodes::INVALID_CONFIG,
        }
    }

    fn message(&self) -> String {
        match self {
            DetectionError::BufferTooShort {
                sample_count,
                win_size,
            } => format!(
                "Buffer too short: need at least {} samples for one frame, got {}",
                win_size, sample_count
            ),
            DetectionError::InvalidSampleRate { sample_rate } => {
                format!("Sample rate must be greater than 0 (got {})", sample_rate)
            }
            DetectionError::SampleCountOutOfRange {
                sample_count,
                buffer_len,
            } => format!(
                "Sample count {} exceeds buffer length {}",
                sample_count, buffer_len
            ),
            DetectionError::InvalidConfig { reason } => {
                format!("Invalid detection config: {}", reason)
            }
        }
    }
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DetectionError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for DetectionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_error_codes() {
        assert_eq!(
            DetectionError::BufferTooShort {
                sample_count: 10,
                win_size: 256
            }
            .code(),
            DetectionErrorCodes::BUFFER_TOO_SHORT
        );
        assert_eq!(
            DetectionError::InvalidSampleRate { sample_rate: 0 }.code(),
            DetectionErrorCodes::INVALID_SAMPLE_RATE
        );
        assert_eq!(
            DetectionError::SampleCountOutOfRange {
                sample_count: 20,
                buffer_len: 10
            }
            .code(),
            DetectionErrorCodes::SAMPLE_COUNT_OUT_OF_RANGE
        );
        assert_eq!(
            DetectionError::InvalidConfig {
                reason: "hop".to_string()
            }
            .code(),
            DetectionErrorCodes::INVALID_CONFIG
        );
    }

    #[test]
    fn test_detection_error_messages() {
        let err = DetectionError::BufferTooShort {
            sample_count: 100,
            win_size: 256,
        };
        assert!(err.message().contains("at least 256"));
        assert!(err.message().contains("got 100"));

        let err = DetectionError::InvalidConfig {
            reason: "hop must be > 0".to_string(),
        };
        assert!(err.message().contains("hop must be > 0"));
    }

    #[test]
    fn test_display_includes_code() {
        let err = DetectionError::InvalidSampleRate { sample_rate: 0 };
        let rendered = err.to_string();
        assert!(rendered.contains("code 3002"), "got {rendered}");
    }

    #[test]
    fn test_error_code_trait_object() {
        let err: &dyn ErrorCode = &DetectionError::InvalidSampleRate { sample_rate: 0 };
        assert_eq!(err.code(), 3002);
    }
}
