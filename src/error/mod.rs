// Error types for the voice segmenter
//
// This module defines the structured error type for detection calls,
// with numeric error codes for callers that report across a process boundary.

mod detection;

pub use detection::{log_detection_error, DetectionError, DetectionErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
