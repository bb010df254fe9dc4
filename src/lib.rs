// Voice Segmenter - offline speech segment detection
// Frame energy/ZCR features with a hysteresis state machine over buffered mono audio

// Module declarations
pub mod analysis;
pub mod config;
pub mod error;
pub mod fixtures;

// Re-exports for convenience
pub use analysis::{DetectionReport, SpeechSegment, VoiceDetector};
pub use config::{AppConfig, DetectionConfig, ThresholdConfig};
pub use error::{DetectionError, ErrorCode};

/// Install a stderr `tracing` subscriber at `max_level`
///
/// Library code only emits events; binaries call this once at startup.
/// `log` records from dependencies are forwarded as well. Calling it again
/// is a no-op.
pub fn init_logging(max_level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .try_init();
}
