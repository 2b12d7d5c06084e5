//! Real-time audio I/O for the chorale chorus engine.
//!
//! This crate owns everything that touches the sound card:
//!
//! - **Device discovery**: [`list_devices`] and [`default_device`]
//! - **Live streaming**: [`AudioStream`] runs a mono processing callback
//!   between an input and an output device
//!
//! The processing callback receives mono frames regardless of the hardware
//! channel layout; multi-channel input is downmixed before processing and
//! the mono result is copied to every output channel.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chorale_engine::DimensionChorus;
//! use chorale_io::{AudioStream, StreamConfig};
//!
//! let mut stream = AudioStream::new(StreamConfig::default())?;
//! let mut chorus = DimensionChorus::new(stream.sample_rate() as f32);
//!
//! stream.run(move |input, output| {
//!     chorus.process_block(input, output);
//! })?;
//! ```

mod stream;

pub use stream::{
    AudioDevice, AudioStream, StopHandle, StreamConfig, default_device, find_device_by_index,
    find_device_fuzzy, list_devices,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
