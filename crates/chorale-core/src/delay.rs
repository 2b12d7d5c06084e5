//! Delay line with fractional-sample reads.
//!
//! A chorus voice reads its delay line at a continuously moving position, so
//! the read offset is almost never a whole number of samples. Linear
//! interpolation between the two neighbouring samples keeps the modulated
//! read free of zipper noise.
//!
//! The buffer is heap-allocated once at construction and never reallocates;
//! no allocations occur during audio processing.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Interpolated delay line using a circular buffer.
///
/// Supports fractional delay times through linear interpolation, allowing
/// smooth modulation of delay time without artifacts.
///
/// # Example
///
/// ```rust
/// use chorale_core::InterpolatedDelay;
///
/// // 100ms max delay at 48kHz
/// let mut delay = InterpolatedDelay::from_time(48000.0, 0.1);
///
/// delay.write(1.0);
/// let output = delay.read(10.5); // fractional read
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedDelay {
    /// Circular buffer storage
    buffer: Vec<f32>,
    /// Write position in buffer
    write_pos: usize,
}

impl InterpolatedDelay {
    /// Creates a new delay line with the given maximum delay in samples.
    ///
    /// # Panics
    ///
    /// Panics if `max_delay_samples` is 0.
    pub fn new(max_delay_samples: usize) -> Self {
        assert!(max_delay_samples > 0, "Delay size must be > 0");

        Self {
            buffer: vec![0.0; max_delay_samples],
            write_pos: 0,
        }
    }

    /// Creates a delay line from sample rate and max delay time in seconds.
    pub fn from_time(sample_rate: f32, max_seconds: f32) -> Self {
        let max_samples = (sample_rate * max_seconds) as usize + 1;
        Self::new(max_samples)
    }

    /// Reads a delayed sample with linear interpolation.
    ///
    /// # Arguments
    ///
    /// * `delay_samples` - Delay time in samples (can be fractional).
    ///   Clamped to the buffer capacity.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        debug_assert!(delay_samples >= 0.0);

        let len = self.buffer.len();
        let delay_clamped = delay_samples.min((len - 1) as f32).max(0.0);

        let delay_int = delay_clamped as usize;
        let frac = delay_clamped - delay_int as f32;

        // read_pos points to the sample `delay_int` samples before the
        // last written one.
        let read_pos = (self.write_pos + len - delay_int - 1) % len;
        let next_pos = (read_pos + len - 1) % len;

        let a = self.buffer[read_pos];
        let b = self.buffer[next_pos];
        a + (b - a) * frac
    }

    /// Writes a sample to the delay line and advances the write position.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Combined read and write operation.
    #[inline]
    pub fn read_write(&mut self, sample: f32, delay_samples: f32) -> f32 {
        let output = self.read(delay_samples);
        self.write(sample);
        output
    }

    /// Clears the delay line (sets all samples to 0).
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Returns the maximum delay capacity in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}
