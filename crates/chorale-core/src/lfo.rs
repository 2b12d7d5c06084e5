//! Low Frequency Oscillator for delay-time modulation.
//!
//! Each chorus voice owns one of these, running at a fixed sub-audio rate for
//! the lifetime of the engine. The oscillator is never stopped or restarted:
//! a voice whose depth is driven to zero keeps its LFO advancing so that
//! re-activating the voice picks up a continuous phase instead of producing a
//! click.

use core::f32::consts::PI;
use libm::sinf;

/// Sine low-frequency oscillator.
///
/// Generates a periodic waveform at sub-audio frequencies (the chorus voices
/// run between roughly 0.5 and 0.9 Hz). Uses phase accumulation in [0, 1).
///
/// # Example
///
/// ```rust
/// use chorale_core::Lfo;
///
/// let mut lfo = Lfo::new(48000.0, 0.5); // 0.5 Hz
///
/// // Generate modulation values in [-1.0, 1.0]
/// let value = lfo.advance();
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    /// Phase increment per sample
    phase_inc: f32,
    /// Sample rate in Hz
    sample_rate: f32,
}

impl Lfo {
    /// Create a new LFO with the given sample rate and frequency.
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: freq_hz / sample_rate,
            sample_rate,
        }
    }

    /// Set frequency in Hz.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.phase_inc = freq_hz / self.sample_rate;
    }

    /// Get current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.phase_inc * self.sample_rate
    }

    /// Get current phase (0.0 - 1.0).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Set the phase directly (wrapped into [0.0, 1.0)).
    pub fn set_phase(&mut self, phase: f32) {
        let mut wrapped = phase % 1.0;
        if wrapped < 0.0 {
            wrapped += 1.0;
        }
        self.phase = wrapped;
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Get the next LFO value (-1.0 to 1.0) and advance the phase.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let output = sinf(self.phase * 2.0 * PI);

        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        output
    }

    /// Set sample rate, preserving the configured frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let freq = self.frequency();
        self.sample_rate = sample_rate;
        self.set_frequency(freq);
    }
}
