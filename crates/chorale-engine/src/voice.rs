//! A single modulated delay voice.
//!
//! Four of these run side by side in the wet path, each with a distinct base
//! delay and oscillator rate so their pitch wobbles decorrelate. A voice is
//! never stopped: when its target depth is zero it keeps processing (and its
//! oscillator keeps advancing) so that depth changes are purely parameter
//! moves, never topology changes.

use chorale_core::{InterpolatedDelay, Lfo, SmoothedParam};

/// Maximum delay-line length in seconds.
///
/// Base delays top out at 11 ms and modulation at a few ms on top, so 100 ms
/// leaves generous headroom for custom tables.
pub const MAX_DELAY_SECONDS: f32 = 0.1;

/// Base delay of voice 0, in seconds.
const BASE_DELAY_SECONDS: f32 = 0.005;

/// Base-delay increment per voice index, in seconds.
const DELAY_SPREAD_SECONDS: f32 = 0.002;

/// Oscillator rate of voice 0, in Hz.
const BASE_RATE_HZ: f32 = 0.5;

/// Rate increment per voice index, in Hz.
const RATE_SPREAD_HZ: f32 = 0.13;

/// One delay voice: a fractionally-read delay line whose delay time is a
/// fixed base plus a sine oscillation scaled by a smoothed depth.
#[derive(Debug, Clone)]
pub struct Voice {
    delay: InterpolatedDelay,
    lfo: Lfo,
    depth: SmoothedParam,
    base_delay_seconds: f32,
    sample_rate: f32,
}

impl Voice {
    /// Create voice `index` of the bank.
    ///
    /// The index staggers both the base delay (5 ms + 2 ms per index) and
    /// the oscillator rate (0.5 Hz + 0.13 Hz per index).
    pub fn new(index: usize, sample_rate: f32) -> Self {
        let base_delay_seconds = BASE_DELAY_SECONDS + index as f32 * DELAY_SPREAD_SECONDS;
        let rate_hz = BASE_RATE_HZ + index as f32 * RATE_SPREAD_HZ;

        Self {
            delay: InterpolatedDelay::from_time(sample_rate, MAX_DELAY_SECONDS),
            lfo: Lfo::new(sample_rate, rate_hz),
            depth: SmoothedParam::standard(0.0, sample_rate),
            base_delay_seconds,
            sample_rate,
        }
    }

    /// Set the target modulation depth in seconds.
    ///
    /// The change ramps in over the standard smoothing time.
    pub fn set_depth_target(&mut self, depth_seconds: f32) {
        self.depth.set_target(depth_seconds);
    }

    /// Set the modulation depth without smoothing.
    ///
    /// Used at construction, where ramping up from zero would itself be an
    /// artifact.
    pub fn set_depth_immediate(&mut self, depth_seconds: f32) {
        self.depth.set_immediate(depth_seconds);
    }

    /// The depth currently being targeted, in seconds.
    pub fn depth_target(&self) -> f32 {
        self.depth.target()
    }

    /// The oscillator rate in Hz.
    pub fn rate_hz(&self) -> f32 {
        self.lfo.frequency()
    }

    /// The unmodulated base delay in seconds.
    pub fn base_delay_seconds(&self) -> f32 {
        self.base_delay_seconds
    }

    /// Process one sample: write the input, read back at the modulated
    /// position.
    ///
    /// The oscillator and the depth smoother advance on every call, even at
    /// zero depth, so the voice's phase stays continuous across
    /// depth changes.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let depth = self.depth.advance();
        let modulation = self.lfo.advance() * depth;
        let delay_samples = (self.base_delay_seconds + modulation) * self.sample_rate;
        self.delay.read_write(input, delay_samples)
    }

    /// Reconfigure for a new sample rate.
    ///
    /// The delay buffer is resized, which clears it.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.delay = InterpolatedDelay::from_time(sample_rate, MAX_DELAY_SECONDS);
        self.lfo.set_sample_rate(sample_rate);
        self.depth.set_sample_rate(sample_rate);
    }

    /// Clear the delay line, reset the oscillator phase, and snap the depth
    /// smoother to its target.
    pub fn reset(&mut self) {
        self.delay.clear();
        self.lfo.reset();
        self.depth.snap_to_target();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voices_are_staggered() {
        let v0 = Voice::new(0, 48000.0);
        let v3 = Voice::new(3, 48000.0);

        assert!((v0.base_delay_seconds() - 0.005).abs() < 1e-7);
        assert!((v3.base_delay_seconds() - 0.011).abs() < 1e-7);
        assert!((v0.rate_hz() - 0.5).abs() < 1e-4);
        assert!((v3.rate_hz() - 0.89).abs() < 1e-4);
    }

    #[test]
    fn zero_depth_voice_is_a_pure_delay() {
        let sample_rate = 48000.0;
        let mut voice = Voice::new(0, sample_rate);
        let base_samples = (0.005 * sample_rate) as usize;

        let mut outputs = Vec::new();
        for n in 0..base_samples + 8 {
            let input = if n == 0 { 1.0 } else { 0.0 };
            outputs.push(voice.process(input));
        }

        // The impulse comes back centred on the base delay, undistorted.
        let peak = outputs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.abs().partial_cmp(&b.1.abs()).unwrap())
            .unwrap();
        assert!(peak.0.abs_diff(base_samples) <= 1);
        assert!((peak.1 - 1.0).abs() < 1e-3);
    }

    #[test]
    fn output_stays_finite_under_modulation() {
        let mut voice = Voice::new(2, 44100.0);
        voice.set_depth_target(0.0025);

        for n in 0..44100 {
            let input = if n % 7 == 0 { 0.8 } else { -0.3 };
            let out = voice.process(input);
            assert!(out.is_finite());
            assert!(out.abs() <= 1.0 + 1e-3);
        }
    }

    #[test]
    fn oscillator_keeps_running_at_zero_depth() {
        let mut voice = Voice::new(1, 1000.0);
        let phase_before = voice.lfo.phase();
        for _ in 0..100 {
            voice.process(0.0);
        }
        assert!(voice.lfo.phase() > phase_before);
    }

    #[test]
    fn reset_clears_history() {
        let mut voice = Voice::new(0, 48000.0);
        for _ in 0..1000 {
            voice.process(0.9);
        }
        voice.reset();
        // With silent input the only possible output is stale history.
        for _ in 0..1000 {
            assert_eq!(voice.process(0.0), 0.0);
        }
    }
}
