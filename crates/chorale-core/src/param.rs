//! Parameter smoothing for zipper-free changes.
//!
//! Audio parameters (gain, modulation depth) need smooth transitions to avoid
//! audible "zipper noise" when values change. This module provides
//! [`SmoothedParam`] for sample-accurate exponential smoothing.
//!
//! Re-targeting while a transition is still in flight simply re-anchors the
//! smoothing toward the new target from the current value. There is no
//! queueing: the last target set wins.
//!
//! ## Usage
//!
//! ```rust
//! use chorale_core::SmoothedParam;
//!
//! // 10 ms standard smoothing at 48 kHz
//! let mut gain = SmoothedParam::standard(1.0, 48000.0);
//!
//! // Set new target - smoothing happens automatically
//! gain.set_target(0.5);
//!
//! // In the audio callback, get the smoothed value each sample
//! for _ in 0..480 { // 10ms at 48kHz
//!     let smoothed_gain = gain.advance();
//!     // Use smoothed_gain for processing...
//! }
//! ```

use libm::expf;

/// Standard smoothing time for mix and depth parameters, in milliseconds.
pub const STANDARD_SMOOTHING_MS: f32 = 10.0;

/// A parameter with built-in exponential smoothing for zipper-free changes.
///
/// Uses a one-pole lowpass toward the target, which gives an RC-like response:
/// the value moves ~63.2% of the remaining distance per time constant and
/// never overshoots.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value
    current: f32,
    /// Target value we're smoothing towards
    target: f32,
    /// Smoothing coefficient (1 = instant, ~0 = very slow)
    coeff: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Smoothing time in milliseconds
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Create a smoothed parameter with full configuration.
    ///
    /// # Arguments
    /// * `initial` - Initial parameter value (current and target)
    /// * `sample_rate` - Sample rate in Hz
    /// * `smoothing_time_ms` - Smoothing time constant in milliseconds
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate,
            smoothing_time_ms,
        };
        param.recalculate_coeff();
        param
    }

    /// Create a smoothed parameter with the standard 10 ms time constant.
    ///
    /// This is the smoothing every runtime-automatable parameter of the
    /// chorus engine uses.
    pub fn standard(initial: f32, sample_rate: f32) -> Self {
        Self::with_config(initial, sample_rate, STANDARD_SMOOTHING_MS)
    }

    /// Set the target value (parameter will smooth towards this).
    ///
    /// If a previous transition has not settled yet, smoothing continues
    /// from the current in-flight value toward the new target.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and immediately snap to it (no smoothing).
    ///
    /// Used at construction time, where ramping up from an arbitrary
    /// starting value would itself be an artifact.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Update sample rate and recalculate the smoothing coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Set smoothing time in milliseconds.
    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.smoothing_time_ms = time_ms;
        self.recalculate_coeff();
    }

    /// Get the next smoothed value (advances by one sample).
    #[inline]
    pub fn advance(&mut self) -> f32 {
        // One-pole lowpass: y[n] = y[n-1] + coeff * (target - y[n-1])
        self.current = self.current + self.coeff * (self.target - self.current);
        self.current
    }

    /// Get the current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Get the target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Check if the parameter has reached its target (within epsilon).
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    /// Skip ahead to the target value immediately.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// Recalculate the smoothing coefficient from sample rate and time.
    ///
    /// A one-pole lowpass has the difference equation
    /// `y[n] = y[n-1] + coeff * (target - y[n-1])`, a first-order IIR with
    /// pole at `(1-coeff)`. The time constant tau (time to reach 63.2% of the
    /// target) relates to the coefficient by
    ///
    ///   `coeff = 1 - exp(-1 / (tau * sample_rate))`
    ///
    /// where `tau = smoothing_time_ms / 1000`. After 5*tau the parameter has
    /// reached 99.3% of the target -- settled for audio purposes.
    ///
    /// When smoothing_time_ms is 0, coeff is 1.0 for instant response.
    fn recalculate_coeff(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0; // Instant (no smoothing)
        } else {
            let time_constant = self.smoothing_time_ms / 1000.0;
            let samples = time_constant * self.sample_rate;
            self.coeff = 1.0 - expf(-1.0 / samples);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_when_no_smoothing() {
        let mut param = SmoothedParam::with_config(1.0, 48000.0, 0.0);
        param.set_target(0.5);
        let val = param.advance();
        assert!((val - 0.5).abs() < 1e-6, "Should snap instantly");
    }

    #[test]
    fn converges_to_target() {
        let mut param = SmoothedParam::standard(0.0, 48000.0);
        param.set_target(1.0);

        // Run for 50ms (5x the time constant) - should be very close
        for _ in 0..(48000 * 50 / 1000) {
            param.advance();
        }

        assert!(
            (param.get() - 1.0).abs() < 0.01,
            "Should converge to target, got {}",
            param.get()
        );
    }

    #[test]
    fn one_time_constant_reaches_63_percent() {
        let mut param = SmoothedParam::standard(0.0, 48000.0);
        param.set_target(1.0);

        let samples_for_time_constant = (48000.0 * 0.010) as usize;
        for _ in 0..samples_for_time_constant {
            param.advance();
        }

        let expected = 1.0 - expf(-1.0); // ~0.632
        assert!(
            (param.get() - expected).abs() < 0.05,
            "After one time constant, expected ~{}, got {}",
            expected,
            param.get()
        );
    }

    #[test]
    fn never_overshoots() {
        let mut param = SmoothedParam::standard(0.0, 48000.0);
        param.set_target(1.0);

        let mut prev = param.get();
        for _ in 0..48000 {
            let val = param.advance();
            assert!(val <= 1.0 + 1e-6, "Overshot the target: {val}");
            assert!(val >= prev - 1e-6, "Approach must be monotone: {val} < {prev}");
            prev = val;
        }
    }

    #[test]
    fn retarget_reanchors_from_current_value() {
        let mut param = SmoothedParam::standard(0.0, 48000.0);
        param.set_target(1.0);

        // Partway through the transition, change course
        for _ in 0..100 {
            param.advance();
        }
        let midway = param.get();
        assert!(midway > 0.0 && midway < 1.0);

        param.set_target(0.0);
        let next = param.advance();
        assert!(
            next < midway,
            "Should head back down from the in-flight value"
        );
    }

    #[test]
    fn set_immediate_skips_smoothing() {
        let mut param = SmoothedParam::standard(0.0, 48000.0);
        param.set_immediate(0.7);
        assert_eq!(param.get(), 0.7);
        assert_eq!(param.target(), 0.7);
        assert!(param.is_settled());
    }
}
