//! Core Effect trait.
//!
//! The [`Effect`] trait is the seam between the chorus engine and the audio
//! I/O layer: the I/O callback only ever sees `&mut dyn Effect`-shaped
//! processing, and the engine only has to implement sample/block processing.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: Single `f32` input/output. The signal topology of
//!   this processor is mono end to end; stereo is out of scope.
//!
//! - **Object-safe**: `dyn Effect + Send` can be moved into an audio
//!   callback running on a different thread.
//!
//! - **No allocations**: All methods are designed to be called in real-time
//!   audio contexts with zero heap allocations.

/// Trait for mono audio processors.
///
/// Processors consume one input sample and produce one output sample,
/// advancing internal state (delay lines, oscillators, smoothers) as they go.
pub trait Effect {
    /// Process a single sample.
    ///
    /// # Arguments
    /// * `input` - Input sample, typically in range [-1.0, 1.0]
    ///
    /// # Returns
    /// Processed output sample
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample.
    ///
    /// # Panics
    /// Default implementation panics if `input.len() != output.len()`
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in-place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate.
    ///
    /// Processors recalculate any sample-rate-dependent coefficients here
    /// (delay times in samples, LFO increments, smoothing coefficients).
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state.
    ///
    /// Clears delay lines and other internal history without changing
    /// parameter targets. Models an engine restart, not a parameter change.
    fn reset(&mut self);
}
