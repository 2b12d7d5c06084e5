//! The full chorus: dry path, four-voice wet path, mode control surface.
//!
//! [`DimensionChorus`] wires together everything in this crate: the mode
//! table, the FIFO mode selector, the blend, the voice bank, and the two
//! smoothed mix gains. It implements [`Effect`], so the audio layer drives
//! it one sample at a time while control code pokes [`toggle_mode`]
//! between blocks.
//!
//! [`toggle_mode`]: DimensionChorus::toggle_mode

use chorale_core::{Effect, SmoothedParam};

use crate::blend::blend;
use crate::mode::{ModeConfig, ModeError, ModeTable, NUM_VOICES};
use crate::selector::ModeSelector;
use crate::voice::Voice;

/// Quad-voice dimension chorus.
///
/// All four voices and the dry path run unconditionally; mode changes only
/// move parameter targets, so the signal topology is fixed for the life of
/// the processor and transitions are click free.
///
/// The processor starts with mode 1 active, applied without smoothing so
/// the first samples already carry the startup mix.
#[derive(Debug, Clone)]
pub struct DimensionChorus {
    table: ModeTable,
    selector: ModeSelector,
    voices: [Voice; NUM_VOICES],
    dry_gain: SmoothedParam,
    wet_gain: SmoothedParam,
    target: ModeConfig,
}

impl DimensionChorus {
    /// Create a chorus with the reference mode table.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_table(ModeTable::reference(), sample_rate)
    }

    /// Create a chorus driven by a custom mode table.
    pub fn with_table(table: ModeTable, sample_rate: f32) -> Self {
        let selector = ModeSelector::new();
        // Selector ids always index into the table, so the blend is total.
        let target = blend(&table, selector.active()).unwrap_or(ModeConfig::OFF);

        let mut voices = [
            Voice::new(0, sample_rate),
            Voice::new(1, sample_rate),
            Voice::new(2, sample_rate),
            Voice::new(3, sample_rate),
        ];
        for (voice, depth) in voices.iter_mut().zip(target.depths) {
            voice.set_depth_immediate(depth);
        }

        Self {
            dry_gain: SmoothedParam::standard(target.dry, sample_rate),
            wet_gain: SmoothedParam::standard(target.wet, sample_rate),
            table,
            selector,
            voices,
            target,
        }
    }

    /// Toggle a mode on the control surface.
    ///
    /// See [`ModeSelector::toggle`] for the selection semantics. On success
    /// the blended configuration of the new active set becomes the target of
    /// every smoothed parameter; audio continues uninterrupted while the
    /// smoothers ramp.
    ///
    /// # Errors
    ///
    /// [`ModeError::InvalidMode`] if `id` is out of range. The active set
    /// and all parameter targets are left untouched.
    pub fn toggle_mode(&mut self, id: u8) -> Result<(), ModeError> {
        self.selector.toggle(id)?;
        self.target = blend(&self.table, self.selector.active())?;

        self.dry_gain.set_target(self.target.dry);
        self.wet_gain.set_target(self.target.wet);
        for (voice, depth) in self.voices.iter_mut().zip(self.target.depths) {
            voice.set_depth_target(depth);
        }
        Ok(())
    }

    /// The active mode ids, oldest selection first.
    pub fn active_modes(&self) -> &[u8] {
        self.selector.active()
    }

    /// The blended configuration currently being targeted.
    ///
    /// Smoothed values may still be in flight toward it.
    pub fn config_target(&self) -> ModeConfig {
        self.target
    }

    /// The mode table this chorus was built with.
    pub fn table(&self) -> &ModeTable {
        &self.table
    }

    /// Whether every smoothed parameter has reached its target.
    pub fn is_settled(&self) -> bool {
        self.dry_gain.is_settled() && self.wet_gain.is_settled()
    }
}

impl Effect for DimensionChorus {
    /// One sample through the fixed topology:
    ///
    /// ```text
    /// input ---+--------------------------> * dry ---+--> output
    ///          |                                     |
    ///          +--> voice 0..4 --> sum --> * wet ----+
    /// ```
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let mut wet_sum = 0.0;
        for voice in &mut self.voices {
            wet_sum += voice.process(input);
        }

        input * self.dry_gain.advance() + wet_sum * self.wet_gain.advance()
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        for voice in &mut self.voices {
            voice.set_sample_rate(sample_rate);
        }
        self.dry_gain.set_sample_rate(sample_rate);
        self.wet_gain.set_sample_rate(sample_rate);
    }

    /// Clear all audio history and snap parameters to their targets.
    ///
    /// The active mode set is preserved; only delay lines, oscillator
    /// phases, and in-flight smoothing are discarded.
    fn reset(&mut self) {
        for voice in &mut self.voices {
            voice.reset();
        }
        self.dry_gain.snap_to_target();
        self.wet_gain.snap_to_target();
    }
}
