//! Mode presets: the immutable table of chorus intensities.
//!
//! A mode is a discrete preset pairing a wet/dry mix with per-voice
//! modulation depths. Mode 0 is "off" (unity dry, silent wet); modes 1-4 are
//! increasingly intense, bringing in more voices with deeper modulation as
//! the id rises. The table is fixed at engine construction and never mutated
//! at runtime.

use core::fmt;

/// Number of modulated delay voices in the wet path.
pub const NUM_VOICES: usize = 4;

/// Highest valid mode id. Mode ids run 0 (off) through this value.
pub const MAX_MODE: u8 = 4;

/// Number of table entries (off + the four intensity presets).
const MODE_COUNT: usize = MAX_MODE as usize + 1;

/// Maximum per-voice modulation depth accepted in a custom table, in seconds.
///
/// Deeper modulation than this would swing the shortest voice's read head
/// past the start of its delay line.
pub const MAX_DEPTH_SECONDS: f32 = 0.005;

/// Configuration of one mode: mix levels plus per-voice modulation depths.
///
/// `depths` are in seconds of delay-time modulation amplitude; a voice with
/// depth 0 is effectively inactive (its oscillator still runs, but moves the
/// read head by nothing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeConfig {
    /// Wet-path gain in [0, 1].
    pub wet: f32,
    /// Dry-path gain in [0, 1].
    pub dry: f32,
    /// Per-voice delay-time modulation amplitude, in seconds.
    pub depths: [f32; NUM_VOICES],
}

impl ModeConfig {
    /// The "off" configuration: unity dry, no wet, all depths zero.
    pub const OFF: Self = Self {
        wet: 0.0,
        dry: 1.0,
        depths: [0.0; NUM_VOICES],
    };
}

/// Errors from mode selection and table construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeError {
    /// A mode id outside `0..=MAX_MODE` was passed to the control surface.
    InvalidMode(u8),
    /// A custom table entry failed validation.
    InvalidConfig {
        /// Mode id (1-based) of the offending entry.
        mode: u8,
        /// Name of the field that was out of range.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMode(id) => {
                write!(f, "invalid mode id {id} (valid ids are 0..={MAX_MODE})")
            }
            Self::InvalidConfig { mode, field, value } => {
                write!(f, "mode {mode}: {field} value {value} out of range")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ModeError {}

/// Immutable, ordered table of mode configurations.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeTable {
    modes: [ModeConfig; MODE_COUNT],
}

impl ModeTable {
    /// The reference table: off plus four presets of rising intensity.
    ///
    /// Wet rises and dry falls monotonically with the id, and each step up
    /// populates one more voice's depth.
    pub fn reference() -> Self {
        Self {
            modes: [
                ModeConfig::OFF,
                ModeConfig {
                    wet: 0.3,
                    dry: 0.85,
                    depths: [0.001, 0.0, 0.0, 0.0],
                },
                ModeConfig {
                    wet: 0.4,
                    dry: 0.8,
                    depths: [0.0015, 0.0012, 0.0, 0.0],
                },
                ModeConfig {
                    wet: 0.5,
                    dry: 0.75,
                    depths: [0.002, 0.0018, 0.0015, 0.0],
                },
                ModeConfig {
                    wet: 0.6,
                    dry: 0.7,
                    depths: [0.0025, 0.002, 0.0018, 0.0015],
                },
            ],
        }
    }

    /// Build a table from four custom non-off presets.
    ///
    /// Entry `i` of `presets` becomes mode `i + 1`; mode 0 is always
    /// [`ModeConfig::OFF`]. Each entry is validated: `wet` and `dry` must be
    /// within [0, 1], every depth must be within [0, `MAX_DEPTH_SECONDS`].
    pub fn custom(presets: [ModeConfig; MODE_COUNT - 1]) -> Result<Self, ModeError> {
        for (i, preset) in presets.iter().enumerate() {
            let mode = (i + 1) as u8;
            validate_unit_range(mode, "wet", preset.wet)?;
            validate_unit_range(mode, "dry", preset.dry)?;
            for &depth in &preset.depths {
                if !(0.0..=MAX_DEPTH_SECONDS).contains(&depth) || !depth.is_finite() {
                    return Err(ModeError::InvalidConfig {
                        mode,
                        field: "depth",
                        value: depth,
                    });
                }
            }
        }

        let mut modes = [ModeConfig::OFF; MODE_COUNT];
        modes[1..].copy_from_slice(&presets);
        Ok(Self { modes })
    }

    /// Look up a mode configuration by id.
    ///
    /// Defined for `0..=MAX_MODE`; anything else is
    /// [`ModeError::InvalidMode`].
    pub fn get(&self, id: u8) -> Result<ModeConfig, ModeError> {
        self.modes
            .get(id as usize)
            .copied()
            .ok_or(ModeError::InvalidMode(id))
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self::reference()
    }
}

fn validate_unit_range(mode: u8, field: &'static str, value: f32) -> Result<(), ModeError> {
    if (0.0..=1.0).contains(&value) && value.is_finite() {
        Ok(())
    } else {
        Err(ModeError::InvalidConfig { mode, field, value })
    }
}
