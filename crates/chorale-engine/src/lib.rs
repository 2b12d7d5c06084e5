//! Chorale Engine - a quad-voice "dimension" style chorus.
//!
//! The engine splits a mono input into a dry path and four modulated delay
//! voices, and blends them under a small set of discrete presets ("modes").
//! An operator selects zero, one, or two simultaneously active modes; the
//! effective wet/dry mix and per-voice modulation depth are derived by
//! blending the selected modes' parameters and applied with 10 ms
//! exponential smoothing.
//!
//! # Architecture
//!
//! - [`ModeTable`] / [`ModeConfig`] - immutable preset table (off + 4
//!   intensities)
//! - [`ModeSelector`] - active-mode state machine with FIFO eviction
//! - [`blend`] - pure mapping from the active set to an effective config
//! - [`DimensionChorus`] - the signal topology: dry gain, four voices, wet
//!   gain, all driven through smoothed parameters
//!
//! # Example
//!
//! ```rust
//! use chorale_engine::DimensionChorus;
//! use chorale_core::Effect;
//!
//! let mut chorus = DimensionChorus::new(48000.0);
//! chorus.toggle_mode(2).unwrap();         // modes {1, 2} now active
//! assert_eq!(chorus.active_modes(), &[1, 2]);
//!
//! let out = chorus.process(0.25);
//! assert!(out.is_finite());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod blend;
pub mod chorus;
pub mod mode;
pub mod selector;
pub mod voice;

pub use blend::blend;
pub use chorus::DimensionChorus;
pub use mode::{MAX_MODE, ModeConfig, ModeError, ModeTable, NUM_VOICES};
pub use selector::ModeSelector;
pub use voice::Voice;
