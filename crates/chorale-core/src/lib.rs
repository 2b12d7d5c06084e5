//! Chorale Core - DSP primitives for the chorale chorus processor
//!
//! This crate provides the building blocks the chorus engine is assembled
//! from, designed for real-time audio processing with zero allocation in the
//! audio path.
//!
//! # Core Abstractions
//!
//! - [`Effect`] - Object-safe trait for audio processors
//! - [`SmoothedParam`] - Exponential parameter smoothing (zipper-free
//!   automation; the engine drives every gain and depth through one of these)
//! - [`InterpolatedDelay`] - Variable-length delay line with fractional reads
//! - [`Lfo`] - Sine low-frequency oscillator for delay-time modulation
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! chorale-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Object-safe traits**: Dynamic dispatch when needed

#![cfg_attr(not(feature = "std"), no_std)]

pub mod delay;
pub mod effect;
pub mod lfo;
pub mod param;

pub use delay::InterpolatedDelay;
pub use effect::Effect;
pub use lfo::Lfo;
pub use param::SmoothedParam;
