//! Low-level DSP primitives used by the host-facing modules.
//!
//! These components are allocation-free and realtime-safe once built, making
//! them safe to embed directly inside module structs. They stay focused on the
//! signal-processing math; range handling and CV scaling live in [`mapping`]
//! and in the module layer that calls them.

/// Modulated delay line for chorus and vibrato.
pub mod chorus;
/// Ring-buffer delay line with fractional reads.
pub mod delay;
/// Range mapping, CV resolution and dry/wet crossfades.
pub mod mapping;
/// Pink noise and the injectable random sources behind it.
pub mod noise;
/// Naive sawtooth voice with phase reset.
pub mod oscillator;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// Three-voice detuned sawtooth bank.
pub mod supersaw;
/// Hysteresis edge detection for gate and reset signals.
pub mod trigger;

pub use filter::{FilterType, SVFilter};
pub use noise::{PinkNoise, RandomSource, XorShift32};
