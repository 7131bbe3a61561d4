pub mod analysis; // Spectrum inspection for tests and the monitor
pub mod dsp;
pub mod host; // Per-sample runner standing in for the rack runtime
pub mod modules; // Host-facing modules built from the dsp cores

/// Voltage an unpatched CV jack reads as; also the full-scale CV for most modules.
pub const CV_NORMAL_VOLTAGE: f32 = 10.0;

/// Peak level of the white noise added ahead of a state-variable filter to keep
/// its integrators out of the denormal range.
pub const DITHER_AMPLITUDE: f32 = 1.0e-3;

/// Lowest cutoff the module layer will hand to a filter core.
pub const MIN_CUTOFF_HZ: f32 = 1.0;
