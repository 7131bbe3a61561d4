//! Range mapping, CV resolution and dry/wet crossfades.

/*
Parameter Mapping
=================

Every module turns a knob value and an optional control voltage into the
number its DSP core wants. The same three steps repeat everywhere:

  1. resolve   knob * clamp01(cv / full_scale)
               An unpatched CV jack reads as full scale, so the knob alone
               decides. Patched, the CV attenuates the knob from 0 up to 1x.

  2. rescale   move the resolved 0..1 value onto the range the core wants,
               e.g. 0..1 -> 30..8000 Hz or 0..1 -> -12..+12 V

  3. crossfade blend the processed (wet) signal against the input (dry)

Vocabulary
----------

  full scale    The CV voltage that means "100%". 10 V for most modules.

  wet fraction  0.0 = all dry, 1.0 = all wet.

The CV factor is always confined to [0, 1], whatever the jack carries.
*/

/// Clamp into [0, 1].
#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Map `value` from `[old_min, old_max]` onto `[new_min, new_max]`.
///
/// No clamping: values outside the old range extrapolate.
///
/// # Example
/// ```
/// use rjmodules::dsp::mapping::linear_rescale;
/// assert_eq!(linear_rescale(0.5, 0.0, 1.0, -12.0, 12.0), 0.0);
/// ```
#[inline]
pub fn linear_rescale(value: f32, old_min: f32, old_max: f32, new_min: f32, new_max: f32) -> f32 {
    ((value - old_min) / (old_max - old_min)) * (new_max - new_min) + new_min
}

/// Scale a knob value by a normalised, clamped control voltage.
///
/// # Arguments
/// * `param` - Knob value in its own units
/// * `cv` - Control voltage at the jack (the full-scale voltage when unpatched)
/// * `normal_voltage` - Voltage that means 100%
#[inline]
pub fn resolve_control(param: f32, cv: f32, normal_voltage: f32) -> f32 {
    clamp01(cv / normal_voltage) * param
}

/// Blend dry and wet samples using linear crossfade.
///
/// output = (wet × wet_fraction) + (dry × (1 - wet_fraction))
#[inline]
pub fn crossfade(dry: f32, wet: f32, wet_fraction: f32) -> f32 {
    wet * wet_fraction + dry * (1.0 - wet_fraction)
}

/// Keep a cutoff strictly inside (0, Nyquist) for the state-variable filter.
#[inline]
pub fn clamp_cutoff(cutoff_hz: f32, sample_rate: f32) -> f32 {
    cutoff_hz.clamp(crate::MIN_CUTOFF_HZ, sample_rate * 0.49)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale_endpoints_and_midpoint() {
        assert_eq!(linear_rescale(0.5, 0.0, 1.0, -12.0, 12.0), 0.0);
        assert_eq!(linear_rescale(0.0, 0.0, 1.0, -12.0, 12.0), -12.0);
        assert_eq!(linear_rescale(1.0, 0.0, 1.0, -12.0, 12.0), 12.0);
    }

    #[test]
    fn test_rescale_offset_source_range() {
        // Upper half of a knob onto a highpass cutoff range
        assert_eq!(linear_rescale(0.5, 0.5, 1.0, 200.0, 8000.0), 200.0);
        assert_eq!(linear_rescale(1.0, 0.5, 1.0, 200.0, 8000.0), 8000.0);
        assert!((linear_rescale(0.75, 0.5, 1.0, 200.0, 8000.0) - 4100.0).abs() < 1e-3);
    }

    #[test]
    fn test_resolve_control_unpatched_is_knob() {
        assert_eq!(resolve_control(0.7, 10.0, 10.0), 0.7);
    }

    #[test]
    fn test_resolve_control_clamps_cv() {
        assert_eq!(resolve_control(0.7, 20.0, 10.0), 0.7);
        assert_eq!(resolve_control(0.7, -5.0, 10.0), 0.0);
        assert!((resolve_control(400.0, 5.0, 10.0) - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_crossfade() {
        // All dry
        assert_eq!(crossfade(1.0, 0.5, 0.0), 1.0);
        // All wet
        assert_eq!(crossfade(1.0, 0.5, 1.0), 0.5);
        // 50/50 mix
        assert_eq!(crossfade(1.0, 0.0, 0.5), 0.5);
    }

    #[test]
    fn test_clamp_cutoff() {
        assert_eq!(clamp_cutoff(0.0, 48_000.0), crate::MIN_CUTOFF_HZ);
        assert_eq!(clamp_cutoff(1_000.0, 48_000.0), 1_000.0);
        assert!(clamp_cutoff(148_000.0, 48_000.0) < 24_000.0);
    }
}
