use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
State-Variable Filter (SVF)
===========================

One pair of integrators yields lowpass, bandpass and highpass simultaneously.
The topology here is the trapezoidal ("zero-delay feedback") form, which keeps
the analog prototype's cutoff and resonance behaviour intact up to Nyquist.

| type      | passes        | rejects       |
| --------- | ------------- | ------------- |
| low-pass  | below cutoff  | above cutoff  |
| high-pass | above cutoff  | below cutoff  |
| band-pass | around cutoff | both sides    |

Coefficients
------------

    g = tan(pi * cutoff / sample_rate)      prewarped integrator gain
    k = 2 - 2 * resonance                   damping (2 = no peak, 0 = undamped)
    h = 1 / (1 + g * (g + k))               solves the feedback loop

Per sample:

    v3 = x - ic2
    v1 = h * (ic1 + g * v3)                 band-pass tap
    v2 = ic2 + g * v1                       low-pass tap
    hp = x - k * v1 - v2                    high-pass tap

    ic1 = 2 * v1 - ic1
    ic2 = 2 * v2 - ic2

Caller contract
---------------

Nothing here clamps. cutoff must sit strictly inside (0, sample_rate / 2) and
resonance inside [0, 1]. Outside that the output saturates or goes NaN; the
module layer clamps before it ever reaches `configure`.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    g: f32,
    k: f32,

    pub cutoff_hz: f32,
    pub resonance: f32,
    pub sample_rate: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType) -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            k: 2.0,
            cutoff_hz: 1000.0,
            resonance: 0.0,
            sample_rate: 44_100.0,
            filter_type,
        };
        filter.update_coefficients();
        filter
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self::new(FilterType::LowPass);
        filter.configure(FilterType::LowPass, cutoff_hz, 0.0, sample_rate);
        filter
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self::new(FilterType::HighPass);
        filter.configure(FilterType::HighPass, cutoff_hz, 0.0, sample_rate);
        filter
    }

    pub fn bandpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self::new(FilterType::BandPass);
        filter.configure(FilterType::BandPass, cutoff_hz, 0.0, sample_rate);
        filter
    }

    /// Set every coefficient input for the next sample.
    ///
    /// Cheap enough to call once per sample: one `tan` and a handful of
    /// multiplies. The integrator state is left untouched so sweeping the
    /// cutoff does not click.
    pub fn configure(
        &mut self,
        filter_type: FilterType,
        cutoff_hz: f32,
        resonance: f32,
        sample_rate: f32,
    ) {
        self.filter_type = filter_type;
        self.cutoff_hz = cutoff_hz;
        self.resonance = resonance;
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }

    #[inline]
    fn update_coefficients(&mut self) {
        let wd = 2.0 * PI * self.cutoff_hz;
        let wa = (2.0 * self.sample_rate) * (wd / (2.0 * self.sample_rate)).tan();
        self.g = wa / (2.0 * self.sample_rate);
        self.k = 2.0 - (2.0 * self.resonance);
    }

    pub fn next_sample(&mut self, sample: f32) -> FilterOutputs {
        let g = self.g;
        let k = self.k;

        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
        }
    }

    /// Filter one sample and return the tap for the configured response.
    #[inline]
    pub fn process_sample(&mut self, sample: f32) -> f32 {
        let outputs = self.next_sample(sample);

        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::BandPass => outputs.bandpass,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}
