use crate::{
    dsp::{
        filter::{FilterType, SVFilter},
        mapping::{clamp01, clamp_cutoff, crossfade, linear_rescale},
        noise::XorShift32,
    },
    modules::{dither, Module, ModuleIo, ModuleManifest, ParamConfig, ProcessCtx},
    CV_NORMAL_VOLTAGE,
};

/*
One-Knob Filter
===============

A single frequency knob sweeps from a lowpass through "off" to a highpass:

    knob    0.0 ........ 0.5 ........ 1.0
    mode    lowpass      bypass       highpass
    cutoff  30 -> 8000   (dry)        200 -> 8000

Only the filter on the active side runs; the other holds its state until the
knob comes back.

Mix blends the filtered signal against the input, and the mix CV then scales
the whole output (unpatched = unity).
*/

const LOWPASS_RANGE: (f32, f32) = (30.0, 8000.0);
const HIGHPASS_RANGE: (f32, f32) = (200.0, 8000.0);
const CENTER: f32 = 0.5;

pub static MANIFEST: ModuleManifest = ModuleManifest {
    name: "Filter",
    params: &[
        ParamConfig::new("Frequency", 0.0, 1.0, 0.5),
        ParamConfig::new("Resonance", 0.0, 1.0, 0.8),
        ParamConfig::new("Mix", 0.0, 1.0, 1.0),
    ],
    inputs: &["In", "Frequency CV", "Resonance CV", "Mix CV"],
    outputs: &["Out"],
    lights: &[],
};

pub struct FilterModule {
    lowpass: SVFilter,
    highpass: SVFilter,
    rng: XorShift32,
}

impl FilterModule {
    pub const FREQ_PARAM: usize = 0;
    pub const RES_PARAM: usize = 1;
    pub const MIX_PARAM: usize = 2;

    pub const IN_INPUT: usize = 0;
    pub const FREQ_CV_INPUT: usize = 1;
    pub const RES_CV_INPUT: usize = 2;
    pub const MIX_CV_INPUT: usize = 3;

    pub const OUT_OUTPUT: usize = 0;

    pub fn new(seed: u32) -> Self {
        Self {
            lowpass: SVFilter::new(FilterType::LowPass),
            highpass: SVFilter::new(FilterType::HighPass),
            rng: XorShift32::new(seed),
        }
    }
}

impl Module for FilterModule {
    fn manifest(&self) -> &'static ModuleManifest {
        &MANIFEST
    }

    fn process(&mut self, io: &mut ModuleIo, ctx: &ProcessCtx) {
        let sample_rate = ctx.sample_rate;
        let dry = io.inputs[Self::IN_INPUT].value() + dither(&mut self.rng);

        let position = io.resolve(Self::FREQ_PARAM, Self::FREQ_CV_INPUT, CV_NORMAL_VOLTAGE);
        let resonance = io.resolve(Self::RES_PARAM, Self::RES_CV_INPUT, CV_NORMAL_VOLTAGE);

        let wet = if position < CENTER {
            let cutoff = linear_rescale(position, 0.0, CENTER, LOWPASS_RANGE.0, LOWPASS_RANGE.1);
            self.lowpass.configure(
                FilterType::LowPass,
                clamp_cutoff(cutoff, sample_rate),
                resonance,
                sample_rate,
            );
            self.lowpass.process_sample(dry)
        } else if position > CENTER {
            let cutoff = linear_rescale(position, CENTER, 1.0, HIGHPASS_RANGE.0, HIGHPASS_RANGE.1);
            self.highpass.configure(
                FilterType::HighPass,
                clamp_cutoff(cutoff, sample_rate),
                resonance,
                sample_rate,
            );
            self.highpass.process_sample(dry)
        } else {
            dry
        };

        let mix_cv =
            clamp01(io.inputs[Self::MIX_CV_INPUT].normalize(CV_NORMAL_VOLTAGE) / CV_NORMAL_VOLTAGE);
        io.outputs[Self::OUT_OUTPUT] = crossfade(dry, wet, io.params[Self::MIX_PARAM]) * mix_cv;
    }
}
