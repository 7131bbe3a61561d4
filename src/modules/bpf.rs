use crate::{
    dsp::{
        filter::{FilterType, SVFilter},
        mapping::clamp_cutoff,
        noise::XorShift32,
    },
    modules::{dither, Module, ModuleIo, ModuleManifest, ParamConfig, ProcessCtx},
    CV_NORMAL_VOLTAGE,
};

pub static MANIFEST: ModuleManifest = ModuleManifest {
    name: "BPF",
    params: &[
        ParamConfig::new("Frequency", 30.0, 3000.0, 400.0),
        ParamConfig::new("Resonance", 0.0, 1.0, 0.5),
    ],
    inputs: &["In", "Frequency CV", "Resonance CV"],
    outputs: &["Out"],
    lights: &[],
};

/// Band-pass filter; both knobs are attenuated by their CV jacks.
pub struct BpfModule {
    filter: SVFilter,
    rng: XorShift32,
}

impl BpfModule {
    pub const FREQ_PARAM: usize = 0;
    pub const RES_PARAM: usize = 1;

    pub const IN_INPUT: usize = 0;
    pub const FREQ_CV_INPUT: usize = 1;
    pub const RES_CV_INPUT: usize = 2;

    pub const OUT_OUTPUT: usize = 0;

    pub fn new(seed: u32) -> Self {
        Self {
            filter: SVFilter::new(FilterType::BandPass),
            rng: XorShift32::new(seed),
        }
    }
}

impl Module for BpfModule {
    fn manifest(&self) -> &'static ModuleManifest {
        &MANIFEST
    }

    fn process(&mut self, io: &mut ModuleIo, ctx: &ProcessCtx) {
        let dry = io.inputs[Self::IN_INPUT].value() + dither(&mut self.rng);

        let cutoff = io.resolve(Self::FREQ_PARAM, Self::FREQ_CV_INPUT, CV_NORMAL_VOLTAGE);
        let resonance = io.resolve(Self::RES_PARAM, Self::RES_CV_INPUT, CV_NORMAL_VOLTAGE);

        self.filter.configure(
            FilterType::BandPass,
            clamp_cutoff(cutoff, ctx.sample_rate),
            resonance,
            ctx.sample_rate,
        );
        io.outputs[Self::OUT_OUTPUT] = self.filter.process_sample(dry);
    }
}
