use crate::{
    dsp::{chorus::ModulatedDelayLine, mapping::crossfade},
    modules::{Module, ModuleIo, ModuleManifest, ParamConfig, ProcessCtx},
};

/// CV jacks on this module are scaled against 1 V rather than 10 V.
const CV_FULL_SCALE: f32 = 1.0;

/// Wet share of the output.
pub const CHORUS_EFFECT_MIX: f32 = 0.5;

const INITIAL_DELAY: usize = 50;

pub static MANIFEST: ModuleManifest = ModuleManifest {
    name: "Chorus",
    params: &[
        ParamConfig::new("Delay", 1.0, 6000.0, 50.0),
        ParamConfig::new("Frequency", 0.0, 25.0, 2.0),
        ParamConfig::new("Depth", 0.00001, 0.99999, 0.99999),
    ],
    inputs: &["In", "Delay CV", "Frequency CV", "Depth CV"],
    outputs: &["Out"],
    lights: &[],
};

/// Modulated delay blended half and half with the dry input.
///
/// The delay knob is in samples. The line is only rebuilt when the whole
/// number of samples changes, so sweeping the knob clicks once per step
/// rather than once per frame.
pub struct ChorusModule {
    line: ModulatedDelayLine,
    last_delay: usize,
}

impl ChorusModule {
    pub const DELAY_PARAM: usize = 0;
    pub const FREQ_PARAM: usize = 1;
    pub const DEPTH_PARAM: usize = 2;

    pub const IN_INPUT: usize = 0;
    pub const DELAY_CV_INPUT: usize = 1;
    pub const FREQ_CV_INPUT: usize = 2;
    pub const DEPTH_CV_INPUT: usize = 3;

    pub const OUT_OUTPUT: usize = 0;

    pub fn new() -> Self {
        Self {
            line: ModulatedDelayLine::new(INITIAL_DELAY),
            last_delay: INITIAL_DELAY,
        }
    }

    pub fn delay_line(&self) -> &ModulatedDelayLine {
        &self.line
    }
}

impl Default for ChorusModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for ChorusModule {
    fn manifest(&self) -> &'static ModuleManifest {
        &MANIFEST
    }

    fn process(&mut self, io: &mut ModuleIo, ctx: &ProcessCtx) {
        let input = io.inputs[Self::IN_INPUT].value();

        // Truncated toward zero; a fully closed CV gives a zero-sample delay
        let delay = io.resolve(Self::DELAY_PARAM, Self::DELAY_CV_INPUT, CV_FULL_SCALE) as usize;
        if delay != self.last_delay {
            self.line.configure(delay);
            self.last_delay = delay;
        }

        let frequency = io.resolve(Self::FREQ_PARAM, Self::FREQ_CV_INPUT, CV_FULL_SCALE);
        let depth = io.resolve(Self::DEPTH_PARAM, Self::DEPTH_CV_INPUT, CV_FULL_SCALE);
        self.line.set_modulation_frequency(frequency);
        self.line.set_modulation_depth(depth);

        let wet = self.line.tick(input, ctx.sample_rate);
        io.outputs[Self::OUT_OUTPUT] = crossfade(input, wet, CHORUS_EFFECT_MIX);
    }
}
