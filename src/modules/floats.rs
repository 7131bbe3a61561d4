use crate::{
    dsp::mapping::linear_rescale,
    modules::{Module, ModuleIo, ModuleManifest, ParamConfig, ProcessCtx},
    CV_NORMAL_VOLTAGE,
};

/// Output swing of each channel, in volts.
const OUTPUT_RANGE: (f32, f32) = (-12.0, 12.0);

pub const CHANNELS: usize = 3;

pub static MANIFEST: ModuleManifest = ModuleManifest {
    name: "Floats",
    params: &[
        ParamConfig::new("Channel 1", 0.0, 1.0, 0.5),
        ParamConfig::new("Channel 2", 0.0, 1.0, 0.5),
        ParamConfig::new("Channel 3", 0.0, 1.0, 0.5),
    ],
    inputs: &["Channel 1 CV", "Channel 2 CV", "Channel 3 CV"],
    outputs: &["Channel 1", "Channel 2", "Channel 3"],
    lights: &[],
};

/// Three knobs turned into bipolar voltages. Channel `n` uses param, input
/// and output `n`.
#[derive(Debug, Default)]
pub struct FloatsModule;

impl FloatsModule {
    pub fn new() -> Self {
        Self
    }
}

impl Module for FloatsModule {
    fn manifest(&self) -> &'static ModuleManifest {
        &MANIFEST
    }

    fn process(&mut self, io: &mut ModuleIo, _ctx: &ProcessCtx) {
        for channel in 0..CHANNELS {
            let level = io.resolve(channel, channel, CV_NORMAL_VOLTAGE);
            io.outputs[channel] = linear_rescale(level, 0.0, 1.0, OUTPUT_RANGE.0, OUTPUT_RANGE.1);
        }
    }
}
