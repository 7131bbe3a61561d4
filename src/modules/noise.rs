use crate::{
    dsp::{
        filter::{FilterType, SVFilter},
        mapping::{clamp_cutoff, crossfade, linear_rescale},
        noise::{PinkNoise, RandomSource, XorShift32},
    },
    modules::{dither, Module, ModuleIo, ModuleManifest, ParamConfig, ProcessCtx},
    CV_NORMAL_VOLTAGE,
};

/// Tap sum that maps to +5 V.
const PINK_FULL_SCALE: f32 = 118.0;
/// Peak level of both noise colours before mixing, in volts.
const NOISE_PEAK_VOLTS: f32 = 5.0;
const FILTER_RESONANCE: f32 = 0.6;

pub static MANIFEST: ModuleManifest = ModuleManifest {
    name: "Noise",
    params: &[
        ParamConfig::new("Color", 0.0, 1.0, 1.0),
        ParamConfig::new("Lowpass", 0.0, 8000.0, 8000.0),
        ParamConfig::new("Highpass", 30.0, 8000.0, 30.0),
        ParamConfig::new("Volume", 0.0, 2.0, 1.0),
    ],
    inputs: &["Color CV", "Lowpass CV", "Highpass CV"],
    outputs: &["Noise"],
    lights: &[],
};

/// Pink/white noise blend through a lowpass into a highpass.
///
/// Color 1.0 is pure pink, 0.0 pure white.
pub struct NoiseModule {
    pink: PinkNoise,
    white: XorShift32,
    lowpass: SVFilter,
    highpass: SVFilter,
}

impl NoiseModule {
    pub const COLOR_PARAM: usize = 0;
    pub const LPF_PARAM: usize = 1;
    pub const HPF_PARAM: usize = 2;
    pub const VOL_PARAM: usize = 3;

    pub const COLOR_CV_INPUT: usize = 0;
    pub const LPF_CV_INPUT: usize = 1;
    pub const HPF_CV_INPUT: usize = 2;

    pub const NOISE_OUTPUT: usize = 0;

    pub fn new(seed: u32) -> Self {
        Self {
            pink: PinkNoise::new(seed),
            white: XorShift32::new(seed.rotate_left(16) ^ 0x5bd1_e995),
            lowpass: SVFilter::new(FilterType::LowPass),
            highpass: SVFilter::new(FilterType::HighPass),
        }
    }
}

impl Module for NoiseModule {
    fn manifest(&self) -> &'static ModuleManifest {
        &MANIFEST
    }

    fn process(&mut self, io: &mut ModuleIo, ctx: &ProcessCtx) {
        let sample_rate = ctx.sample_rate;

        let pink = linear_rescale(
            self.pink.next_value(),
            0.0,
            PINK_FULL_SCALE,
            -NOISE_PEAK_VOLTS,
            NOISE_PEAK_VOLTS,
        );
        let white = self.white.next_bipolar() * NOISE_PEAK_VOLTS;

        let color = io.resolve(Self::COLOR_PARAM, Self::COLOR_CV_INPUT, CV_NORMAL_VOLTAGE);
        let mut mixed = crossfade(white, pink, color) / 2.0;
        mixed += dither(&mut self.white);

        let lp_cutoff = io.resolve(Self::LPF_PARAM, Self::LPF_CV_INPUT, CV_NORMAL_VOLTAGE);
        let hp_cutoff = io.resolve(Self::HPF_PARAM, Self::HPF_CV_INPUT, CV_NORMAL_VOLTAGE);

        self.lowpass.configure(
            FilterType::LowPass,
            clamp_cutoff(lp_cutoff, sample_rate),
            FILTER_RESONANCE,
            sample_rate,
        );
        self.highpass.configure(
            FilterType::HighPass,
            clamp_cutoff(hp_cutoff, sample_rate),
            FILTER_RESONANCE,
            sample_rate,
        );

        mixed = self.lowpass.process_sample(mixed);
        mixed = self.highpass.process_sample(mixed);

        io.outputs[Self::NOISE_OUTPUT] = mixed * 2.0 * io.params[Self::VOL_PARAM];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::Input;

    const SAMPLE_RATE: f32 = 44_100.0;

    fn render(module: &mut NoiseModule, io: &mut ModuleIo, frames: usize) -> Vec<f32> {
        let ctx = ProcessCtx::new(SAMPLE_RATE);
        (0..frames)
            .map(|_| {
                module.process(io, &ctx);
                io.outputs[NoiseModule::NOISE_OUTPUT]
            })
            .collect()
    }

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|x| x * x).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    #[test]
    fn test_default_output_is_finite_and_bounded() {
        let mut module = NoiseModule::new(1);
        let mut io = ModuleIo::for_manifest(&MANIFEST);
        let out = render(&mut module, &mut io, 44_100);
        assert!(out.iter().all(|x| x.is_finite()));
        // Resonant peaks can overshoot the ±5 V source a little
        assert!(out.iter().all(|x| x.abs() < 20.0));
        assert!(rms(&out) > 0.1);
    }

    #[test]
    fn test_same_seed_reproduces() {
        let mut a = NoiseModule::new(77);
        let mut b = NoiseModule::new(77);
        let mut io_a = ModuleIo::for_manifest(&MANIFEST);
        let mut io_b = ModuleIo::for_manifest(&MANIFEST);
        assert_eq!(render(&mut a, &mut io_a, 512), render(&mut b, &mut io_b, 512));
    }

    #[test]
    fn test_zero_volume_is_silent() {
        let mut module = NoiseModule::new(2);
        let mut io = ModuleIo::for_manifest(&MANIFEST);
        io.params[NoiseModule::VOL_PARAM] = 0.0;
        assert!(render(&mut module, &mut io, 256).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_closing_lowpass_cv_darkens() {
        let mut open = NoiseModule::new(3);
        let mut io_open = ModuleIo::for_manifest(&MANIFEST);
        io_open.params[NoiseModule::COLOR_PARAM] = 0.0;

        let mut closed = NoiseModule::new(3);
        let mut io_closed = ModuleIo::for_manifest(&MANIFEST);
        io_closed.params[NoiseModule::COLOR_PARAM] = 0.0;
        // 0.5 V of 10 V full scale: 8000 Hz knob becomes 400 Hz
        io_closed.inputs[NoiseModule::LPF_CV_INPUT] = Input::patched(0.5);

        let bright = rms(&render(&mut open, &mut io_open, 16_384));
        let dark = rms(&render(&mut closed, &mut io_closed, 16_384));
        assert!(dark < bright * 0.6, "bright={bright} dark={dark}");
    }
}
