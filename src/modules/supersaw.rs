use crate::{
    dsp::supersaw::{BankControls, DetunedOscillatorBank},
    modules::{Module, ModuleIo, ModuleManifest, ParamConfig, ProcessCtx},
    CV_NORMAL_VOLTAGE,
};

pub static MANIFEST: ModuleManifest = ModuleManifest {
    name: "Supersaw",
    params: &[
        ParamConfig::new("Offset", 0.0, 1.0, 1.0),
        ParamConfig::new("Invert", 0.0, 1.0, 1.0),
        ParamConfig::new("Frequency", 0.0, 8.0, 5.0),
        ParamConfig::new("Detune", 0.0, 1.0, 0.1),
        ParamConfig::new("Mix", 0.0, 1.0, 1.0),
    ],
    inputs: &["Frequency CV", "Detune CV", "Mix CV", "Reset"],
    outputs: &["Saw"],
    lights: &["Phase +", "Phase -"],
};

/// Three detuned saws with a shared reset.
///
/// The Offset switch selects the unipolar ramp and also gates the third
/// voice; the Invert switch is active-low (0 flips the ramp).
pub struct SupersawModule {
    bank: DetunedOscillatorBank,
}

impl SupersawModule {
    pub const OFFSET_PARAM: usize = 0;
    pub const INVERT_PARAM: usize = 1;
    pub const FREQ_PARAM: usize = 2;
    pub const DETUNE_PARAM: usize = 3;
    pub const MIX_PARAM: usize = 4;

    pub const FREQ_CV_INPUT: usize = 0;
    pub const DETUNE_CV_INPUT: usize = 1;
    pub const MIX_CV_INPUT: usize = 2;
    pub const RESET_INPUT: usize = 3;

    pub const SAW_OUTPUT: usize = 0;

    pub const PHASE_POS_LIGHT: usize = 0;
    pub const PHASE_NEG_LIGHT: usize = 1;

    pub fn new() -> Self {
        Self {
            bank: DetunedOscillatorBank::new(),
        }
    }

    pub fn bank(&self) -> &DetunedOscillatorBank {
        &self.bank
    }
}

impl Default for SupersawModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for SupersawModule {
    fn manifest(&self) -> &'static ModuleManifest {
        &MANIFEST
    }

    fn process(&mut self, io: &mut ModuleIo, ctx: &ProcessCtx) {
        let offset_switch = io.params[Self::OFFSET_PARAM];

        let controls = BankControls {
            root_pitch: io.resolve(Self::FREQ_PARAM, Self::FREQ_CV_INPUT, CV_NORMAL_VOLTAGE),
            detune: io.resolve(Self::DETUNE_PARAM, Self::DETUNE_CV_INPUT, CV_NORMAL_VOLTAGE),
            mix: io.resolve(Self::MIX_PARAM, Self::MIX_CV_INPUT, CV_NORMAL_VOLTAGE),
            offset: offset_switch > 0.0,
            invert: io.params[Self::INVERT_PARAM] <= 0.0,
            third_voice: offset_switch >= 1.0,
            reset: io.inputs[Self::RESET_INPUT].value(),
        };

        io.outputs[Self::SAW_OUTPUT] = self.bank.process(&controls, ctx.sample_time());

        let light = self.bank.light();
        io.lights[Self::PHASE_POS_LIGHT] = light.max(0.0);
        io.lights[Self::PHASE_NEG_LIGHT] = (-light).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::Input;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn test_default_patch_in_unipolar_range() {
        // Offset on: three unipolar ramps in [0, 2]
        let mut module = SupersawModule::new();
        let mut io = ModuleIo::for_manifest(&MANIFEST);
        let ctx = ProcessCtx::new(SAMPLE_RATE);
        let bound = 5.0 * (2.0 + 2.0 + 2.0 / 3.0) + 1e-3;

        for _ in 0..48_000 {
            module.process(&mut io, &ctx);
            let out = io.outputs[SupersawModule::SAW_OUTPUT];
            assert!(out.is_finite() && (0.0..=bound).contains(&out), "out {out}");
        }
    }

    #[test]
    fn test_root_frequency_follows_knob() {
        let mut module = SupersawModule::new();
        let mut io = ModuleIo::for_manifest(&MANIFEST);
        io.params[SupersawModule::FREQ_PARAM] = 3.0;
        module.process(&mut io, &ProcessCtx::new(SAMPLE_RATE));
        assert!((module.bank().voices()[0].frequency() - 8.0).abs() < 1e-4);

        // Half-scale CV halves the exponent, not the frequency
        io.inputs[SupersawModule::FREQ_CV_INPUT] = Input::patched(5.0);
        module.process(&mut io, &ProcessCtx::new(SAMPLE_RATE));
        assert!((module.bank().voices()[0].frequency() - 2.0_f32.powf(1.5)).abs() < 1e-4);
    }

    #[test]
    fn test_offset_off_gates_third_voice_and_centers_saw() {
        let mut module = SupersawModule::new();
        let mut io = ModuleIo::for_manifest(&MANIFEST);
        io.params[SupersawModule::OFFSET_PARAM] = 0.0;
        io.params[SupersawModule::INVERT_PARAM] = 1.0;
        let ctx = ProcessCtx::new(SAMPLE_RATE);

        for _ in 0..2_000 {
            module.process(&mut io, &ctx);
            let [a, b, _] = module.bank().voices();
            let expected = 5.0 * (a.saw() + b.saw());
            assert!((io.outputs[SupersawModule::SAW_OUTPUT] - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_reset_input_restarts_phase() {
        let mut module = SupersawModule::new();
        let mut io = ModuleIo::for_manifest(&MANIFEST);
        let ctx = ProcessCtx::new(SAMPLE_RATE);
        for _ in 0..999 {
            module.process(&mut io, &ctx);
        }

        io.inputs[SupersawModule::RESET_INPUT] = Input::patched(10.0);
        module.process(&mut io, &ctx);
        assert!(module.bank().voices().iter().all(|v| v.phase() == 0.0));
        assert_eq!(io.lights[SupersawModule::PHASE_POS_LIGHT], 0.0);
    }

    #[test]
    fn test_lights_are_complementary() {
        let mut module = SupersawModule::new();
        let mut io = ModuleIo::for_manifest(&MANIFEST);
        io.params[SupersawModule::FREQ_PARAM] = 8.0;
        let ctx = ProcessCtx::new(SAMPLE_RATE);
        for _ in 0..1_000 {
            module.process(&mut io, &ctx);
            let pos = io.lights[SupersawModule::PHASE_POS_LIGHT];
            let neg = io.lights[SupersawModule::PHASE_NEG_LIGHT];
            assert!(pos == 0.0 || neg == 0.0);
            assert!(pos <= 1.0 && neg <= 1.0);
        }
    }
}
