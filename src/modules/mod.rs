//! Host-facing modules.
//!
//! Each module wraps one or more [`crate::dsp`] cores and speaks the rack
//! contract: a fixed array of knob values, a fixed array of input jacks read
//! once per sample, and output jacks and lights written once per sample. The
//! host calls [`Module::process`] exactly once per audio frame.

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{mapping::resolve_control, noise::RandomSource},
    DITHER_AMPLITUDE,
};

/// Band-pass filter with CV over cutoff and resonance.
pub mod bpf;
/// Nine momentary buttons emitting gates.
pub mod buttons;
/// Modulated-delay chorus.
pub mod chorus;
/// Crossfading lowpass/highpass filter on a single knob.
pub mod filter;
/// Three knob-driven bipolar voltage sources.
pub mod floats;
/// Pink/white noise through a lowpass/highpass pair.
pub mod noise;
/// Three-voice detuned saw oscillator.
pub mod supersaw;

pub use bpf::BpfModule;
pub use buttons::ButtonsModule;
pub use chorus::ChorusModule;
pub use filter::FilterModule;
pub use floats::FloatsModule;
pub use noise::NoiseModule;
pub use supersaw::SupersawModule;

/// Context passed to modules for each frame
///
/// The sample rate may change between frames; modules read it here every time
/// rather than caching it.
#[derive(Debug, Clone, Copy)]
pub struct ProcessCtx {
    pub sample_rate: f32,
}

impl ProcessCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }

    /// Seconds per frame.
    #[inline]
    pub fn sample_time(&self) -> f32 {
        1.0 / self.sample_rate
    }
}

/// One input jack. Unpatched jacks read 0 V unless normalised.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Input {
    voltage: Option<f32>,
}

impl Input {
    pub fn patched(voltage: f32) -> Self {
        Self {
            voltage: Some(voltage),
        }
    }

    pub fn unpatched() -> Self {
        Self { voltage: None }
    }

    pub fn is_patched(&self) -> bool {
        self.voltage.is_some()
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.voltage.unwrap_or(0.0)
    }

    /// The patched voltage, or `normal` when nothing is plugged in.
    #[inline]
    pub fn normalize(&self, normal: f32) -> f32 {
        self.voltage.unwrap_or(normal)
    }

    pub fn set(&mut self, voltage: f32) {
        self.voltage = Some(voltage);
    }

    pub fn unpatch(&mut self) {
        self.voltage = None;
    }
}

/// Range and default of one knob, fixed when the module is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamConfig {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamConfig {
    pub const fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

/// Static description of a module's knobs, jacks and lights.
#[derive(Debug)]
pub struct ModuleManifest {
    pub name: &'static str,
    pub params: &'static [ParamConfig],
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub lights: &'static [&'static str],
}

impl ModuleManifest {
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Per-instance port and parameter storage, owned by the host.
///
/// Sized from the manifest once; processing never resizes it.
#[derive(Debug, Clone)]
pub struct ModuleIo {
    pub params: Vec<f32>,
    pub inputs: Vec<Input>,
    pub outputs: Vec<f32>,
    pub lights: Vec<f32>,
}

impl ModuleIo {
    pub fn for_manifest(manifest: &ModuleManifest) -> Self {
        Self {
            params: manifest.params.iter().map(|p| p.default).collect(),
            inputs: vec![Input::unpatched(); manifest.inputs.len()],
            outputs: vec![0.0; manifest.outputs.len()],
            lights: vec![0.0; manifest.lights.len()],
        }
    }

    /// Knob `param` scaled by the CV on `cv_input`, normalised against `full_scale`.
    #[inline]
    pub fn resolve(&self, param: usize, cv_input: usize, full_scale: f32) -> f32 {
        resolve_control(
            self.params[param],
            self.inputs[cv_input].normalize(full_scale),
            full_scale,
        )
    }
}

/// Core trait for rack modules
pub trait Module: Send {
    fn manifest(&self) -> &'static ModuleManifest;

    /// Compute one frame: read `io.params` and `io.inputs`, write `io.outputs`
    /// and `io.lights`.
    fn process(&mut self, io: &mut ModuleIo, ctx: &ProcessCtx);
}

/// Allow boxed modules to be used as modules (for dynamic dispatch)
impl Module for Box<dyn Module> {
    fn manifest(&self) -> &'static ModuleManifest {
        (**self).manifest()
    }

    fn process(&mut self, io: &mut ModuleIo, ctx: &ProcessCtx) {
        (**self).process(io, ctx)
    }
}

/// Small white noise added ahead of a filter core.
#[inline]
pub(crate) fn dither<R: RandomSource>(rng: &mut R) -> f32 {
    DITHER_AMPLITUDE * rng.next_bipolar()
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Filter,
    Bpf,
    Noise,
    Supersaw,
    Chorus,
    Floats,
    Buttons,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 7] = [
        ModuleKind::Filter,
        ModuleKind::Bpf,
        ModuleKind::Noise,
        ModuleKind::Supersaw,
        ModuleKind::Chorus,
        ModuleKind::Floats,
        ModuleKind::Buttons,
    ];

    pub fn manifest(self) -> &'static ModuleManifest {
        match self {
            ModuleKind::Filter => &filter::MANIFEST,
            ModuleKind::Bpf => &bpf::MANIFEST,
            ModuleKind::Noise => &noise::MANIFEST,
            ModuleKind::Supersaw => &supersaw::MANIFEST,
            ModuleKind::Chorus => &chorus::MANIFEST,
            ModuleKind::Floats => &floats::MANIFEST,
            ModuleKind::Buttons => &buttons::MANIFEST,
        }
    }

    pub fn name(self) -> &'static str {
        self.manifest().name
    }

    /// Build a fresh instance. `seed` drives any noise the module owns.
    pub fn build(self, seed: u32) -> Box<dyn Module> {
        match self {
            ModuleKind::Filter => Box::new(FilterModule::new(seed)),
            ModuleKind::Bpf => Box::new(BpfModule::new(seed)),
            ModuleKind::Noise => Box::new(NoiseModule::new(seed)),
            ModuleKind::Supersaw => Box::new(SupersawModule::new()),
            ModuleKind::Chorus => Box::new(ChorusModule::new()),
            ModuleKind::Floats => Box::new(FloatsModule::new()),
            ModuleKind::Buttons => Box::new(ButtonsModule::new()),
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModule(pub String);

impl fmt::Display for UnknownModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown module `{}`", self.0)?;
        let names: Vec<&str> = ModuleKind::ALL.iter().map(|k| k.name()).collect();
        write!(f, " (expected one of: {})", names.join(", "))
    }
}

impl std::error::Error for UnknownModule {}

impl FromStr for ModuleKind {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownModule(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_normalize() {
        assert_eq!(Input::unpatched().normalize(10.0), 10.0);
        assert_eq!(Input::unpatched().value(), 0.0);
        assert_eq!(Input::patched(3.0).normalize(10.0), 3.0);
    }

    #[test]
    fn test_io_sized_from_manifest() {
        for kind in ModuleKind::ALL {
            let manifest = kind.manifest();
            let io = ModuleIo::for_manifest(manifest);
            assert_eq!(io.params.len(), manifest.params.len());
            assert_eq!(io.inputs.len(), manifest.inputs.len());
            assert_eq!(io.outputs.len(), manifest.outputs.len());
            assert_eq!(io.lights.len(), manifest.lights.len());
            for (value, config) in io.params.iter().zip(manifest.params) {
                assert_eq!(*value, config.default);
                assert!(config.min <= config.default && config.default <= config.max);
            }
        }
    }

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in ModuleKind::ALL {
            assert_eq!(kind.name().parse::<ModuleKind>(), Ok(kind));
            assert_eq!(kind.build(1).manifest().name, kind.name());
        }
        assert_eq!("SUPERSAW".parse::<ModuleKind>(), Ok(ModuleKind::Supersaw));
    }

    #[test]
    fn test_unknown_module_lists_choices() {
        let err = "wobble".parse::<ModuleKind>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("wobble"));
        assert!(message.contains("Chorus"));
    }

    #[test]
    fn test_resolve_uses_normal_when_unpatched() {
        let mut io = ModuleIo::for_manifest(ModuleKind::Floats.manifest());
        io.params[0] = 0.8;
        assert!((io.resolve(0, 0, 10.0) - 0.8).abs() < 1e-6);
        io.inputs[0] = Input::patched(5.0);
        assert!((io.resolve(0, 0, 10.0) - 0.4).abs() < 1e-6);
    }
}
