use std::f32::consts::TAU;

use crate::dsp::trigger::SchmittTrigger;

/// Highest pitch accepted by `set_pitch`; 2^8 = 256 Hz.
pub const MAX_PITCH: f32 = 8.0;

/// Largest phase advance per sample. Keeps the naive saw from folding over
/// itself when `frequency * dt` gets large.
const MAX_PHASE_STEP: f32 = 0.5;

/// Phase-accumulating sawtooth voice.
///
/// Pitch is exponential: `frequency = 2^pitch`, so one unit of pitch is one
/// octave. The waveform is a naive (non band-limited) ramp.
#[derive(Debug, Clone)]
pub struct SawOscillator {
    phase: f32,
    freq: f32,
    pub offset: bool,
    pub invert: bool,
    reset_trigger: SchmittTrigger,
}

impl SawOscillator {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            freq: 1.0,
            offset: false,
            invert: false,
            reset_trigger: SchmittTrigger::new(),
        }
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        let pitch = pitch.min(MAX_PITCH);
        self.freq = 2.0_f32.powf(pitch);
    }

    pub fn frequency(&self) -> f32 {
        self.freq
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Feed the reset input. A rising edge zeroes the phase.
    pub fn set_reset(&mut self, reset: f32) {
        if self.reset_trigger.process(reset) {
            self.phase = 0.0;
        }
    }

    pub fn step(&mut self, dt: f32) {
        let delta_phase = (self.freq * dt).min(MAX_PHASE_STEP);
        self.phase += delta_phase;
        while self.phase >= 1.0 {
            self.phase -= 1.0;
        }
    }

    /// Current sample in [-1, 1] (offset mode: [0, 2]).
    pub fn saw(&self) -> f32 {
        if self.offset {
            if self.invert {
                2.0 * (1.0 - self.phase)
            } else {
                2.0 * self.phase
            }
        } else {
            let value = centered_saw(self.phase);
            if self.invert {
                -value
            } else {
                value
            }
        }
    }

    /// Phase indicator in [-1, 1], positive over the first half cycle.
    pub fn light(&self) -> f32 {
        (TAU * self.phase).sin()
    }
}

impl Default for SawOscillator {
    fn default() -> Self {
        Self::new()
    }
}

/// `2 (x - round(x))`: rises through zero at x = 0 and jumps at x = 0.5.
#[inline]
fn centered_saw(x: f32) -> f32 {
    2.0 * (x - x.round())
}
