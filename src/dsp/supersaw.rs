use crate::dsp::oscillator::SawOscillator;

/*
Detuned Oscillator Bank
=======================

Three saws: the root, one detuned sharp, one detuned flat. Beating between
the three is what makes the "supersaw" sound wide.

    voice 0   root pitch                  always full level
    voice 1   root + detune * DETUNE_STEP scaled by mix
    voice 2   root - detune * DETUNE_STEP scaled by mix / 3, gated on/off

Pitch is in octaves (see `SawOscillator::set_pitch`), so with DETUNE_STEP at
0.075 a full detune moves each side voice by 0.9 semitones.

Output Weighting
----------------

    out = 5 * (saw0 + saw1 * mix + saw2 * mix / 3)

The third voice carries a /3 the second does not.
*/

/// Octave offset of each detuned voice at full detune.
pub const DETUNE_STEP: f32 = 0.075;

/// Output gain applied to the summed voices.
pub const OUTPUT_GAIN: f32 = 5.0;

/// Per-sample controls for the bank. Everything is already CV-resolved.
#[derive(Debug, Clone, Copy)]
pub struct BankControls {
    pub root_pitch: f32,
    /// Detune amount, 0..1.
    pub detune: f32,
    /// Level of the detuned voices, 0..1.
    pub mix: f32,
    pub offset: bool,
    pub invert: bool,
    /// Gate for the flat voice.
    pub third_voice: bool,
    /// Raw reset input; a rising edge restarts every voice.
    pub reset: f32,
}

pub struct DetunedOscillatorBank {
    voices: [SawOscillator; 3],
}

impl DetunedOscillatorBank {
    pub fn new() -> Self {
        Self {
            voices: [
                SawOscillator::new(),
                SawOscillator::new(),
                SawOscillator::new(),
            ],
        }
    }

    /// Advance every voice by `dt` seconds and return the mixed sample.
    pub fn process(&mut self, controls: &BankControls, dt: f32) -> f32 {
        let spread = controls.detune * DETUNE_STEP;
        let pitches = [
            controls.root_pitch,
            controls.root_pitch + spread,
            controls.root_pitch - spread,
        ];

        for (voice, &pitch) in self.voices.iter_mut().zip(pitches.iter()) {
            voice.set_pitch(pitch);
            voice.offset = controls.offset;
            voice.invert = controls.invert;
            voice.step(dt);
            voice.set_reset(controls.reset);
        }

        let third = if controls.third_voice {
            self.voices[2].saw()
        } else {
            0.0
        };

        let sharp = self.voices[1].saw() * controls.mix;
        OUTPUT_GAIN * (self.voices[0].saw() + sharp + third * controls.mix / 3.0)
    }

    pub fn voices(&self) -> &[SawOscillator; 3] {
        &self.voices
    }

    /// Phase indicator of the root voice.
    pub fn light(&self) -> f32 {
        self.voices[0].light()
    }
}

impl Default for DetunedOscillatorBank {
    fn default() -> Self {
        Self::new()
    }
}
