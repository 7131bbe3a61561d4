use std::f32::consts::TAU;

use crate::dsp::delay::DelayLine;

/*
Modulated Delay Line
====================

A short delay whose read position is swept by a sine LFO. As the delay
shortens the stored signal is read back faster (pitch up), as it lengthens
slower (pitch down). Blended with the dry signal that drift reads as chorus;
on its own it is vibrato.

    read delay = base + excursion * sin(lfo_phase)      (in samples)
    excursion  = depth * base

Depth is a fraction of the base delay, so at depth 1 the read position swings
between zero and twice the base. The buffer is sized for that swing.

Changing the Base Delay
-----------------------

`configure` throws the old buffer away and allocates a fresh, silent one. The
line then reads exactly zero until `base` new samples have been written.
Callers invoke `configure` only when the requested base delay actually
changes, never per sample.
*/

pub struct ModulatedDelayLine {
    delay_line: DelayLine,
    base_delay: usize,
    lfo_phase: f32, // radians, [0, TAU)
    mod_frequency: f32,
    mod_depth: f32,
}

impl ModulatedDelayLine {
    pub fn new(base_delay_samples: usize) -> Self {
        Self {
            delay_line: DelayLine::with_capacity(Self::capacity_for(base_delay_samples)),
            base_delay: base_delay_samples,
            lfo_phase: 0.0,
            mod_frequency: 0.0,
            mod_depth: 0.0,
        }
    }

    #[inline]
    fn capacity_for(base_delay: usize) -> usize {
        base_delay * 2 + 2
    }

    /// Reallocate for a new base delay, clearing history and LFO phase.
    ///
    /// Modulation frequency and depth carry over.
    pub fn configure(&mut self, base_delay_samples: usize) {
        self.delay_line = DelayLine::with_capacity(Self::capacity_for(base_delay_samples));
        self.base_delay = base_delay_samples;
        self.lfo_phase = 0.0;
    }

    pub fn base_delay(&self) -> usize {
        self.base_delay
    }

    pub fn set_modulation_frequency(&mut self, hz: f32) {
        self.mod_frequency = hz;
    }

    pub fn set_modulation_depth(&mut self, fraction: f32) {
        self.mod_depth = fraction;
    }

    pub fn modulation_frequency(&self) -> f32 {
        self.mod_frequency
    }

    pub fn modulation_depth(&self) -> f32 {
        self.mod_depth
    }

    /// Current read delay in samples, before the next tick.
    pub fn current_delay(&self) -> f32 {
        let excursion = self.mod_depth * self.base_delay as f32;
        self.base_delay as f32 + excursion * self.lfo_phase.sin()
    }

    /// Write one sample and return the modulated, interpolated delayed sample.
    pub fn tick(&mut self, input: f32, sample_rate: f32) -> f32 {
        self.delay_line.write(input);
        let delayed = self.delay_line.read_interpolated(self.current_delay());

        // Single wrap; an infinite increment leaves NaN rather than spinning
        let increment = TAU * self.mod_frequency / sample_rate;
        self.lfo_phase = (self.lfo_phase + increment).rem_euclid(TAU);

        delayed
    }

    pub fn reset(&mut self) {
        self.delay_line.reset();
        self.lfo_phase = 0.0;
    }
}
