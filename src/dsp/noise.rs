//! Pink noise (Voss-McCartney) and the random sources that drive it.

/*
Pink Noise
==========

White noise has equal power per Hz; pink noise has equal power per octave,
so its spectral density falls at 3 dB/octave (1/f). It sounds "darker" and
more natural than white noise.

The Voss Trick
--------------

Sum several white generators that update at octave-spaced rates:

    tap 0   updates every 2 samples
    tap 1   updates every 4 samples
    tap 2   updates every 8 samples
    tap 3   updates every 16 samples
    tap 4   updates every 16 samples (mid-cycle and on wrap)

Each tap is a held random value, i.e. a white source low-passed by its hold
time. Summing the five skews the spectrum toward the lows, roughly 1/f over
the covered octaves.

Scheduling With Gray Code
-------------------------

A five bit counter walks 0..31 and wraps. The generator keys off the Gray
code of that counter, which changes in exactly one bit per step. The bit that
flipped names the single tap to re-draw:

    counter  gray   flipped
    0 -> 1   00001  bit 0
    1 -> 2   00011  bit 1
    2 -> 3   00010  bit 0
    3 -> 4   00110  bit 2
    ...
    31 -> 0  00000  bit 4      (the 5 bit Gray sequence is cyclic)

Bit n < 4 flips every 2^(n+1) steps, giving the octave-spaced rates above.
One full counter cycle re-draws every tap at least once.

Taps are integer magnitudes in [0, range / 5). With the default range of 128
each tap lies in 0..=24 and the sum in 0..=120.
*/

/// Source of uniformly distributed bits for the noise generators.
///
/// Each generator owns its source, so two instances never share state and a
/// fixed seed reproduces a run exactly.
pub trait RandomSource: Send {
    fn next_u32(&mut self) -> u32;

    /// Uniform in [0, 1].
    #[inline]
    fn next_unipolar(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// Uniform in [-1, 1].
    #[inline]
    fn next_bipolar(&mut self) -> f32 {
        self.next_unipolar() * 2.0 - 1.0
    }

    /// Uniform integer in [0, bound). `bound` must be non-zero.
    #[inline]
    fn next_below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

/// Simple xorshift PRNG state
#[derive(Debug, Clone, Copy)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a new generator with a seed. Zero is remapped, xorshift would stick there.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(0x1234_5678)
    }
}

impl RandomSource for XorShift32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

const TAP_COUNT: usize = 5;
const MAX_KEY: u32 = (1 << TAP_COUNT) - 1;

/// Default magnitude range shared across the five taps.
pub const PINK_DEFAULT_RANGE: u32 = 128;

#[inline]
fn gray(counter: u32) -> u32 {
    counter ^ (counter >> 1)
}

pub struct PinkNoise<R: RandomSource = XorShift32> {
    taps: [u32; TAP_COUNT],
    counter: u32,
    tap_range: u32,
    refreshed: u32,
    rng: R,
}

impl PinkNoise<XorShift32> {
    pub fn new(seed: u32) -> Self {
        Self::with_source(XorShift32::new(seed), PINK_DEFAULT_RANGE)
    }
}

impl<R: RandomSource> PinkNoise<R> {
    /// Build a generator over an explicit random source.
    ///
    /// `range` is split evenly across the taps; it is raised to at least one
    /// unit per tap.
    pub fn with_source(mut rng: R, range: u32) -> Self {
        let tap_range = (range / TAP_COUNT as u32).max(1);
        let mut taps = [0; TAP_COUNT];
        for tap in taps.iter_mut() {
            *tap = rng.next_below(tap_range);
        }

        Self {
            taps,
            counter: 0,
            tap_range,
            refreshed: 0,
            rng,
        }
    }

    /// Advance one sample and return the sum of the five taps.
    pub fn next_value(&mut self) -> f32 {
        let last_key = gray(self.counter);
        self.counter = (self.counter + 1) & MAX_KEY;
        let diff = last_key ^ gray(self.counter);

        let mut sum = 0;
        for (i, tap) in self.taps.iter_mut().enumerate() {
            if diff & (1 << i) != 0 {
                *tap = self.rng.next_below(self.tap_range);
            }
            sum += *tap;
        }

        self.refreshed = diff;
        sum as f32
    }

    /// Bitmask of the taps re-drawn by the most recent `next_value`.
    pub fn refreshed_taps(&self) -> u32 {
        self.refreshed
    }

    pub fn taps(&self) -> &[u32] {
        &self.taps
    }

    /// Largest value `next_value` can return for this range.
    pub fn peak(&self) -> f32 {
        ((self.tap_range - 1) * TAP_COUNT as u32) as f32
    }

    /// Borrow the owned random source, e.g. to draw white noise from the same stream.
    pub fn source_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
