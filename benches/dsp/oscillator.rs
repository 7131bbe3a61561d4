//! Benchmarks for the saw voice and the three-voice bank.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rjmodules::dsp::{
    oscillator::SawOscillator,
    supersaw::{BankControls, DetunedOscillatorBank},
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let dt = 1.0 / SAMPLE_RATE;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut saw = SawOscillator::new();
        saw.set_pitch(7.0);
        group.bench_with_input(BenchmarkId::new("saw", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    saw.step(black_box(dt));
                    *sample = saw.saw();
                }
            })
        });

        let mut bank = DetunedOscillatorBank::new();
        let controls = BankControls {
            root_pitch: 5.0,
            detune: 0.3,
            mix: 0.8,
            offset: false,
            invert: false,
            third_voice: true,
            reset: 0.0,
        };
        group.bench_with_input(BenchmarkId::new("supersaw_bank", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = bank.process(black_box(&controls), dt);
                }
            })
        });
    }

    group.finish();
}
