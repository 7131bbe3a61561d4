//! Benchmarks for the noise sources.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rjmodules::dsp::noise::{PinkNoise, RandomSource, XorShift32};

use crate::BLOCK_SIZES;

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut pink = PinkNoise::new(1);
        group.bench_with_input(BenchmarkId::new("pink", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = pink.next_value();
                }
                black_box(&buffer);
            })
        });

        let mut white = XorShift32::new(1);
        group.bench_with_input(BenchmarkId::new("white", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = white.next_bipolar();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
