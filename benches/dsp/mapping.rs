//! Benchmarks for the knob/CV helpers.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rjmodules::dsp::mapping::{clamp_cutoff, linear_rescale, resolve_control};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mapping");

    for &size in BLOCK_SIZES {
        let cv: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin() * 12.0).collect();

        group.bench_with_input(BenchmarkId::new("resolve_rescale_clamp", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &v in &cv {
                    let position = resolve_control(black_box(0.8), v, 10.0);
                    let cutoff = linear_rescale(position, 0.0, 1.0, 30.0, 8000.0);
                    sum += clamp_cutoff(cutoff, SAMPLE_RATE);
                }
                sum
            })
        });
    }

    group.finish();
}
