//! Benchmarks for the state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rjmodules::dsp::filter::{FilterType, SVFilter};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for (name, filter_type) in [
            ("lowpass", FilterType::LowPass),
            ("highpass", FilterType::HighPass),
            ("bandpass", FilterType::BandPass),
        ] {
            let mut filter = SVFilter::new(filter_type);
            filter.configure(filter_type, 1000.0, 0.5, SAMPLE_RATE);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer));
                })
            });
        }

        // Coefficients recomputed every sample, as the modules do
        let mut filter = SVFilter::new(FilterType::LowPass);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("configure_per_sample", size), &size, |b, _| {
            b.iter(|| {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let cutoff = 200.0 + i as f32;
                    filter.configure(FilterType::LowPass, black_box(cutoff), 0.5, SAMPLE_RATE);
                    *sample = filter.process_sample(input[i]);
                }
            })
        });
    }

    group.finish();
}
