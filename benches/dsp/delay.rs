//! Benchmarks for the delay line and the chorus core.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rjmodules::dsp::{chorus::ModulatedDelayLine, delay::DelayLine};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Base delays the chorus knob commonly sits at (in samples)
    let delay_times: &[usize] = &[50, 480, 6000];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &delay_samples in delay_times {
            let mut delay = DelayLine::with_capacity(delay_samples + 1);
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("render_{delay_samples}"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        delay.render(black_box(&mut buffer), black_box(delay_samples));
                    })
                },
            );

            let mut chorus = ModulatedDelayLine::new(delay_samples);
            chorus.set_modulation_frequency(2.0);
            chorus.set_modulation_depth(0.99999);
            group.bench_with_input(
                BenchmarkId::new(format!("modulated_{delay_samples}"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        for (out, &x) in buffer.iter_mut().zip(&input) {
                            *out = chorus.tick(black_box(x), SAMPLE_RATE);
                        }
                    })
                },
            );
        }

        // Knob moved every block: buffer reallocation cost
        let mut chorus = ModulatedDelayLine::new(50);
        let mut base = 50;
        group.bench_with_input(BenchmarkId::new("reconfigure", size), &size, |b, _| {
            b.iter(|| {
                base = if base == 50 { 51 } else { 50 };
                chorus.configure(black_box(base));
                for &x in &input {
                    black_box(chorus.tick(x, SAMPLE_RATE));
                }
            })
        });
    }

    group.finish();
}
