//! Benchmarks for each module alone and for a small patch.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rjmodules::{
    host::ModuleRunner,
    modules::{ChorusModule, FilterModule, ModuleKind, SupersawModule},
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_modules(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/modules");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for kind in ModuleKind::ALL {
            let mut runner = ModuleRunner::for_kind(kind, 1);
            group.bench_with_input(BenchmarkId::new(kind.name(), size), &size, |b, _| {
                b.iter(|| {
                    runner.render(black_box(&mut buffer), SAMPLE_RATE, 0);
                })
            });
        }

        // === SUPERSAW PATCH ===
        // supersaw -> one-knob filter (lowpass side) -> chorus
        let mut saw = ModuleRunner::for_kind(ModuleKind::Supersaw, 1);
        saw.set_param(SupersawModule::OFFSET_PARAM, 0.0);
        saw.set_param(SupersawModule::DETUNE_PARAM, 0.4);
        let mut filter = ModuleRunner::for_kind(ModuleKind::Filter, 2);
        filter.set_param(FilterModule::FREQ_PARAM, 0.3);
        let mut chorus = ModuleRunner::for_kind(ModuleKind::Chorus, 3);

        group.bench_with_input(BenchmarkId::new("supersaw_filter_chorus", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    saw.process(SAMPLE_RATE);
                    let raw = saw.output(SupersawModule::SAW_OUTPUT);
                    filter.patch_input(FilterModule::IN_INPUT, raw);
                    filter.process(SAMPLE_RATE);
                    let filtered = filter.output(FilterModule::OUT_OUTPUT);
                    chorus.patch_input(ChorusModule::IN_INPUT, filtered);
                    chorus.process(SAMPLE_RATE);
                    *sample = chorus.output(ChorusModule::OUT_OUTPUT);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
