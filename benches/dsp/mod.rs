//! Benchmarks for the DSP cores.

mod delay;
mod filter;
mod mapping;
mod noise;
mod oscillator;

pub use delay::bench_delay;
pub use filter::bench_filter;
pub use mapping::bench_mapping;
pub use noise::bench_noise;
pub use oscillator::bench_oscillator;
