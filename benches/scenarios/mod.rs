//! Module-level benchmarks.
//!
//! Every module runs through the host runner the way a rack engine drives
//! it, one `process` call per frame.

mod modules;

pub use modules::bench_modules;
