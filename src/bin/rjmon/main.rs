//! rjmon - play one module through the sound card and watch it
//!
//! Run with: cargo run --features monitor --bin rjmon -- <module> [Knob=value ...]
//!
//! Knob names are matched case-insensitively, e.g. `rjmon noise Color=0 Lowpass=2000`.

mod app;
mod ui;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rjmodules::modules::{ModuleKind, ModuleManifest};

use app::Monitor;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let mut args = std::env::args().skip(1);
    let kind = match args.next() {
        Some(name) => name
            .parse::<ModuleKind>()
            .wrap_err("can't pick a module to monitor")?,
        None => ModuleKind::Supersaw,
    };

    let overrides = args
        .map(|arg| parse_override(kind.manifest(), &arg))
        .collect::<EyreResult<Vec<_>>>()?;

    Monitor::new(kind).with_params(overrides).run()
}

/// `Name=value` to (param index, value).
fn parse_override(manifest: &ModuleManifest, arg: &str) -> EyreResult<(usize, f32)> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| eyre!("expected Knob=value, got `{arg}`"))?;
    let index = manifest
        .param_index(name.trim())
        .ok_or_else(|| eyre!("{} has no knob named `{}`", manifest.name, name.trim()))?;
    let value = value
        .trim()
        .parse::<f32>()
        .wrap_err_with(|| format!("bad value for {}", manifest.params[index].name))?;
    Ok((index, value))
}
