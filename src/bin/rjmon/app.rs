//! Audio side of the monitor: stream setup and the per-frame callback

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rtrb::{Producer, RingBuffer};

use rjmodules::{
    host::ModuleRunner,
    modules::{ModuleKind, SupersawModule},
};

use super::ui::UiApp;

/// Rack level to sound card level: 10 V is full scale.
const VOLTS_TO_SAMPLE: f32 = 0.1;

/// Samples in flight from the audio callback to the UI.
const VIS_QUEUE_SIZE: usize = 16_384;

const PARAM_QUEUE_SIZE: usize = 256;

/// Seed for every noise source in the monitored patch.
const SEED: u32 = 0x5eed;

pub struct Monitor {
    kind: ModuleKind,
    /// Knob settings applied before the stream starts
    params: Vec<(usize, f32)>,
}

impl Monitor {
    pub fn new(kind: ModuleKind) -> Self {
        Self {
            kind,
            params: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Vec<(usize, f32)>) -> Self {
        self.params = params;
        self
    }

    /// Open the default output device, start the stream and hand the
    /// terminal to the UI until it quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let manifest = self.kind.manifest();

        println!("=== rjmon ===");
        println!("Module: {}", manifest.name);
        println!("Sample rate: {} Hz", sample_rate);
        println!("Channels: {}", channels);

        let mut runner = ModuleRunner::for_kind(self.kind, SEED);
        for &(index, value) in &self.params {
            runner.set_param(index, value);
        }
        let initial = runner.io().params.clone();
        let (runner, params) = runner.with_control(PARAM_QUEUE_SIZE);
        let (vis_tx, vis_rx) = RingBuffer::<f32>::new(VIS_QUEUE_SIZE);
        let mut voice = MonitorVoice::new(runner, vis_tx);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| voice.fill(data, channels, sample_rate),
                |err| eprintln!("Audio error: {}", err),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        let mut app = UiApp::new(manifest, initial, params, vis_rx, sample_rate);
        let mut terminal = ratatui::init();
        let result = app.run(&mut terminal);
        ratatui::restore();

        // Keep the stream alive until the UI is done with it
        drop(stream);
        result
    }
}

/// Everything the audio callback owns.
struct MonitorVoice {
    runner: ModuleRunner,
    /// Drives the module's first input when it has an "In" jack.
    source: Option<ModuleRunner>,
    vis_tx: Producer<f32>,
}

impl MonitorVoice {
    fn new(runner: ModuleRunner, vis_tx: Producer<f32>) -> Self {
        let source = runner
            .manifest()
            .inputs
            .first()
            .filter(|name| **name == "In")
            .map(|_| {
                let mut saw = ModuleRunner::new(Box::new(SupersawModule::new()));
                saw.set_param(SupersawModule::OFFSET_PARAM, 0.0);
                saw
            });

        Self {
            runner,
            source,
            vis_tx,
        }
    }

    fn fill(&mut self, data: &mut [f32], channels: usize, sample_rate: f32) {
        for frame in data.chunks_mut(channels) {
            if let Some(source) = self.source.as_mut() {
                source.process(sample_rate);
                self.runner
                    .patch_input(0, source.output(SupersawModule::SAW_OUTPUT) * 0.5);
            }

            self.runner.process(sample_rate);
            let sample = (self.runner.output(0) * VOLTS_TO_SAMPLE).clamp(-1.0, 1.0);

            // The UI drops behind sometimes; losing samples is fine
            let _ = self.vis_tx.push(sample);
            frame.fill(sample);
        }
    }
}
