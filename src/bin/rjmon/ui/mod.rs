//! Terminal UI for the monitor
//!
//! Scope and spectrum of the module's first output plus its knobs.

mod params;
mod spectrum;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use rjmodules::{analysis::SpectrumAnalyzer, host::ParamHandle, modules::ModuleManifest};

use params::render_params;
use spectrum::render_spectrum;
use waveform::render_waveform;

/// Audio visualization buffer size (also the FFT size)
const VIS_BUFFER_SIZE: usize = 2048;

const SPECTRUM_BINS: usize = 48;

/// Share of a knob's range moved by one arrow press.
const NUDGE_FRACTION: f32 = 0.05;

pub struct UiApp {
    manifest: &'static ModuleManifest,
    /// Control end of the audio thread's parameter queue
    params: ParamHandle,
    /// UI-side copy of every knob
    values: Vec<f32>,
    selected: usize,
    audio_rx: Consumer<f32>,
    audio_buffer: Vec<f32>,
    analyzer: SpectrumAnalyzer,
    spectrum: Vec<(f64, f64)>,
    /// Status line message, e.g. a dropped parameter change
    status: Option<String>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        manifest: &'static ModuleManifest,
        values: Vec<f32>,
        params: ParamHandle,
        audio_rx: Consumer<f32>,
        sample_rate: f32,
    ) -> Self {
        let analyzer = SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate);
        let spectrum = analyzer.log_bins(SPECTRUM_BINS);
        Self {
            manifest,
            params,
            values,
            selected: 0,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            analyzer,
            spectrum,
            status: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Pull new samples, keeping the last VIS_BUFFER_SIZE
    fn poll_audio(&mut self) {
        let before = self.audio_buffer.len();
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() == before {
            return;
        }

        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
        if self.analyzer.analyze(&self.audio_buffer) {
            self.spectrum = self.analyzer.log_bins(SPECTRUM_BINS);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let count = self.values.len();
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up if count > 0 => {
                self.selected = (self.selected + count - 1) % count;
            }
            KeyCode::Down if count > 0 => {
                self.selected = (self.selected + 1) % count;
            }
            KeyCode::Left => self.nudge(-NUDGE_FRACTION),
            KeyCode::Right => self.nudge(NUDGE_FRACTION),
            _ => {}
        }
    }

    fn nudge(&mut self, fraction: f32) {
        let Some(config) = self.manifest.params.get(self.selected) else {
            return;
        };
        let value = config.clamp(self.values[self.selected] + config.span() * fraction);

        match self.params.set(self.selected, value) {
            Ok(()) => {
                self.values[self.selected] = value;
                self.status = None;
            }
            Err(change) => {
                self.status = Some(format!(
                    "queue full, dropped {} = {:.3}",
                    config.name, change.value
                ));
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // Scope and spectrum
                Constraint::Length(self.values.len() as u16 + 2), // Knobs
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let views = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        render_waveform(frame, views[0], &self.audio_buffer);
        render_spectrum(frame, views[1], &self.spectrum);
        render_params(frame, rows[1], self.manifest, &self.values, self.selected);

        let help = match &self.status {
            Some(message) => {
                Paragraph::new(format!(" {message}")).style(Style::default().fg(Color::Yellow))
            }
            None => Paragraph::new(" [Q] Quit  [Up/Down] Select  [Left/Right] Adjust")
                .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(help, rows[2]);
    }
}
