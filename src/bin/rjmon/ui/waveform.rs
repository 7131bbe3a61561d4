//! Scope view

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Samples shown after the trigger point.
const SCOPE_WINDOW: usize = 1024;

/// Index of the first rising zero crossing, so a periodic signal holds still
/// from one redraw to the next. Falls back to the start of the buffer.
fn trigger_point(buffer: &[f32]) -> usize {
    let search = buffer.len().saturating_sub(SCOPE_WINDOW);
    buffer[..search.min(buffer.len())]
        .windows(2)
        .position(|w| w[0] <= 0.0 && w[1] > 0.0)
        .map_or(0, |i| i + 1)
}

pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32]) {
    let block = Block::default().title(" Scope ").borders(Borders::ALL);

    let start = trigger_point(audio_buffer);
    let shown = &audio_buffer[start..(start + SCOPE_WINDOW).min(audio_buffer.len())];
    let data: Vec<(f64, f64)> = shown
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / SCOPE_WINDOW as f64, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .labels(vec!["-10V", "0", "+10V"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
