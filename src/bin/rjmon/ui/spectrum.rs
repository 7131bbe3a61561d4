//! Spectrum view

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

const FLOOR_DB: f64 = -100.0;

/// Plot (frequency Hz, power dB) points on a log frequency axis.
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    // Log-spaced points read better evenly spread, so plot against log10(f)
    let data: Vec<(f64, f64)> = spectrum
        .iter()
        .map(|&(freq, db)| (freq.max(1.0).log10(), db.max(FLOOR_DB)))
        .collect();

    let (min_x, max_x) = data
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
    let (min_x, max_x) = if min_x < max_x { (min_x, max_x) } else { (0.0, 1.0) };
    let max_db = data.iter().map(|(_, db)| *db).fold(FLOOR_DB, f64::max);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([min_x, max_x])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
