//! Knob list

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use rjmodules::modules::ModuleManifest;

/// Width of the value bar in cells
const BAR_WIDTH: usize = 20;

pub fn render_params(
    frame: &mut Frame,
    area: Rect,
    manifest: &ModuleManifest,
    values: &[f32],
    selected: usize,
) {
    let block = Block::default()
        .title(format!(" {} ", manifest.name))
        .borders(Borders::ALL);

    let lines: Vec<Line> = manifest
        .params
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (config, &value))| {
            let position = if config.span() > 0.0 {
                ((value - config.min) / config.span()).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let filled = (position * BAR_WIDTH as f32).round() as usize;
            let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));

            let style = if i == selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Line::from(vec![
                Span::styled(format!(" {:<12}", config.name), style),
                Span::styled(bar, Style::default().fg(Color::DarkGray)),
                Span::styled(format!(" {:>10.4}", value), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
