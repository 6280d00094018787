//! Renderer status and key help

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::model::{DisplayRenderer, format_duration};

pub fn render_status(frame: &mut Frame, area: Rect, renderer: &DisplayRenderer) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let track_text = match renderer.track() {
        Some(track) => {
            let length = track.length.map(format_duration).unwrap_or_else(|| "?".to_string());
            format!("{} - {} ({})", track.artist, track.title, length)
        }
        None => "none".to_string(),
    };
    let seek_text = renderer
        .seek_position()
        .map(format_duration)
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(vec![Span::styled("State:  ", label), Span::styled(format!("{:?}", renderer.state()), value)]),
        Line::from(vec![Span::styled("View:   ", label), Span::styled(format!("{:?}", renderer.view()), value)]),
        Line::from(vec![
            Span::styled("Scroll: ", label),
            Span::styled(
                format!("{} / {}", renderer.cursor(0).offset(), renderer.cursor(1).offset()),
                value,
            ),
        ]),
        Line::from(vec![Span::styled("Seek:   ", label), Span::styled(seek_text, value)]),
        Line::from(vec![Span::styled("Track:  ", label), Span::raw(track_text)]),
    ];

    let status = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Renderer ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(status, area);
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new("Space play/pause  n next  s seek  x stop  q quit")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Keys "));
    frame.render_widget(help, area);
}
