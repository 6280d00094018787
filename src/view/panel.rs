//! LCD panel rendering

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::model::DisplayFrame;

pub fn render_panel(frame: &mut Frame, area: Rect, lcd: &DisplayFrame, mirror: Option<&str>) {
    let title = format!(" LCD {}x2 ", lcd.columns());
    let target = match mirror {
        Some(path) => format!(" → {} ", path),
        None => " preview only ".to_string(),
    };

    let lines: Vec<Line> = lcd.rows().iter().map(|row| Line::from(row.as_str())).collect();

    let panel = Paragraph::new(lines)
        .style(Style::default().fg(Color::Black).bg(Color::LightGreen))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(target).right_aligned())
                .style(Style::default().bg(Color::Reset)),
        );

    frame.render_widget(panel, area);
}
