//! View module - Terminal preview of the LCD
//!
//! Used by the simulator to show what the display would show, using ratatui.
//! It is organized into submodules by component type:
//!
//! - `panel`: The LCD panel itself
//! - `status`: Renderer status and key help below the panel

mod panel;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::model::DisplayRenderer;

pub struct LcdView;

impl LcdView {
    pub fn render(frame: &mut Frame, renderer: &DisplayRenderer, mirror: Option<&str>) {
        let columns = renderer.config().columns as u16;
        let area = centered(frame.area(), columns.saturating_add(4).max(40));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // LCD panel (two rows + borders)
                Constraint::Length(7), // Renderer status
                Constraint::Length(3), // Key help
                Constraint::Min(0),
            ])
            .split(area);

        panel::render_panel(frame, chunks[0], renderer.frame(), mirror);
        status::render_status(frame, chunks[1], renderer);
        status::render_help(frame, chunks[2]);
    }
}

/// A horizontally centered strip of at most `width` columns
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}
