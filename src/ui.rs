pub mod chat;
pub mod footer;
pub mod header;
pub mod quit_confirm;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Clear,
    Frame,
};

/// Draws one frame. Needs `&mut App` because the message pane clamps the
/// scroll position and writes it back.
pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    header::draw_header(f, chunks[0]);
    chat::draw_chat(f, app, chunks[1]);
    footer::draw_footer(f, chunks[2], app);

    if app.show_quit_confirm {
        let popup = centered_rect(40, 25, size);
        f.render_widget(Clear, popup);
        quit_confirm::draw_quit_confirm(f, popup);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
