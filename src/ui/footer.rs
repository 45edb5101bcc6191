use crate::app::{App, InputFocus};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Draws the one-line key hint strip at the bottom of the screen.
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let instructions = if app.show_quit_confirm {
        "Press 'y' to confirm quit or 'n' to cancel."
    } else if app.focus == InputFocus::Token {
        "Type the admin token. Enter or Tab returns to the query line."
    } else if app.busy {
        "Waiting for the assistant. Up/Down scrolls, Esc quits."
    } else {
        "Enter sends | Tab admin token | Ctrl+L clear | Ctrl+S save chart | Esc quit"
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}
