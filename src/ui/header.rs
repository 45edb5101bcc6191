use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_header(f: &mut Frame<'_>, area: Rect) {
    let logo = r#"
            _ _            _ _
  _ __ ___ | | |  ___ __ _| | |
 | '__/ _ \| | | / __/ _` | | |
 | | | (_) | | || (_| (_| | | |
 |_|  \___/|_|_| \___\__,_|_|_|
    "#;

    let block = Block::default()
        .style(Style::default().fg(Color::LightCyan))
        .borders(Borders::NONE);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let logo_paragraph = Paragraph::new(logo)
        .style(
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left);
    f.render_widget(logo_paragraph, chunks[0]);

    let title = Paragraph::new("Rollcall - Student Records Assistant")
        .style(
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);
}
