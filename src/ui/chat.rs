use crate::app::{App, InputFocus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const HINTS: [&str; 4] = [
    "show all students in the Computer Science college",
    "count students per grade",
    "how many male and female students are there",
    "add student Zhang San, id 2025001 (needs the admin token)",
];

pub fn draw_chat(f: &mut Frame, app: &mut App, area: Rect) {
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .margin(1)
        .split(area);

    let chat_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(horizontal_chunks[0]);

    draw_messages(f, app, chat_chunks[0]);
    app.status.render(f, chat_chunks[1]);
    draw_token_line(f, app, chat_chunks[2]);
    draw_input(f, app, chat_chunks[3]);
    draw_logs(f, app, horizontal_chunks[1]);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    if app.conversation.is_empty() {
        draw_hints(f, area);
        app.scroll = 0;
        return;
    }

    let mut lines = Vec::new();
    for message in app.conversation.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message.render(area));
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    // Clamp and write back, so scroll keys always move from the position
    // actually on screen.
    app.scroll = app.scroll.min(max_scroll);

    // trim would strip the user-side indent, so wrap keeps whitespace.
    let messages = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(messages, area);
}

fn draw_hints(f: &mut Frame, area: Rect) {
    let style = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            "Ask about the student records, for example:",
            style,
        )),
        Line::from(""),
    ];
    for hint in HINTS {
        lines.push(Line::from(vec![
            Span::styled("  - ", style),
            Span::styled(hint, style.add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Answers come back as text, tables or charts.",
        style,
    )));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn draw_token_line(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == InputFocus::Token;

    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // The token itself never reaches the screen, only a mask.
    let mask = "•".repeat(app.admin_token.chars().count());
    let value = if mask.is_empty() && !focused {
        Span::styled("(not set)", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(mask.clone(), Style::default().fg(Color::White))
    };

    let line = Line::from(vec![Span::styled("admin token: ", label_style), value]);
    f.render_widget(Paragraph::new(line), area);

    if focused && !app.show_quit_confirm {
        let cursor_x = area.x + 13 + mask.chars().count() as u16;
        f.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
    }
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    if area.height < 3 {
        return;
    }

    let separator = "─".repeat(area.width as usize);
    let separator_style = Style::default().fg(Color::DarkGray);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator.clone(), separator_style))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let prefix_style = if app.busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let input_line = Line::from(vec![
        Span::styled("→ ", prefix_style),
        Span::styled(app.input.clone(), Style::default().fg(Color::White)),
    ]);

    let visible_width = area.width.saturating_sub(3);
    let text_width = UnicodeWidthStr::width(app.input.as_str()) as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input_line).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator, separator_style))),
        Rect {
            x: area.x,
            y: area.y + 2,
            width: area.width,
            height: 1,
        },
    );

    if app.focus == InputFocus::Query && !app.show_quit_confirm {
        let cursor_x = area.x + 2 + text_width.min(visible_width);
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let separator_height = area.height;
    for offset in 0..separator_height {
        f.render_widget(
            Paragraph::new(Span::styled("│", Style::default().fg(Color::DarkGray))),
            Rect {
                x: area.x,
                y: area.y + offset,
                width: 1,
                height: 1,
            },
        );
    }

    let log_area = Rect {
        x: area.x + 2,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: area.height,
    };

    let log_lines: Vec<Line> = app
        .logs
        .entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(entry.as_str()),
            ])
        })
        .collect();

    // The feed follows its tail; newest entries stay visible.
    let total = log_lines.len() as u16;
    let scroll = total.saturating_sub(log_area.height);

    let logs = Paragraph::new(log_lines)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    f.render_widget(logs, log_area);
}
