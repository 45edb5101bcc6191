use prettytable::{format, Cell, Row, Table};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use serde_json::Value;
use textwrap::wrap;

use crate::chart;
use crate::conversation::{Message, Role};
use crate::interpreter::Rendering;
use crate::models::{ChartPayload, TableRow};

impl Message {
    /// Renders this turn as styled lines for the message pane. `area` only
    /// matters for wrap width.
    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let base_style = self.base_style();

        self.render_header(&mut lines, base_style);
        self.render_content(&mut lines, area, base_style);
        self.render_data_blocks(&mut lines, base_style);
        self.render_footer(&mut lines, base_style);

        lines
    }

    fn base_style(&self) -> Style {
        Style::default().fg(match self.role {
            Role::User => Color::Rgb(255, 223, 128),
            Role::Assistant => Color::Rgb(144, 238, 144),
        })
    }

    fn indent(&self) -> &'static str {
        match self.role {
            Role::User => "  ",
            Role::Assistant => "",
        }
    }

    fn role_label(&self) -> &'static str {
        match self.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        }
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.timestamp.format("%H:%M").to_string();

        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─ ".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
            Span::styled(" ".to_string(), style),
            Span::styled(
                self.role_label().to_string(),
                style.add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        let wrap_width = (area.width as usize).saturating_sub(4).max(8);

        for content_line in self.content.lines() {
            if content_line.is_empty() {
                lines.push(self.body_line(String::new(), style));
                continue;
            }
            for wrapped in wrap(content_line, wrap_width) {
                lines.push(self.body_line(wrapped.to_string(), style));
            }
        }
    }

    fn render_data_blocks(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        match &self.rendering {
            Rendering::Text | Rendering::Unrecognized { .. } => {}
            Rendering::Table { rows } => self.render_table_block(lines, rows, style),
            Rendering::Chart { chart } => self.render_chart_block(lines, chart.as_ref(), style),
            Rendering::TableAndChart { rows, chart } => {
                self.render_table_block(lines, rows, style);
                self.render_chart_block(lines, chart.as_ref(), style);
            }
        }
    }

    fn render_table_block(&self, lines: &mut Vec<Line<'static>>, rows: &[TableRow], style: Style) {
        // An empty result set means no table section at all.
        let Some(first) = rows.first() else {
            return;
        };

        lines.push(self.body_line(String::new(), style));
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled(
                "query results:".to_string(),
                style.add_modifier(Modifier::DIM),
            ),
        ]));

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(Row::new(first.keys().map(|key| Cell::new(key)).collect()));

        // Only the header comes from the first row. Every row's cells are
        // taken in that row's own field order and land positionally under
        // the columns.
        for row in rows {
            table.add_row(Row::new(
                row.values().map(|value| Cell::new(&cell_text(value))).collect(),
            ));
        }

        let table_style = Style::default().fg(Color::Rgb(137, 207, 240));
        for table_line in table.to_string().lines() {
            lines.push(Line::from(vec![
                Span::styled(self.indent().to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled(table_line.to_string(), table_style),
            ]));
        }
    }

    fn render_chart_block(
        &self,
        lines: &mut Vec<Line<'static>>,
        chart: Option<&ChartPayload>,
        style: Style,
    ) {
        lines.push(self.body_line(String::new(), style));

        let chart_line = match chart.filter(|c| !c.data.is_empty()) {
            Some(chart) => Span::styled(
                format!(
                    "[{} chart] image received, press Ctrl+S to save it as a png",
                    chart::caption(chart)
                ),
                Style::default()
                    .fg(Color::Rgb(137, 207, 240))
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::styled(
                "[no chart data]".to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        };

        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("│ ".to_string(), style),
            chart_line,
        ]));
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }

    fn body_line(&self, text: String, style: Style) -> Line<'static> {
        Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled(text, style),
        ])
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use serde_json::json;

    fn message(role: Role, content: &str, rendering: Rendering) -> Message {
        Message {
            id: 0,
            role,
            content: content.to_string(),
            timestamp: Local::now(),
            rendering,
        }
    }

    fn rendered_text(message: &Message) -> String {
        let area = Rect::new(0, 0, 100, 30);
        message
            .render(area)
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn rows_from(value: serde_json::Value) -> Vec<TableRow> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_plain_text_message_has_no_blocks() {
        let m = message(Role::Assistant, "hello! how can I help?", Rendering::Text);
        let text = rendered_text(&m);
        assert!(text.contains("hello! how can I help?"));
        assert!(!text.contains("query results:"));
        assert!(!text.contains("chart"));
    }

    #[test]
    fn test_table_block_uses_first_row_columns() {
        let rows = rows_from(json!([
            {"name": "Alice", "age": 20},
            {"name": "Bob", "age": 21}
        ]));
        let m = message(
            Role::Assistant,
            "2 students found",
            Rendering::Table { rows },
        );

        let text = rendered_text(&m);
        assert!(text.contains("query results:"));
        assert!(text.contains("name"));
        assert!(text.contains("age"));
        assert!(text.contains("Alice"));
        assert!(text.contains("21"));
    }

    #[test]
    fn test_later_rows_render_positionally_by_value_order() {
        // Second row's keys do not match the header; its values still land
        // under the first row's columns in order.
        let rows = rows_from(json!([
            {"name": "Alice", "age": 20},
            {"college": "Engineering", "year": 2023}
        ]));
        let m = message(Role::Assistant, "results", Rendering::Table { rows });

        let text = rendered_text(&m);
        assert!(text.contains("name"));
        assert!(text.contains("age"));
        assert!(!text.contains("college"));
        assert!(text.contains("Engineering"));
        assert!(text.contains("2023"));
    }

    #[test]
    fn test_empty_table_renders_text_only() {
        let m = message(
            Role::Assistant,
            "no students matched",
            Rendering::Table { rows: Vec::new() },
        );
        let text = rendered_text(&m);
        assert!(text.contains("no students matched"));
        assert!(!text.contains("query results:"));
    }

    #[test]
    fn test_chart_block_caption_uppercases_type() {
        let m = message(
            Role::Assistant,
            "grade distribution",
            Rendering::Chart {
                chart: Some(ChartPayload {
                    chart_type: "bar".into(),
                    data: "aGVsbG8=".into(),
                }),
            },
        );
        let text = rendered_text(&m);
        assert!(text.contains("[BAR chart]"));
    }

    #[test]
    fn test_chart_block_placeholder_when_payload_missing() {
        let m = message(
            Role::Assistant,
            "grade distribution",
            Rendering::Chart { chart: None },
        );
        assert!(rendered_text(&m).contains("[no chart data]"));
    }

    #[test]
    fn test_chart_block_placeholder_when_image_empty() {
        let m = message(
            Role::Assistant,
            "grade distribution",
            Rendering::Chart {
                chart: Some(ChartPayload {
                    chart_type: "bar".into(),
                    data: String::new(),
                }),
            },
        );
        assert!(rendered_text(&m).contains("[no chart data]"));
    }

    #[test]
    fn test_combined_rendering_shows_both_sections() {
        let rows = rows_from(json!([{"grade": "2023", "count": 10}]));
        let m = message(
            Role::Assistant,
            "stats",
            Rendering::TableAndChart {
                rows,
                chart: Some(ChartPayload {
                    chart_type: "pie".into(),
                    data: "eA==".into(),
                }),
            },
        );

        let text = rendered_text(&m);
        assert!(text.contains("query results:"));
        assert!(text.contains("[PIE chart]"));
    }

    #[test]
    fn test_unrecognized_rendering_shows_text_only() {
        let m = message(
            Role::Assistant,
            "something new",
            Rendering::Unrecognized {
                tag: "hologram".into(),
                raw: None,
            },
        );
        let text = rendered_text(&m);
        assert!(text.contains("something new"));
        assert!(!text.contains("hologram"));
    }

    #[test]
    fn test_non_string_cells_are_stringified() {
        let rows = rows_from(json!([
            {"name": "Alice", "enrolled": true, "score": 91.5, "note": null}
        ]));
        let m = message(Role::Assistant, "results", Rendering::Table { rows });

        let text = rendered_text(&m);
        assert!(text.contains("true"));
        assert!(text.contains("91.5"));
        assert!(text.contains("null"));
    }
}
