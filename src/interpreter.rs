use crate::models::{ChartPayload, ChatResponse, Payload, TableRow};

/// Assistant turn pushed when the transport call itself fails. The backend
/// never sees these; they exist only in the local conversation.
pub const APOLOGY: &str = "Sorry, something went wrong. Please try again later.";

/// How an assistant reply should be displayed, decided once when the
/// response arrives and stored on the message.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendering {
    /// Message text only.
    Text,
    /// Text plus a result table. An empty row list means the table
    /// section is simply omitted.
    Table { rows: Vec<TableRow> },
    /// Text plus a chart. `None` means the server claimed a chart but
    /// attached nothing, which renders as a placeholder.
    Chart { chart: Option<ChartPayload> },
    /// Text plus both sections. Each side degrades on its own.
    TableAndChart {
        rows: Vec<TableRow>,
        chart: Option<ChartPayload>,
    },
    /// A `data_type` this client does not know. Displayed as plain text;
    /// the raw payload is kept for the log, never for the screen.
    Unrecognized {
        tag: String,
        raw: Option<Payload>,
    },
}

impl Rendering {
    /// Chart payload this rendering would export, if it carries one with
    /// actual image bytes.
    pub fn exportable_chart(&self) -> Option<&ChartPayload> {
        let chart = match self {
            Rendering::Chart { chart } => chart.as_ref(),
            Rendering::TableAndChart { chart, .. } => chart.as_ref(),
            _ => None,
        };
        chart.filter(|c| !c.data.is_empty())
    }
}

/// Classifies a backend reply into its rendering mode.
///
/// Total over anything the server can send: a missing `data_type` means
/// plain text, an unknown one falls back to [`Rendering::Unrecognized`],
/// and missing sub-payloads degrade per section. Never panics, never
/// rejects a decoded response.
pub fn interpret(response: &ChatResponse) -> Rendering {
    let payload = response.data.as_ref();
    let rows = || {
        payload
            .and_then(|p| p.table.clone())
            .unwrap_or_default()
    };
    let chart = || payload.and_then(|p| p.chart.clone());

    match response.data_type.as_deref() {
        None | Some("text") => Rendering::Text,
        Some("table") => Rendering::Table { rows: rows() },
        Some("chart") => Rendering::Chart { chart: chart() },
        Some("table_and_chart") => Rendering::TableAndChart {
            rows: rows(),
            chart: chart(),
        },
        Some(other) => Rendering::Unrecognized {
            tag: other.to_string(),
            raw: response.data.clone(),
        },
    }
}
