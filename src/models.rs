use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One prior turn, projected down to what the backend wants as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// Body of `POST /chat/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,
}

impl ChatRequest {
    /// Builds the outbound body. A token that trims to nothing is dropped
    /// from the JSON entirely rather than sent as an empty string, so the
    /// backend treats the request as unprivileged.
    pub fn compose(
        message: impl Into<String>,
        conversation_history: Vec<HistoryEntry>,
        admin_token: Option<&str>,
    ) -> Self {
        let admin_token = admin_token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        ChatRequest {
            message: message.into(),
            conversation_history,
            admin_token,
        }
    }
}

/// A single result row. Key order is whatever the backend emitted.
pub type TableRow = Map<String, Value>;

/// Server-rendered chart image. `data` stays base64 until the user asks
/// for an export; nothing here ever decodes it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(rename = "type", default)]
    pub chart_type: String,
    #[serde(default)]
    pub data: String,
}

/// Structured data attached to an assistant reply. Both halves are
/// optional; extra fields the backend tacks on (the `operation` marker on
/// mutations, for one) ride along untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<TableRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartPayload>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a `POST /chat/` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

/// Body of `GET /health`. Passed through to the activity log without
/// interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service: String,
}

/// One line in the api call log.
#[derive(Debug, Clone)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}
