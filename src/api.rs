use crate::errors::{RollcallError, RollcallResult};
use crate::logging::log_api_call;
use crate::models::{ApiCallLog, ChatRequest, ChatResponse, HealthStatus};
use chrono::Utc;
use reqwest::Client;
use std::time::{Duration, Instant};

/// HTTP client for the student records backend. One instance is built at
/// startup and shared by every request task.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client with a hard per-request timeout. A timed out call
    /// surfaces as a plain api error, same as any other transport fault.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RollcallResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RollcallError::api_error(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Sends one chat turn. Non-2xx statuses and undecodable bodies both
    /// come back as api errors; the caller decides what the user sees.
    pub async fn chat(&self, request: &ChatRequest) -> RollcallResult<ChatResponse> {
        let url = format!("{}/chat/", self.base_url);
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| RollcallError::api_error(format!("request failed: {}", e)))?;

        let status = response.status();
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: url,
            request_summary: format!("chat ({} history entries)", request.conversation_history.len()),
            response_status: status.as_u16(),
            response_time_ms: started.elapsed().as_millis(),
        });

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RollcallError::api_error(format!(
                "backend returned {}: {}",
                status, error_text
            )));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| RollcallError::api_error(format!("failed to decode response: {}", e)))
    }

    /// Pings `GET /health`. Used once at startup to tell the user whether
    /// the backend is reachable before they type anything.
    pub async fn health(&self) -> RollcallResult<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        let started = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RollcallError::api_error(format!("request failed: {}", e)))?;

        let status = response.status();
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: url,
            request_summary: "health".to_string(),
            response_status: status.as_u16(),
            response_time_ms: started.elapsed().as_millis(),
        });

        if !status.is_success() {
            return Err(RollcallError::api_error(format!(
                "backend returned {}",
                status
            )));
        }

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| RollcallError::api_error(format!("failed to decode response: {}", e)))
    }
}
