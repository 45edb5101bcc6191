use thiserror::Error;

pub type RollcallResult<T> = Result<T, RollcallError>;

/// Failure categories surfaced to the UI and the log file.
#[derive(Debug, Error)]
pub enum RollcallError {
    #[error("api error: {0}")]
    Api(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("chart error: {0}")]
    Chart(String),
}

impl RollcallError {
    pub fn api_error(msg: impl Into<String>) -> Self {
        RollcallError::Api(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        RollcallError::Config(msg.into())
    }

    pub fn chart_error(msg: impl Into<String>) -> Self {
        RollcallError::Chart(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_category() {
        let err = RollcallError::api_error("backend returned 500");
        assert_eq!(err.to_string(), "api error: backend returned 500");

        let err = RollcallError::config_error("base_url is empty");
        assert!(err.to_string().starts_with("config error:"));
    }
}
