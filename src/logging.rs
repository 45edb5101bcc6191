use crate::errors::{RollcallError, RollcallResult};
use crate::models::ApiCallLog;
use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Starts file logging. Everything goes to `rollcall.log` under
/// `log_dir`; stdout belongs to the TUI. The returned handle must stay
/// alive for the life of the program.
pub fn init(log_level: &str, log_dir: &str) -> RollcallResult<LoggerHandle> {
    Logger::try_with_str(log_level)
        .map_err(|e| RollcallError::config_error(format!("invalid log level: {}", e)))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename("rollcall")
                .suppress_timestamp(),
        )
        .append()
        .format(flexi_logger::detailed_format)
        .start()
        .map_err(|e| RollcallError::config_error(format!("failed to start logger: {}", e)))
}

/// Writes one line per backend call to the log file.
pub fn log_api_call(entry: &ApiCallLog) {
    log::info!(
        target: "api",
        "[{}] {} - {} - status: {} - time: {}ms",
        entry.timestamp.to_rfc3339(),
        entry.endpoint,
        entry.request_summary,
        entry.response_status,
        entry.response_time_ms
    );
}
