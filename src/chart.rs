use crate::errors::{RollcallError, RollcallResult};
use crate::models::ChartPayload;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::{Path, PathBuf};

/// Caption shown with a chart block, e.g. "BAR" for `"type": "bar"`.
pub fn caption(chart: &ChartPayload) -> String {
    chart.chart_type.to_uppercase()
}

/// Decodes the base64 image and writes it as `chart-<message id>.png`
/// under `dir`. This is the only place the payload is ever decoded; the
/// rest of the client treats it as an opaque string.
pub fn export(dir: &Path, message_id: u64, chart: &ChartPayload) -> RollcallResult<PathBuf> {
    let bytes = STANDARD
        .decode(chart.data.trim())
        .map_err(|e| RollcallError::chart_error(format!("invalid chart image data: {}", e)))?;

    let path = dir.join(format!("chart-{}.png", message_id));
    fs::write(&path, bytes)
        .map_err(|e| RollcallError::chart_error(format!("failed to write {}: {}", path.display(), e)))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_caption_uppercases_chart_type() {
        let chart = ChartPayload {
            chart_type: "bar".into(),
            data: String::new(),
        };
        assert_eq!(caption(&chart), "BAR");
    }

    #[test]
    fn test_export_writes_decoded_bytes() {
        let dir = tempdir().unwrap();
        let chart = ChartPayload {
            chart_type: "pie".into(),
            data: STANDARD.encode(b"png bytes here"),
        };

        let path = export(dir.path(), 7, &chart).unwrap();
        assert_eq!(path.file_name().unwrap(), "chart-7.png");
        assert_eq!(fs::read(&path).unwrap(), b"png bytes here");
    }

    #[test]
    fn test_export_rejects_invalid_base64() {
        let dir = tempdir().unwrap();
        let chart = ChartPayload {
            chart_type: "bar".into(),
            data: "!!! not base64 !!!".into(),
        };

        let err = export(dir.path(), 1, &chart).unwrap_err();
        assert!(matches!(err, RollcallError::Chart(_)));
    }
}
