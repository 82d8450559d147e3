//! Backend health from `GET /api/status/`.

use serde::{Deserialize, Serialize};

/// Backend status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStatus {
    /// `"running"` when healthy
    pub status: String,

    /// Human-readable detail
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendStatus {
    /// Status reported when the backend could not be queried.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
        }
    }

    /// Whether the backend reports itself as running.
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_running_status() -> TestResult {
        let status: BackendStatus =
            serde_json::from_str(r#"{"status": "running", "message": "Django backend is ready!"}"#)?;

        assert!(status.is_running());

        Ok(())
    }

    #[test]
    fn unreachable_reports_error() {
        let status = BackendStatus::unreachable("connection refused");

        assert_eq!(status.status, "error");
        assert!(!status.is_running());
    }
}
