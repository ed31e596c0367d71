//! Request and response payloads for the HTTP API.

use claw_applog::LogRecord;
use serde::{Deserialize, Serialize};

/// Body of `POST /upload`. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Owning application.
    pub application_id: String,
    /// Severity token.
    pub log_level: String,
    /// Caller-supplied timestamp text.
    pub timestamp: String,
    /// The log message.
    pub log_message: String,
}

impl From<UploadRequest> for LogRecord {
    fn from(req: UploadRequest) -> Self {
        Self::new(req.application_id, req.log_level, req.timestamp, req.log_message)
    }
}

/// Successful upload response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Status message.
    pub message: String,
}

impl UploadResponse {
    /// The response sent for every stored record.
    #[must_use]
    pub fn uploaded() -> Self {
        Self {
            message: "Log uploaded successfully".to_string(),
        }
    }
}

/// Query string of `GET /query`.
///
/// Everything is optional at the extractor level so that missing parameters
/// produce the API's own error body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryParams {
    /// Application to read.
    pub application_id: Option<String>,
    /// Level filter.
    pub log_level: Option<String>,
    /// Raw limit; invalid values fall back to the default.
    pub limit: Option<String>,
    /// Level matching mode, `contains` or `exact`.
    #[serde(rename = "match")]
    pub match_mode: Option<String>,
}

/// Successful query response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Application that was read.
    pub application_id: String,
    /// Level filter that was applied.
    pub log_level: String,
    /// Matching records, oldest first.
    pub logs: Vec<LogRecord>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status message.
    pub status: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_request_converts_to_record() {
        let req: UploadRequest = serde_json::from_str(
            r#"{"application_id":"svc1","log_level":"INFO","timestamp":"t","log_message":"m"}"#,
        )
        .unwrap();
        let record = LogRecord::from(req);
        assert_eq!(record, LogRecord::new("svc1", "INFO", "t", "m"));
    }

    #[test]
    fn upload_request_requires_all_fields() {
        let result = serde_json::from_str::<UploadRequest>(
            r#"{"application_id":"svc1","log_level":"INFO","timestamp":"t"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn query_response_shape() {
        let response = QueryResponse {
            application_id: "svc1".to_string(),
            log_level: "INFO".to_string(),
            logs: vec![LogRecord::new("svc1", "INFO", "t", "m")],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["application_id"], "svc1");
        assert_eq!(json["log_level"], "INFO");
        assert_eq!(json["logs"][0]["log_message"], "m");
        assert_eq!(json["logs"][0]["timestamp"], "t");
    }

    #[test]
    fn uploaded_message() {
        assert_eq!(UploadResponse::uploaded().message, "Log uploaded successfully");
    }
}
