//! Response envelope shared by every endpoint

use axum::http::StatusCode;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// `{httpCode, httpMessage, timestamp, userMessage?, data?}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub http_code: u16,
    pub http_message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl<T> ApiResponse<T> {
    pub fn success(status: StatusCode, user_message: impl Into<String>, data: T) -> Self {
        Self {
            http_code: status.as_u16(),
            http_message: status.canonical_reason().unwrap_or("OK").to_string(),
            timestamp: now(),
            user_message: Some(user_message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    pub fn error(
        status: StatusCode,
        message: &str,
        user_message: String,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            http_code: status.as_u16(),
            http_message: message.to_string(),
            timestamp: now(),
            user_message: Some(user_message),
            data: details,
        }
    }
}
