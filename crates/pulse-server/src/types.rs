//! API types for the trigger endpoint and broadcast payloads.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /trigger-event`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerEventBody {
    pub message: Option<String>,
}

/// Response body for `POST /trigger-event`.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TriggerResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Payload of a `custom-event` broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomEvent {
    pub message: String,
    /// Wall-clock time assigned by the server, ISO-8601 with milliseconds.
    pub timestamp: String,
}

impl CustomEvent {
    /// Build a record stamped with the current UTC time.
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
