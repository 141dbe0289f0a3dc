//! Wire format for the line-delimited JSON protocol.
//!
//! Every message the host emits is one JSON document on one line. Responses
//! and health reports go to stdout; the init report goes to stderr when
//! startup fails. Shapes are fixed by the protocol and covered by tests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The exact input line that triggers a health probe instead of a
/// prediction. Matched as a string against the trimmed line, never as
/// structural JSON: `{ "ping": true }` with extra whitespace is an ordinary
/// request.
pub const PING_SENTINEL: &str = r#"{"ping": true}"#;

/// Outcome of the one-time model initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitStatus {
    Ready,
    Error,
}

/// Report produced by `initialize()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitReport {
    pub status: InitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InitReport {
    pub fn ready() -> Self {
        Self {
            status: InitStatus::Ready,
            message: Some("Model loaded successfully".to_string()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: InitStatus::Error,
            message: None,
            error: Some(message.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == InitStatus::Ready
    }
}

/// Readiness classification in a health report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ready,
    NotReady,
    Error,
}

/// Response to the ping sentinel. `pong` is true iff the model is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub pong: bool,
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn ready() -> Self {
        Self {
            pong: true,
            status: HealthStatus::Ready,
            error: None,
        }
    }

    pub fn not_ready() -> Self {
        Self {
            pong: false,
            status: HealthStatus::NotReady,
            error: Some("Model not loaded".to_string()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            pong: false,
            status: HealthStatus::Error,
            error: Some(message.into()),
        }
    }
}

/// One response line for one request line.
///
/// A successful pipeline run emits the output value itself; any failure
/// emits `{"error": <message>}`. Serialization is untagged so success
/// payloads keep their exact shape on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Output(Value),
    Error { error: String },
}

impl Response {
    pub fn output(value: Value) -> Self {
        Self::Output(value)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

/// Serialize a wire message to its single-line JSON form.
pub fn encode_message<T: Serialize>(message: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(message)
}
