use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::progress::StreamStatus;

/// One event from the server-push transport, tagged by `type`.
///
/// ```json
/// {"type": "token", "content": "{\"name\":\"A"}
/// {"type": "status", "phase": "parsing", "message": "Reading your resume..."}
/// {"type": "complete", "data": {"name": "Ana"}}
/// {"type": "error", "message": "Upstream timed out"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportEvent {
    Token {
        #[serde(alias = "text", alias = "chunk")]
        content: String,
    },
    Status {
        phase: StreamStatus,
        #[serde(default)]
        message: Option<String>,
    },
    Complete {
        #[serde(alias = "profile")]
        data: Value,
    },
    Error {
        message: String,
    },
}

/// A transport event recorded with its offset from the start of the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Milliseconds since the stream started.
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: TransportEvent,
}
