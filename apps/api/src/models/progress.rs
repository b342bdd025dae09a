use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle of one logical stream.
///
/// `idle → {uploading | fetching} → parsing → complete`, with an edge from any
/// non-terminal state to `error`. Only an explicit reset leaves a terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamStatus {
    #[default]
    Idle,
    Uploading,
    Fetching,
    Parsing,
    Complete,
    Error,
}

impl StreamStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, StreamStatus::Complete | StreamStatus::Error)
    }

    /// Whether the state machine has an edge from `self` to `next`.
    ///
    /// Re-entering the current non-terminal state is allowed so a status event can
    /// refresh the message.
    pub fn can_transition_to(self, next: StreamStatus) -> bool {
        use StreamStatus::*;

        if self.is_terminal() {
            return false;
        }
        match next {
            Idle => false,
            Uploading | Fetching => self == Idle || self == next,
            Parsing => matches!(self, Uploading | Fetching | Parsing),
            Complete => self == Parsing,
            Error => true,
        }
    }
}

/// The snapshot handed to the presentation layer on every emission.
///
/// Always derived from the whole buffer, never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamProgress {
    pub status: StreamStatus,
    pub message: String,
    pub fields_found: usize,
    /// Display label → extracted scalar or array elements, in schema order.
    pub partial_data: Map<String, Value>,
    /// Authoritative object from the transport's terminal event. Never built locally.
    pub profile: Option<Value>,
    pub error: Option<String>,
    #[serde(rename = "streamedText")]
    pub streamed_text: String,
}
