use serde::{Deserialize, Serialize};

/// Processing status of the session's transcription lifecycle
///
/// Exactly one value holds at any time. Transitions happen only through
/// the session: `Idle -> Processing -> {Success, Error}`, back to
/// `Processing` on the next request, back to `Idle` on clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Idle,
    Processing,
    Success,
    Error,
}

/// Status paired with its user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub status: ProcessingStatus,
    pub message: String,
}

impl StatusLine {
    fn new(status: ProcessingStatus, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Idle, nothing requested yet (or cleared)
    pub fn ready() -> Self {
        Self::new(ProcessingStatus::Idle, "READY")
    }

    /// A recognition request is in flight
    pub fn scanning() -> Self {
        Self::new(ProcessingStatus::Processing, "SCANNING...")
    }

    /// The request settled with transcribed text
    pub fn complete() -> Self {
        Self::new(ProcessingStatus::Success, "COMPLETE")
    }

    /// The request settled without legible text. Informational, not a
    /// failure: the exchange itself succeeded.
    pub fn no_text() -> Self {
        Self::new(ProcessingStatus::Success, "NO TEXT FOUND")
    }

    /// The remote exchange failed. Generic by design; diagnostic detail
    /// stays in the logs.
    pub fn failed() -> Self {
        Self::new(ProcessingStatus::Error, "SYSTEM ERROR")
    }

    pub fn is_processing(&self) -> bool {
        self.status == ProcessingStatus::Processing
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::ready()
    }
}
