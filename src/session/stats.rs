use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::ProcessingStatus;

/// Statistics about a sketch session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Session identifier
    pub session_id: String,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Current processing status
    pub status: ProcessingStatus,

    /// Number of strokes begun
    pub strokes_begun: usize,

    /// Number of line segments rendered
    pub segments_drawn: usize,

    /// Transcription requests issued
    pub requests_issued: usize,

    /// Transcription requests that have settled
    pub requests_settled: usize,
}
