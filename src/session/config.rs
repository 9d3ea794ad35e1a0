use serde::{Deserialize, Serialize};

/// Configuration for a sketch session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "sketch-3f9a...")
    pub session_id: String,

    /// Drawing surface width in pixels
    pub width: u32,

    /// Drawing surface height in pixels
    pub height: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("sketch-{}", uuid::Uuid::new_v4()),
            width: 800,
            height: 600,
        }
    }
}
