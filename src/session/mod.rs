//! Sketch session coordination
//!
//! This module provides the `SketchSession` abstraction that manages:
//! - Routing input events to the drawing surface
//! - The processing status state machine (idle/processing/success/error)
//! - Single-in-flight transcription requests with stale-response discard
//! - Session statistics

mod config;
mod session;
mod stats;
mod status;

pub use config::SessionConfig;
pub use session::{CancelToken, SketchSession};
pub use stats::SessionStats;
pub use status::{ProcessingStatus, StatusLine};
