pub mod canvas;
pub mod config;
pub mod recognize;
pub mod session;

pub use canvas::{DrawingSurface, InputEvent, Point, Snapshot, StrokeStyle, SurfaceRect, TouchPoint};
pub use config::Config;
pub use recognize::{
    GeminiRecognizer, Recognizer, Transcription, TranscriptionClient, NO_TEXT_SENTINEL,
};
pub use session::{ProcessingStatus, SessionConfig, SessionStats, SketchSession, StatusLine};
