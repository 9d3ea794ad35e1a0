//! Handwriting recognition over a remote multimodal model
//!
//! This module provides the transcription client:
//! - Wire types for the `generateContent` exchange
//! - The `Recognizer` seam and its Gemini HTTP backend
//! - Compositing, PNG/base64 encoding, and sentinel handling

pub mod client;
pub mod gemini;
pub mod messages;

pub use client::{Transcription, TranscriptionClient, NO_TEXT_SENTINEL, PNG_MIME};
pub use gemini::{GeminiRecognizer, Recognizer, TRANSCRIBE_INSTRUCTION};
pub use messages::RecognitionRequest;
