use anyhow::{Context, Result};
use base64::Engine;
use image::{Rgba, RgbaImage};
use std::sync::Arc;
use tracing::info;

use super::gemini::{Recognizer, TRANSCRIBE_INSTRUCTION};
use super::messages::RecognitionRequest;
use crate::canvas::Snapshot;

/// Sentinel the remote model returns when no legible text is present
pub const NO_TEXT_SENTINEL: &str = "[[NO TEXT DETECTED]]";

/// MIME type of the transmitted payload
pub const PNG_MIME: &str = "image/png";

/// Low randomness setting for deterministic-leaning recognition
const RECOGNITION_TEMPERATURE: f32 = 0.1;

/// Opaque background composited beneath the strokes before transmission
const COMPOSITE_BACKGROUND: [u8; 3] = [0, 0, 0];

/// Outcome of one transcription exchange
///
/// "No text detected" is a distinct non-error outcome; remote failures are
/// reported through `Err`, never through this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcription {
    Text(String),
    NoTextDetected,
}

/// Converts a snapshot into a text result via one remote exchange
#[derive(Clone)]
pub struct TranscriptionClient {
    recognizer: Arc<dyn Recognizer>,
}

impl TranscriptionClient {
    pub fn new(recognizer: Arc<dyn Recognizer>) -> Self {
        Self { recognizer }
    }

    /// Transcribe a raw (possibly transparent) snapshot.
    ///
    /// The snapshot is composited onto an opaque background before
    /// encoding: the remote model's accuracy depends on stroke/background
    /// contrast, so this is part of the contract, not cosmetics.
    pub async fn transcribe(&self, snapshot: &Snapshot) -> Result<Transcription> {
        let composited = composite_opaque(snapshot.image(), COMPOSITE_BACKGROUND);
        let png = Snapshot::from_image(composited).to_png()?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&png);
        self.transcribe_encoded(&encoded).await
    }

    /// Transcribe an already base64-encoded PNG payload. Accepts data-URI
    /// input and strips the prefix before transmission.
    pub async fn transcribe_encoded(&self, image_base64: &str) -> Result<Transcription> {
        let request = RecognitionRequest {
            image_base64: strip_data_uri(image_base64).to_string(),
            mime_type: PNG_MIME.to_string(),
            instruction: TRANSCRIBE_INSTRUCTION.to_string(),
            temperature: RECOGNITION_TEMPERATURE,
        };

        let raw = self
            .recognizer
            .recognize(&request)
            .await
            .with_context(|| format!("Recognition via {} failed", self.recognizer.name()))?;

        let text = raw.trim();
        if text.is_empty() || text == NO_TEXT_SENTINEL {
            info!("Recognition returned no legible text");
            Ok(Transcription::NoTextDetected)
        } else {
            Ok(Transcription::Text(text.to_string()))
        }
    }
}

/// Flatten a transparent-background image onto an opaque solid color.
pub fn composite_opaque(src: &RgbaImage, background: [u8; 3]) -> RgbaImage {
    let mut out = RgbaImage::new(src.width(), src.height());
    for (dst, px) in out.pixels_mut().zip(src.pixels()) {
        let [r, g, b, a] = px.0;
        let alpha = a as u32;
        let blend = |fg: u8, bg: u8| -> u8 {
            ((fg as u32 * alpha + bg as u32 * (255 - alpha)) / 255) as u8
        };
        *dst = Rgba([
            blend(r, background[0]),
            blend(g, background[1]),
            blend(b, background[2]),
            255,
        ]);
    }
    out
}

/// Strip a `data:<mime>;base64,` prefix, leaving the bare payload.
pub fn strip_data_uri(payload: &str) -> &str {
    if payload.starts_with("data:") {
        match payload.split_once(',') {
            Some((_, rest)) => rest,
            None => payload,
        }
    } else {
        payload
    }
}
