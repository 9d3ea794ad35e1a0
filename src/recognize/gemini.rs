use anyhow::{bail, Context, Result};
use tracing::info;

use super::messages::{GenerateContentResponse, RecognitionRequest};
use crate::config::RecognizerConfig;

/// Fixed instruction sent with every recognition request
pub const TRANSCRIBE_INSTRUCTION: &str = "Transcribe the handwritten English text in this image. \
    Return ONLY the transcribed text. If no text is visible or legible, return '[[NO TEXT DETECTED]]'. \
    Do not provide explanations.";

/// Remote handwriting recognition backend
///
/// The seam between the transcription client and the network: production
/// uses `GeminiRecognizer`, tests substitute scripted implementations.
#[async_trait::async_trait]
pub trait Recognizer: Send + Sync {
    /// Run one best-effort recognition exchange, returning the raw model
    /// text (untrimmed). No retries, no timeout.
    async fn recognize(&self, request: &RecognitionRequest) -> Result<String>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Gemini `generateContent` backend
pub struct GeminiRecognizer {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiRecognizer {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a recognizer from configuration, reading the API key from the
    /// configured environment variable.
    pub fn from_config(config: &RecognizerConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .with_context(|| format!("Missing API key in ${}", config.api_key_env))?;
        Ok(Self::new(&config.endpoint, &config.model, api_key))
    }
}

#[async_trait::async_trait]
impl Recognizer for GeminiRecognizer {
    async fn recognize(&self, request: &RecognitionRequest) -> Result<String> {
        info!("Recognizing image via Gemini {}", self.model);

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [
                { "inlineData": { "mimeType": request.mime_type, "data": request.image_base64 } },
                { "text": request.instruction }
            ]}],
            "generationConfig": { "temperature": request.temperature }
        });

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to reach recognition endpoint")?;

        let status = resp.status();
        if !status.is_success() {
            // Status only; the body may echo request details
            bail!("Recognition endpoint returned {}", status);
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .context("Malformed recognition response")?;

        Ok(parsed.first_text())
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
