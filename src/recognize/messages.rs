use serde::Deserialize;

/// One recognition request handed to a backend
///
/// `image_base64` is the lossless raster payload with any data-URI prefix
/// already stripped.
#[derive(Debug, Clone)]
pub struct RecognitionRequest {
    pub image_base64: String,
    pub mime_type: String,
    pub instruction: String,
    pub temperature: f32,
}

/// Response body of a Gemini `generateContent` call
///
/// Only the fields the client reads are modeled; everything else in the
/// payload is ignored.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// First text part of the first candidate; absent text is an empty
    /// string, not an error.
    pub fn first_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.clone())
            .unwrap_or_default()
    }
}
