use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub canvas: CanvasConfig,
    pub recognizer: RecognizerConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct RecognizerConfig {
    /// Gemini model name (e.g., "gemini-2.5-flash")
    pub model: String,
    /// API base URL
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
