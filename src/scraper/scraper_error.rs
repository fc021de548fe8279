use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Search API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<reqwest::Error> for ScraperError {
    fn from(e: reqwest::Error) -> Self {
        ScraperError::Network(e.to_string())
    }
}
