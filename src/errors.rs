// errors.rs
use crate::config::ConfigError;
use crate::scraper::ScraperError;
use thiserror::Error;

/// Failures writing the report or workbook.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Spreadsheet error: {0}")]
    Xlsx(String),
}

/// Anything that ends a run early.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Fetching listings failed: {0}")]
    Source(#[from] ScraperError),
    #[error("Writing output failed: {0}")]
    Output(#[from] OutputError),
}
