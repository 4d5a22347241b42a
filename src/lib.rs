//! wiki-crawler: a small wiki scraper with tabular output
//!
//! This crate fetches pages from a wiki site, extracts Blue Magic spell
//! descriptions from their HTML, and prints the results as aligned console
//! columns, CSV, or a structured dump.

pub mod config;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for wiki-crawler operations
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("No response received from {url}")]
    NoResponse { url: String },

    #[error("Element '{selector}' not found at {url}")]
    ElementNotFound { selector: String, url: String },

    #[error("No known description layout matched at {url}")]
    NoMatchingLayout { url: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for wiki-crawler operations
pub type Result<T> = std::result::Result<T, WikiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{HttpSession, WikiCrawlerSession};
pub use output::{OutputColumn, OutputTable, Printer, Row, Value, WidthSource};
