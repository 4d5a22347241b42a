//! Configuration module for wiki-crawler
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a missing file section
//! falls back to the built-in bg-wiki settings.
//!
//! # Example
//!
//! ```no_run
//! use wiki_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wiki-crawler.toml")).unwrap();
//! println!("Crawling {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, SiteConfig};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
