//! Crawler module for wiki page fetching and extraction
//!
//! This module contains the crawl layer, including:
//! - HTTP GET/POST with query-string encoding and error logging
//! - HTML parsing, category link extraction and description layouts
//! - The wiki session tying a base URL to an HTTP session

mod http;
pub mod parser;
mod session;

pub use http::{append_query, build_http_client, HeaderPreset, HttpResponse, HttpSession};
pub use parser::{extract_description, extract_links, Links};
pub use session::WikiCrawlerSession;

use crate::output::{Row, Value};
use colored::Colorize;

/// Marker printed in place of a description that could not be read
pub const ERROR_MARKER: &str = "[Error]";

/// Builds a `spell`/`desc` output row from one description lookup
///
/// A failed lookup becomes [`ERROR_MARKER`], in red when `color` is set,
/// so a single broken page never takes the rest of the listing with it.
pub fn spell_row(spell: &str, description: &crate::Result<String>, color: bool) -> Row {
    let desc = match description {
        Ok(text) => text.clone(),
        Err(_) if color => ERROR_MARKER.red().to_string(),
        Err(_) => ERROR_MARKER.to_string(),
    };

    Row::from([
        ("spell".to_string(), Value::from(spell)),
        ("desc".to_string(), Value::Text(desc)),
    ])
}
