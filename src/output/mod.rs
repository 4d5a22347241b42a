//! Output module for tabular and serialised results
//!
//! This module handles:
//! - Sizing columns from literal headers, sample values, or record fields
//! - Printing aligned rows to the console
//! - Mirroring printed rows into a CSV sink and reading them back
//! - Dumping arbitrary data as JSON or a structure dump

mod column;
mod format;
mod printer;
mod replay;
mod table;

pub use column::{OutputColumn, WidthSource};
pub use format::{Align, FormatSpec};
pub use printer::{PrintFormat, Printer};
pub use replay::{read_csv, replay_columns, REPLAY_COLUMNS};
pub use table::OutputTable;

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Missing value for column '{0}'")]
    MissingField(String),

    #[error("Cannot size column '{header}' from an empty sample set")]
    EmptySamples { header: String },

    #[error("No records found in {0}")]
    NoRecords(String),

    #[error("Expected at least {expected} columns, found {found}")]
    TooFewColumns { expected: usize, found: usize },

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A single displayable cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Value {
    /// Returns true for integer and float values
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Short type name used in format error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

/// One row of output, keyed by column key
pub type Row = HashMap<String, Value>;
