//! Whole-value dumps: compact JSON, pretty JSON, or a structure dump

use crate::output::{OutputError, OutputResult};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// The closed set of dump styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintFormat {
    /// Single-line JSON with `", "` and `": "` separators
    Json,
    /// Sorted keys, 4-space indentation
    JsonPretty,
    /// Pretty `Debug` output
    Pprint,
}

impl PrintFormat {
    pub const ALL: [PrintFormat; 3] = [Self::Json, Self::JsonPretty, Self::Pprint];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::JsonPretty => "json-pretty",
            Self::Pprint => "pprint",
        }
    }
}

impl fmt::Display for PrintFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrintFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| OutputError::InvalidFormat(s.to_string()))
    }
}

/// Single-line JSON that keeps a space after `,` and `:`
struct SpacedCompactFormatter;

impl Formatter for SpacedCompactFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

/// Dumps arbitrary serialisable data to the console in one fixed style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Printer {
    format: PrintFormat,
}

impl Printer {
    /// Creates a printer from a format name
    ///
    /// # Errors
    ///
    /// Returns `OutputError::InvalidFormat` unless `name` is one of
    /// `json`, `json-pretty` or `pprint`.
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_crawler::output::Printer;
    ///
    /// assert!(Printer::new("json").is_ok());
    /// assert!(Printer::new("xml").is_err());
    /// ```
    pub fn new(name: &str) -> OutputResult<Self> {
        Ok(Self::with_format(name.parse()?))
    }

    pub fn with_format(format: PrintFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> PrintFormat {
        self.format
    }

    /// Serialises `content` in the selected style
    ///
    /// Both JSON styles escape non-ASCII characters as `\uXXXX`.
    pub fn render<T>(&self, content: &T) -> OutputResult<String>
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        match self.format {
            PrintFormat::Json => {
                let mut buf = Vec::new();
                let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedCompactFormatter);
                content.serialize(&mut ser)?;
                into_ascii_string(buf)
            }
            PrintFormat::JsonPretty => {
                let value = sort_keys(serde_json::to_value(content)?);
                let mut buf = Vec::new();
                let mut ser = serde_json::Serializer::with_formatter(
                    &mut buf,
                    PrettyFormatter::with_indent(b"    "),
                );
                value.serialize(&mut ser)?;
                into_ascii_string(buf)
            }
            PrintFormat::Pprint => Ok(format!("{:#?}", content)),
        }
    }

    /// Writes the rendered `content` plus a newline to `writer`
    pub fn write_to<W, T>(&self, writer: &mut W, content: &T) -> OutputResult<()>
    where
        W: Write,
        T: Serialize + fmt::Debug + ?Sized,
    {
        writeln!(writer, "{}", self.render(content)?)?;
        Ok(())
    }

    /// Prints the rendered `content` to stdout
    pub fn pprint<T>(&self, content: &T) -> OutputResult<()>
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        let stdout = io::stdout();
        self.write_to(&mut stdout.lock(), content)
    }
}

/// Turns serialised JSON into text with every non-ASCII character written
/// as a `\uXXXX` escape (surrogate pairs above the BMP)
///
/// Non-ASCII characters only ever occur inside JSON strings, so the
/// escapes stay valid JSON.
fn into_ascii_string(buf: Vec<u8>) -> OutputResult<String> {
    let json = String::from_utf8(buf).map_err(|e| OutputError::Format(e.to_string()))?;
    if json.is_ascii() {
        return Ok(json);
    }

    let mut escaped = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    Ok(escaped)
}

/// Rebuilds every object with its keys in sorted order
fn sort_keys(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(sort_keys).collect())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_format_names_round_trip() {
        for format in PrintFormat::ALL {
            assert_eq!(format.name().parse::<PrintFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result = Printer::new("xml");
        assert!(matches!(result, Err(OutputError::InvalidFormat(name)) if name == "xml"));
    }

    #[test]
    fn test_compact_json() {
        let printer = Printer::new("json").unwrap();
        let content = HashMap::from([("a", 1)]);
        assert_eq!(printer.render(&content).unwrap(), r#"{"a": 1}"#);
    }

    #[test]
    fn test_compact_json_nested() {
        let printer = Printer::new("json").unwrap();
        let mut content = BTreeMap::new();
        content.insert("a", vec![1, 2]);
        content.insert("b", vec![]);
        assert_eq!(printer.render(&content).unwrap(), r#"{"a": [1, 2], "b": []}"#);
    }

    #[test]
    fn test_pretty_json_sorts_keys() {
        let printer = Printer::new("json-pretty").unwrap();
        let content = HashMap::from([("b", 1), ("a", 2)]);
        assert_eq!(
            printer.render(&content).unwrap(),
            "{\n    \"a\": 2,\n    \"b\": 1\n}"
        );
    }

    #[test]
    fn test_pretty_json_sorts_nested_keys() {
        let printer = Printer::with_format(PrintFormat::JsonPretty);
        let content = HashMap::from([("outer", HashMap::from([("z", 1), ("y", 2)]))]);
        assert_eq!(
            printer.render(&content).unwrap(),
            "{\n    \"outer\": {\n        \"y\": 2,\n        \"z\": 1\n    }\n}"
        );
    }

    #[test]
    fn test_json_escapes_non_ascii() {
        let content = HashMap::from([("a", "Héllo")]);
        assert_eq!(
            Printer::new("json").unwrap().render(&content).unwrap(),
            r#"{"a": "H\u00e9llo"}"#
        );
        assert_eq!(
            Printer::new("json-pretty").unwrap().render(&content).unwrap(),
            "{\n    \"a\": \"H\\u00e9llo\"\n}"
        );
    }

    #[test]
    fn test_json_escapes_astral_as_surrogate_pair() {
        let printer = Printer::new("json").unwrap();
        assert_eq!(printer.render(&vec!["🎵"]).unwrap(), r#"["\ud83c\udfb5"]"#);
    }

    #[test]
    fn test_pprint_dump() {
        let printer = Printer::new("pprint").unwrap();
        let content = vec![("Cocoon", 10)];
        assert_eq!(printer.render(&content).unwrap(), format!("{:#?}", content));
    }

    #[test]
    fn test_write_to_appends_newline() {
        let printer = Printer::new("json").unwrap();
        let mut out = Vec::new();
        printer.write_to(&mut out, &vec!["x"]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[\"x\"]\n");
    }
}
