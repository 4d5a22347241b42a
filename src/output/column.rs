//! Column descriptors and width inference

use crate::output::{OutputError, OutputResult};
use std::collections::HashMap;
use std::fmt::Display;

/// Where a column's display width comes from
///
/// Every variant is resolved exactly once, when the column is built, into a
/// plain character count.
#[derive(Debug, Clone, PartialEq)]
pub enum WidthSource {
    /// Use this width as-is
    Fixed(usize),

    /// Width of a literal string
    Literal(String),

    /// Longest string form among the samples
    Samples(Vec<String>),

    /// Longest value of `key` across a set of records.
    /// `None` marks a record that has no such field.
    RecordField {
        key: String,
        values: Vec<Option<String>>,
    },
}

impl WidthSource {
    /// Builds a sample source from anything displayable
    pub fn samples<I, T>(samples: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        Self::Samples(samples.into_iter().map(|s| s.to_string()).collect())
    }

    /// Samples the keys of a mapping (or of a list of key/value pairs)
    ///
    /// This is the policy used to size a column from a `{name: link}`
    /// mapping: the names are what ends up in the column.
    pub fn keys<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Display,
    {
        Self::samples(pairs.into_iter().map(|(k, _)| k))
    }

    /// Samples the values of a mapping (or of a list of key/value pairs)
    pub fn values<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        V: Display,
    {
        Self::samples(pairs.into_iter().map(|(_, v)| v))
    }

    /// Projects `key` out of every record
    ///
    /// For a mapping of records pass `map.values()`.
    pub fn record_field<'a, I, V>(records: I, key: &str) -> Self
    where
        I: IntoIterator<Item = &'a HashMap<String, V>>,
        V: Display + 'a,
    {
        let values = records
            .into_iter()
            .map(|record| record.get(key).map(|v| v.to_string()))
            .collect();

        Self::RecordField {
            key: key.to_string(),
            values,
        }
    }

    /// Resolves the source into a character count
    ///
    /// # Errors
    ///
    /// * `OutputError::EmptySamples` - there was nothing to measure
    /// * `OutputError::MissingField` - a record lacks the projected field
    pub fn resolve(&self, header: &str) -> OutputResult<usize> {
        let empty = || OutputError::EmptySamples {
            header: header.to_string(),
        };

        match self {
            Self::Fixed(width) => Ok(*width),
            Self::Literal(s) => Ok(char_len(s)),
            Self::Samples(samples) => samples
                .iter()
                .map(|s| char_len(s))
                .max()
                .ok_or_else(empty),
            Self::RecordField { key, values } => {
                let mut widest = None;
                for value in values {
                    let value = value
                        .as_deref()
                        .ok_or_else(|| OutputError::MissingField(key.clone()))?;
                    widest = widest.max(Some(char_len(value)));
                }
                widest.ok_or_else(empty)
            }
        }
    }
}

impl From<usize> for WidthSource {
    fn from(width: usize) -> Self {
        Self::Fixed(width)
    }
}

impl From<&str> for WidthSource {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// A column descriptor: header text, display width, visibility and the
/// format modifiers placed around the width in the row template
#[derive(Debug, Clone, PartialEq)]
pub struct OutputColumn {
    header: String,
    width: usize,
    display: bool,
    before_width: String,
    after_width: String,
}

impl OutputColumn {
    /// Creates a visible column formatted as a string (`s`)
    ///
    /// # Arguments
    ///
    /// * `header` - Header text printed above the column
    /// * `width` - How to compute the display width
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_crawler::output::{OutputColumn, WidthSource};
    ///
    /// let column = OutputColumn::new("Spell", WidthSource::samples(["Foot Kick", "Pollen"])).unwrap();
    /// assert_eq!(column.width(), 9);
    /// ```
    pub fn new(header: impl Into<String>, width: impl Into<WidthSource>) -> OutputResult<Self> {
        let header = header.into();
        let width = width.into().resolve(&header)?;

        Ok(Self {
            header,
            width,
            display: true,
            before_width: String::new(),
            after_width: "s".to_string(),
        })
    }

    /// Marks the column as hidden from printed and CSV output
    pub fn hidden(self) -> Self {
        self.with_display(false)
    }

    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Replaces the modifiers written before and after the width,
    /// e.g. `(">", "d")` for right-aligned integers
    pub fn with_modifiers(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.before_width = before.into();
        self.after_width = after.into();
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_displayed(&self) -> bool {
        self.display
    }

    pub fn before_width(&self) -> &str {
        &self.before_width
    }

    pub fn after_width(&self) -> &str {
        &self.after_width
    }

    /// Format spec used for the header cell
    pub(crate) fn header_spec(&self) -> String {
        self.width.to_string()
    }

    /// Format spec used for data cells
    pub(crate) fn row_spec(&self) -> String {
        format!("{}{}{}", self.before_width, self.width, self.after_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_fixed_width() {
        let column = OutputColumn::new("Description", WidthSource::Fixed(100)).unwrap();
        assert_eq!(column.width(), 100);
        assert!(column.is_displayed());
        assert_eq!(column.before_width(), "");
        assert_eq!(column.after_width(), "s");
    }

    #[test]
    fn test_literal_width_counts_chars() {
        let column = OutputColumn::new("Spell", "Mysterious Light").unwrap();
        assert_eq!(column.width(), 16);

        let column = OutputColumn::new("Name", "Héllo").unwrap();
        assert_eq!(column.width(), 5);
    }

    #[test]
    fn test_samples_width() {
        let column = OutputColumn::new("N", WidthSource::samples([7, 12345, 99])).unwrap();
        assert_eq!(column.width(), 5);
    }

    #[test]
    fn test_mapping_keys_width() {
        let mut links = BTreeMap::new();
        links.insert("Bludgeon", "/bg/Bludgeon");
        links.insert("Sandspin", "/bg/Sandspin_(Blue_Magic)");

        let column = OutputColumn::new("Spell", WidthSource::keys(&links)).unwrap();
        assert_eq!(column.width(), 8);

        let column = OutputColumn::new("Link", WidthSource::values(&links)).unwrap();
        assert_eq!(column.width(), "/bg/Sandspin_(Blue_Magic)".len());
    }

    #[test]
    fn test_record_field_width() {
        let records: Vec<HashMap<String, String>> = vec![
            HashMap::from([("Spell".to_string(), "Cocoon".to_string())]),
            HashMap::from([("Spell".to_string(), "Head Butt".to_string())]),
        ];

        let column =
            OutputColumn::new("Spell", WidthSource::record_field(&records, "Spell")).unwrap();
        assert_eq!(column.width(), 9);
    }

    #[test]
    fn test_record_field_over_mapping_values() {
        let mut records: BTreeMap<&str, HashMap<String, i64>> = BTreeMap::new();
        records.insert("a", HashMap::from([("mp".to_string(), 12)]));
        records.insert("b", HashMap::from([("mp".to_string(), 1024)]));

        let column = OutputColumn::new("MP", WidthSource::record_field(records.values(), "mp"))
            .unwrap();
        assert_eq!(column.width(), 4);
    }

    #[test]
    fn test_record_missing_field() {
        let records: Vec<HashMap<String, String>> =
            vec![HashMap::from([("Spell".to_string(), "Cocoon".to_string())])];

        let result = OutputColumn::new("X", WidthSource::record_field(&records, "Description"));
        assert!(matches!(result, Err(OutputError::MissingField(key)) if key == "Description"));
    }

    #[test]
    fn test_empty_samples_fail() {
        let result = OutputColumn::new("Spell", WidthSource::samples(Vec::<String>::new()));
        assert!(matches!(result, Err(OutputError::EmptySamples { .. })));

        let records: Vec<HashMap<String, String>> = Vec::new();
        let result = OutputColumn::new("Spell", WidthSource::record_field(&records, "Spell"));
        assert!(matches!(result, Err(OutputError::EmptySamples { .. })));
    }

    #[test]
    fn test_builders() {
        let column = OutputColumn::new("MP", WidthSource::Fixed(4)).unwrap().hidden().with_modifiers(">", "d");
        assert!(!column.is_displayed());
        assert_eq!(column.row_spec(), ">4d");
        assert_eq!(column.header_spec(), "4");
    }
}
