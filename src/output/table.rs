//! Aligned console tables with an optional CSV mirror

use crate::output::{FormatSpec, OutputColumn, OutputError, OutputResult, Row, Value};
use std::fs::File;
use std::path::Path;

/// Separator printed between adjacent visible columns
const SEPARATOR: &str = "  ";

/// An ordered set of columns that prints rows to stdout and, when a CSV
/// path was given, mirrors every printed row into that file
///
/// The CSV sink is flushed and released by [`OutputTable::close`] or when
/// the table is dropped.
pub struct OutputTable {
    columns: Vec<(String, OutputColumn)>,
    csv_writer: Option<csv::Writer<File>>,
}

impl OutputTable {
    /// Creates a table from `(key, column)` pairs in display order
    ///
    /// Re-using a key replaces the earlier column in place. If `csv_path`
    /// is given the file is created (or truncated) and the header row of
    /// the visible columns is written immediately.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use wiki_crawler::output::{OutputColumn, OutputTable, WidthSource};
    /// use std::path::Path;
    ///
    /// let table = OutputTable::new(
    ///     vec![
    ///         ("spell", OutputColumn::new("Spell", WidthSource::samples(["Cocoon"])).unwrap()),
    ///         ("desc", OutputColumn::new("Description", WidthSource::Fixed(100)).unwrap()),
    ///     ],
    ///     Some(Path::new("blu_spells.csv")),
    /// )
    /// .unwrap();
    /// ```
    pub fn new<I, K>(columns: I, csv_path: Option<&Path>) -> OutputResult<Self>
    where
        I: IntoIterator<Item = (K, OutputColumn)>,
        K: Into<String>,
    {
        let mut ordered: Vec<(String, OutputColumn)> = Vec::new();
        for (key, column) in columns {
            let key = key.into();
            match ordered.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = column,
                None => ordered.push((key, column)),
            }
        }

        let csv_writer = match csv_path {
            Some(path) => {
                let mut writer = csv::Writer::from_path(path)?;
                writer.write_record(
                    ordered
                        .iter()
                        .filter(|(_, c)| c.is_displayed())
                        .map(|(_, c)| c.header()),
                )?;
                tracing::debug!("Opened CSV sink at {}", path.display());
                Some(writer)
            }
            None => None,
        };

        Ok(Self {
            columns: ordered,
            csv_writer,
        })
    }

    /// All columns in display order, hidden ones included
    pub fn columns(&self) -> &[(String, OutputColumn)] {
        &self.columns
    }

    fn visible_columns(&self) -> impl Iterator<Item = &(String, OutputColumn)> {
        self.columns.iter().filter(|(_, c)| c.is_displayed())
    }

    /// Returns true while a CSV sink is open
    pub fn has_csv_sink(&self) -> bool {
        self.csv_writer.is_some()
    }

    /// Flushes and releases the CSV sink, if any. Calling it again does nothing.
    pub fn close(&mut self) -> OutputResult<()> {
        if let Some(mut writer) = self.csv_writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Header template, e.g. `{spell:16}  {desc:100}`
    pub fn header_format(&self) -> String {
        self.visible_columns()
            .map(|(k, c)| format!("{{{}:{}}}", k, c.header_spec()))
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Row template including each column's modifiers, e.g. `{spell:16s}  {desc:100s}`
    pub fn row_format(&self) -> String {
        self.visible_columns()
            .map(|(k, c)| format!("{{{}:{}}}", k, c.row_spec()))
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Total printed width of a row: visible column widths plus the
    /// separators between them
    pub fn width(&self) -> usize {
        let count = self.visible_columns().count();
        let widths: usize = self.visible_columns().map(|(_, c)| c.width()).sum();

        widths + SEPARATOR.len() * count.saturating_sub(1)
    }

    /// A horizontal rule as wide as [`OutputTable::width`]
    pub fn format_line(&self) -> String {
        "-".repeat(self.width())
    }

    pub fn print_line(&self) {
        println!("{}", self.format_line());
    }

    /// Renders the header row
    pub fn format_header_row(&self) -> OutputResult<String> {
        let cells = self
            .visible_columns()
            .map(|(_, c)| {
                let spec: FormatSpec = c.header_spec().parse()?;
                spec.apply(&Value::from(c.header()))
            })
            .collect::<OutputResult<Vec<_>>>()?;

        Ok(cells.join(SEPARATOR))
    }

    /// Prints the header row, followed by a rule when `print_line` is set
    pub fn print_header_row(&self, print_line: bool) -> OutputResult<()> {
        println!("{}", self.format_header_row()?);
        if print_line {
            self.print_line();
        }
        Ok(())
    }

    /// Renders one row
    ///
    /// # Errors
    ///
    /// * `OutputError::MissingField` - the row has no value for a visible column
    /// * `OutputError::Format` - a column's modifiers do not fit its value
    pub fn format_row(&self, row: &Row) -> OutputResult<String> {
        let cells = self
            .visible_columns()
            .map(|(k, c)| {
                let value = row
                    .get(k)
                    .ok_or_else(|| OutputError::MissingField(k.clone()))?;
                let spec: FormatSpec = c.row_spec().parse()?;
                spec.apply(value)
            })
            .collect::<OutputResult<Vec<_>>>()?;

        Ok(cells.join(SEPARATOR))
    }

    /// Prints one row and appends it to the CSV sink, if open
    pub fn print_row(&mut self, row: &Row) -> OutputResult<()> {
        let line = self.format_row(row)?;
        println!("{}", line);

        if let Some(writer) = self.csv_writer.as_mut() {
            let record: Vec<String> = self
                .columns
                .iter()
                .filter(|(_, c)| c.is_displayed())
                .map(|(k, _)| row.get(k).map(|v| v.to_string()).unwrap_or_default())
                .collect();
            writer.write_record(&record)?;
        }

        Ok(())
    }

    /// Prints every row in order
    pub fn print_rows<'a, I>(&mut self, rows: I) -> OutputResult<()>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        for row in rows {
            self.print_row(row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::WidthSource;
    use tempfile::TempDir;

    fn column(header: &str, width: usize) -> OutputColumn {
        OutputColumn::new(header, WidthSource::Fixed(width)).unwrap()
    }

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn spell_table(csv_path: Option<&Path>) -> OutputTable {
        OutputTable::new(
            vec![
                ("spell", column("Spell", 10)),
                ("mp", column("MP", 4).hidden()),
                ("desc", column("Description", 20)),
            ],
            csv_path,
        )
        .unwrap()
    }

    #[test]
    fn test_formats_skip_hidden_columns() {
        let table = spell_table(None);
        assert_eq!(table.header_format(), "{spell:10}  {desc:20}");
        assert_eq!(table.row_format(), "{spell:10s}  {desc:20s}");
    }

    #[test]
    fn test_row_format_uses_modifiers() {
        let table = OutputTable::new(
            vec![("mp", column("MP", 4).with_modifiers(">", "d"))],
            None,
        )
        .unwrap();
        assert_eq!(table.row_format(), "{mp:>4d}");
    }

    #[test]
    fn test_width_counts_visible_columns() {
        let table = spell_table(None);
        assert_eq!(table.width(), 10 + 2 + 20);
        assert_eq!(table.format_line(), "-".repeat(32));
    }

    #[test]
    fn test_width_of_single_column() {
        let table = OutputTable::new(vec![("spell", column("Spell", 7))], None).unwrap();
        assert_eq!(table.width(), 7);
    }

    #[test]
    fn test_width_of_empty_table() {
        let table = OutputTable::new(Vec::<(String, OutputColumn)>::new(), None).unwrap();
        assert_eq!(table.width(), 0);
        assert_eq!(table.header_format(), "");
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let table = OutputTable::new(
            vec![
                ("a", column("A", 3)),
                ("b", column("B", 3)),
                ("a", column("A2", 5)),
            ],
            None,
        )
        .unwrap();
        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.header_format(), "{a:5}  {b:3}");
    }

    #[test]
    fn test_format_header_row() {
        let table = spell_table(None);
        assert_eq!(
            table.format_header_row().unwrap(),
            format!("{:<10}  {:<20}", "Spell", "Description")
        );
    }

    #[test]
    fn test_format_row() {
        let table = spell_table(None);
        let line = table
            .format_row(&row(&[
                ("spell", Value::from("Cocoon")),
                ("desc", Value::from("Enhances defense.")),
            ]))
            .unwrap();
        assert_eq!(line, "Cocoon      Enhances defense.   ");
    }

    #[test]
    fn test_missing_visible_field_fails() {
        let table = spell_table(None);
        let result = table.format_row(&row(&[("spell", Value::from("Cocoon"))]));
        assert!(matches!(result, Err(OutputError::MissingField(k)) if k == "desc"));
    }

    #[test]
    fn test_hidden_field_not_required() {
        let table = spell_table(None);
        let result = table.format_row(&row(&[
            ("spell", Value::from("Cocoon")),
            ("desc", Value::from("x")),
        ]));
        assert!(result.is_ok());
    }

    #[test]
    fn test_csv_mirror_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spells.csv");

        let mut table = spell_table(Some(path.as_path()));
        assert!(table.has_csv_sink());

        let rows = vec![
            row(&[
                ("spell", Value::from("Cocoon")),
                ("mp", Value::from(10)),
                ("desc", Value::from("Enhances defense.")),
            ]),
            row(&[
                ("spell", Value::from("Sandspin")),
                ("mp", Value::from(10)),
                ("desc", Value::from("Lowers accuracy, area")),
            ]),
        ];
        table.print_rows(&rows).unwrap();
        table.close().unwrap();
        assert!(!table.has_csv_sink());

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Spell,Description");
        assert_eq!(lines[1], "Cocoon,Enhances defense.");
        assert_eq!(lines[2], "Sandspin,\"Lowers accuracy, area\"");
    }

    #[test]
    fn test_csv_header_written_on_construction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        let table = spell_table(Some(path.as_path()));
        drop(table);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Spell,Description\n");
    }

    #[test]
    fn test_close_twice_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut table = spell_table(Some(dir.path().join("t.csv").as_path()));
        table.close().unwrap();
        table.close().unwrap();
    }

    #[test]
    fn test_failed_row_not_written_to_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.csv");

        let mut table = spell_table(Some(path.as_path()));
        let result = table.print_row(&row(&[("spell", Value::from("Cocoon"))]));
        assert!(result.is_err());
        table.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
