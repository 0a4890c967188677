//! CSV emission for scraped event contexts.
//!
//! The report starts with one blank line, then a header row, then one row
//! per event. Every row carries an empty leading column, and data columns
//! follow the requested field order exactly.

use std::io::Write;

use indexmap::IndexMap;

use crate::error::{DumpError, Result};

/// CSV writer for the scraped report.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    /// Field delimiter.
    delimiter: char,
    /// Quote character.
    quote_char: char,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvWriter {
    /// Create a writer with the standard comma/double-quote dialect.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: ',',
            quote_char: '"',
        }
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Escape a field value for CSV.
    fn escape_field(&self, value: &str) -> String {
        let needs_quoting = value.contains(self.delimiter)
            || value.contains(self.quote_char)
            || value.contains('\n')
            || value.contains('\r');

        if needs_quoting {
            let escaped = value.replace(
                self.quote_char,
                &format!("{}{}", self.quote_char, self.quote_char),
            );
            format!("{}{}{}", self.quote_char, escaped, self.quote_char)
        } else {
            value.to_string()
        }
    }

    /// Write one CSV row.
    fn write_row<W: Write>(&self, writer: &mut W, cells: &[&str]) -> Result<()> {
        let line: Vec<String> = cells.iter().map(|c| self.escape_field(c)).collect();
        writeln!(writer, "{}", line.join(&self.delimiter.to_string()))?;
        Ok(())
    }

    /// Write the full report: blank line, header, then one row per context.
    ///
    /// A context missing one of the requested fields fails the run rather
    /// than silently emitting a placeholder.
    pub fn write_report<W: Write>(
        &self,
        writer: &mut W,
        fields: &[String],
        rows: &[IndexMap<String, String>],
    ) -> Result<()> {
        writeln!(writer)?;

        let mut header: Vec<&str> = vec![""];
        header.extend(fields.iter().map(String::as_str));
        self.write_row(writer, &header)?;

        for (event, row) in rows.iter().enumerate() {
            let mut cells: Vec<&str> = vec![""];
            for field in fields {
                let value = row.get(field).ok_or_else(|| DumpError::MissingField {
                    field: field.clone(),
                    event,
                })?;
                cells.push(value.as_str());
            }
            self.write_row(writer, &cells)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn render(fields: &[&str], rows: &[IndexMap<String, String>]) -> Result<String> {
        let fields: Vec<String> = fields.iter().map(ToString::to_string).collect();
        let mut out = Vec::new();
        CsvWriter::new().write_report(&mut out, &fields, rows)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_blank_line_then_header_then_rows() {
        let rows = vec![
            row(&[("user_id", "42"), ("name", "foo")]),
            row(&[("name", "bar"), ("user_id", "7")]),
        ];
        let out = render(&["user_id", "name"], &rows).unwrap();

        assert_eq!(out, "\n,user_id,name\n,42,foo\n,7,bar\n");
    }

    #[test]
    fn test_header_alone_for_empty_rows() {
        let out = render(&["a", "b"], &[]).unwrap();
        assert_eq!(out, "\n,a,b\n");
    }

    #[test]
    fn test_values_follow_field_order_not_context_order() {
        let rows = vec![row(&[("b", "2"), ("a", "1")])];
        let out = render(&["a", "b"], &rows).unwrap();
        assert_eq!(out, "\n,a,b\n,1,2\n");
    }

    #[test]
    fn test_missing_field_fails_the_run() {
        let rows = vec![row(&[("a", "1")])];
        let err = render(&["a", "b"], &rows).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Event 0 is missing requested field 'b'"
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let fields = vec!["a".to_string(), "b".to_string()];
        let rows = vec![row(&[("a", "1"), ("b", "2")])];
        let mut out = Vec::new();
        CsvWriter::new()
            .with_delimiter('\t')
            .write_report(&mut out, &fields, &rows)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\n\ta\tb\n\t1\t2\n");
    }

    #[test]
    fn test_escape_field() {
        let writer = CsvWriter::new();

        assert_eq!(writer.escape_field("simple"), "simple");
        assert_eq!(writer.escape_field("with,comma"), "\"with,comma\"");
        assert_eq!(writer.escape_field("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(writer.escape_field("with\nnewline"), "\"with\nnewline\"");
    }
}
