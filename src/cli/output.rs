// Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use serde_json::Value;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON
    Json,
    /// Key-value pairs
    KeyValue,
    /// Table format
    Table,
}

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output one record, or each record of an array for the text layouts
    pub fn output(&self, value: &Value, writer: &mut impl Write) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => writeln!(writer, "{}", serde_json::to_string_pretty(value)?)?,
            OutputFormat::Json => writeln!(writer, "{}", serde_json::to_string(value)?)?,
            OutputFormat::KeyValue | OutputFormat::Table => match value {
                Value::Array(items) => {
                    for item in items {
                        self.output_record(item, writer)?;
                        writeln!(writer)?;
                    }
                }
                other => self.output_record(other, writer)?,
            },
        }
        Ok(())
    }

    fn output_record(&self, value: &Value, writer: &mut impl Write) -> Result<()> {
        if self.format == OutputFormat::Table {
            self.output_table(value, writer)
        } else {
            self.output_key_value(value, writer)
        }
    }

    /// Output as key-value pairs
    fn output_key_value(&self, value: &Value, writer: &mut impl Write) -> Result<()> {
        if let Some(obj) = value.as_object() {
            let mut items: Vec<_> = obj.iter().collect();
            items.sort_by(|a, b| a.0.cmp(b.0));

            for (key, value) in items {
                writeln!(writer, "{}: {}", key, format_value(value))?;
            }
        }
        Ok(())
    }

    /// Output as table
    fn output_table(&self, value: &Value, writer: &mut impl Write) -> Result<()> {
        if let Some(obj) = value.as_object() {
            let max_key_len = obj.keys().map(|k| k.len()).max().unwrap_or(0);

            writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;

            for (key, value) in obj {
                writeln!(
                    writer,
                    "{:<width$} {}",
                    format!("{}:", key),
                    format_value(value),
                    width = max_key_len + 2
                )?;
            }

            writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        }
        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }
}

/// Format a JSON value for a single text line
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(null)".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(arr) => {
            if arr.is_empty() {
                "[]".to_string()
            } else {
                format!("[{} items]", arr.len())
            }
        }
        Value::Object(obj) => {
            let mut fields: Vec<_> = obj
                .iter()
                .filter(|(key, _)| key.as_str() != "data")
                .map(|(key, value)| format!("{}={}", key, format_value(value)))
                .collect();
            fields.sort();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(format: OutputFormat, value: &Value) -> String {
        let mut out = Vec::new();
        OutputFormatter::new(format, true).output(value, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_key_value() {
        let value = json!({"title": "Song", "year": 1999, "cover": null});
        assert_eq!(
            render(OutputFormat::KeyValue, &value),
            "cover: (null)\ntitle: Song\nyear: 1999\n"
        );
    }

    #[test]
    fn test_compact_json() {
        let value = json!({"title": "Song"});
        assert_eq!(render(OutputFormat::Json, &value), "{\"title\":\"Song\"}\n");
    }

    #[test]
    fn test_arrays_print_each_record() {
        let value = json!([{"title": "A"}, {"title": "B"}]);
        assert_eq!(render(OutputFormat::KeyValue, &value), "title: A\n\ntitle: B\n\n");
    }

    #[test]
    fn test_nested_object_skips_data() {
        let value = json!({"mime_type": "image/png", "data": "AAAA", "size": 3});
        assert_eq!(format_value(&value), "{mime_type=image/png, size=3}");
    }
}
