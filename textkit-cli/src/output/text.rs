//! Plain text output formatter

use super::{OutputFormatter, Record};
use anyhow::Result;
use std::io::Write;
use textkit_core::{text::yes_no, Value};

/// Plain text formatter - outputs one record per line
pub struct TextFormatter<W: Write> {
    writer: W,
    yes_no: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            yes_no: false,
        }
    }

    /// Render booleans as "Yes"/"No"
    pub fn with_yes_no(mut self, yes_no: bool) -> Self {
        self.yes_no = yes_no;
        self
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        match record {
            Record::Coercion {
                value: Value::Bool(b),
                ..
            } if self.yes_no => writeln!(self.writer, "{}", yes_no(*b))?,
            Record::Coercion { value, .. } => writeln!(self.writer, "{value}")?,
            Record::Formatted { output, .. } => writeln!(self.writer, "{output}")?,
            Record::TypeName { name, target } if name == target => {
                writeln!(self.writer, "{name}")?
            }
            Record::TypeName { name, target } => writeln!(self.writer, "{name} -> {target}")?,
            Record::Specifier {
                specifier,
                description,
            } => writeln!(self.writer, "{specifier:<8} {description}")?,
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(records: &[Record], yes_no: bool) -> String {
        let mut buf = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut buf).with_yes_no(yes_no);
            for record in records {
                formatter.write_record(record).unwrap();
            }
            formatter.finish().unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    fn coercion(value: Value) -> Record {
        Record::Coercion {
            input: Some("x".to_string()),
            type_name: "bool".to_string(),
            kind: value.kind(),
            value,
        }
    }

    #[test]
    fn test_values_one_per_line() {
        let out = render(&[coercion(Value::Int(4)), coercion(Value::Null)], false);
        assert_eq!(out, "4\n\n");
    }

    #[test]
    fn test_yes_no_booleans() {
        let records = [coercion(Value::Bool(true)), coercion(Value::Bool(false))];
        assert_eq!(render(&records, true), "Yes\nNo\n");
        assert_eq!(render(&records, false), "true\nfalse\n");
    }

    #[test]
    fn test_type_names() {
        let records = [
            Record::TypeName {
                name: "i32".to_string(),
                target: "i32".to_string(),
            },
            Record::TypeName {
                name: "int".to_string(),
                target: "i32".to_string(),
            },
        ];
        assert_eq!(render(&records, false), "i32\nint -> i32\n");
    }
}
