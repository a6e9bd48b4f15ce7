//! JSON output formatter

use super::{OutputFormatter, Record};
use anyhow::Result;
use std::io::Write;

/// JSON formatter - outputs records as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<Record>,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            records: Vec::new(),
            pretty,
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.records)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use textkit_core::Value;

    fn render(records: &[Record]) -> serde_json::Value {
        let mut buf = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buf, false);
            for record in records {
                formatter.write_record(record).unwrap();
            }
            formatter.finish().unwrap();
        }
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn test_coercion_records_use_native_types() {
        let records = [
            Record::Coercion {
                input: Some("42".to_string()),
                type_name: "i32".to_string(),
                kind: "int",
                value: Value::Int(42),
            },
            Record::Coercion {
                input: None,
                type_name: "bool".to_string(),
                kind: "bool",
                value: Value::Bool(false),
            },
        ];
        assert_eq!(
            render(&records),
            json!([
                {"input": "42", "type": "i32", "kind": "int", "value": 42},
                {"input": null, "type": "bool", "kind": "bool", "value": false}
            ])
        );
    }

    #[test]
    fn test_structured_values_serialize_as_strings() {
        let records = [Record::Coercion {
            input: Some("00:01:00".to_string()),
            type_name: "duration".to_string(),
            kind: "duration",
            value: Value::Duration(std::time::Duration::from_secs(60)),
        }];
        assert_eq!(render(&records)[0]["value"], json!("00:01:00"));
    }

    #[test]
    fn test_formatted_record() {
        let records = [Record::Formatted {
            template: None,
            output: String::new(),
            strict: false,
        }];
        assert_eq!(
            render(&records),
            json!([{"template": null, "output": "", "strict": false}])
        );
    }

    #[test]
    fn test_empty_output_is_empty_array() {
        assert_eq!(render(&[]), json!([]));
    }
}
