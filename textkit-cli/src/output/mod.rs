//! Output formatting module

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use textkit_core::Value;

use crate::config::OutputFormat;

/// One result produced by a command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// Outcome of coercing one input
    Coercion {
        /// Raw input; `None` for the null input
        input: Option<String>,
        /// Requested type name
        #[serde(rename = "type")]
        type_name: String,
        /// Kind of the produced value
        kind: &'static str,
        /// Produced value
        value: Value,
    },
    /// Outcome of formatting a template
    Formatted {
        /// Template; `None` for the null template
        template: Option<String>,
        /// Rendered text
        output: String,
        /// Whether the strict formatter was used
        strict: bool,
    },
    /// A registered type name
    TypeName {
        /// Name as accepted on the command line
        name: String,
        /// Canonical name it resolves to
        target: String,
    },
    /// A supported format type
    Specifier {
        /// Placeholder example, such as `{:x}`
        specifier: String,
        /// What it does and which values accept it
        description: String,
    },
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a single record
    fn write_record(&mut self, record: &Record) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Build the formatter for the selected output format
pub fn create_formatter<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
    pretty_json: bool,
    yes_no: bool,
) -> Box<dyn OutputFormatter + 'w> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer).with_yes_no(yes_no)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
    }
}
