//! Format command implementation

use anyhow::Result;
use clap::Args;
use textkit_core::{format_inline, format_safely, global, ConverterRegistry, Value};

use super::RunContext;
use crate::error::CliError;
use crate::output::Record;

/// Arguments for the format command
#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Template with `{}`, `{N}` and `{:spec}` placeholders
    pub template: String,

    /// Template arguments; `TYPE:VALUE` coerces VALUE to a registered TYPE
    #[arg(value_name = "ARG", allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// Fail on template/argument mismatches instead of falling back
    #[arg(short, long)]
    pub strict: bool,
}

impl FormatArgs {
    /// Execute the format command
    pub fn execute(&self, ctx: &RunContext) -> Result<()> {
        let registry = global();
        let values = self
            .args
            .iter()
            .map(|raw| parse_arg(registry, raw))
            .collect::<Result<Vec<_>>>()?;

        let template = self.template(&ctx.config.format.null_template_marker);
        let strict = self.strict || ctx.config.format.strict;
        log::debug!("template={template:?} args={values:?} strict={strict}");

        let output = if strict {
            let template =
                template.ok_or_else(|| CliError::FormatFailed("no template given".to_string()))?;
            format_inline(template, &values).map_err(|e| CliError::FormatFailed(e.to_string()))?
        } else {
            format_safely(template, &values)
        };

        let mut formatter = ctx.formatter(false);
        formatter.write_record(&Record::Formatted {
            template: template.map(str::to_string),
            output,
            strict,
        })?;
        formatter.finish()
    }

    fn template<'a>(&'a self, null_marker: &str) -> Option<&'a str> {
        (self.template != null_marker).then_some(self.template.as_str())
    }
}

/// Interpret one command-line argument
///
/// `TYPE:VALUE` is coerced when TYPE is a registered name; any other text,
/// including text with an unregistered prefix, is passed through as a string.
fn parse_arg(registry: &ConverterRegistry, raw: &str) -> Result<Value> {
    match raw.split_once(':') {
        Some((name, text)) if registry.contains(name) => registry
            .coerce_named(name, Some(text))
            .map_err(|e| CliError::CoercionFailed(e.to_string()).into()),
        _ => Ok(Value::from(raw)),
    }
}
