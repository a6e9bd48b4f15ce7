//! Coerce command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use textkit_core::global;

use super::RunContext;
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::Record;

/// Arguments for the coerce command
#[derive(Debug, Args)]
pub struct CoerceArgs {
    /// Target type name (see `textkit list types`)
    #[arg(short = 't', long = "type", value_name = "NAME")]
    pub type_name: String,

    /// Values to coerce; none means a single null input
    #[arg(value_name = "VALUE", allow_negative_numbers = true)]
    pub values: Vec<String>,

    /// Read one value per line from FILE (`-` for stdin)
    #[arg(short, long, value_name = "FILE", conflicts_with = "values")]
    pub input: Option<PathBuf>,

    /// Print booleans as Yes/No
    #[arg(long)]
    pub yes_no: bool,
}

impl CoerceArgs {
    /// Execute the coerce command
    pub fn execute(&self, ctx: &RunContext) -> Result<()> {
        let registry = global();
        if !registry.contains(&self.type_name) {
            return Err(CliError::CoercionFailed(format!(
                "unknown type '{}' (run `textkit list types`)",
                self.type_name
            ))
            .into());
        }

        let inputs = self.collect_inputs()?;
        log::info!("Coercing {} value(s) to {}", inputs.len(), self.type_name);

        let mut formatter = ctx.formatter(self.yes_no);
        for input in inputs {
            let value = registry
                .coerce_named(&self.type_name, input.as_deref())
                .map_err(|e| CliError::CoercionFailed(e.to_string()))?;
            log::debug!("{input:?} -> {value:?}");

            formatter.write_record(&Record::Coercion {
                input,
                type_name: self.type_name.clone(),
                kind: value.kind(),
                value,
            })?;
        }
        formatter.finish()
    }

    fn collect_inputs(&self) -> Result<Vec<Option<String>>> {
        if let Some(path) = &self.input {
            return Ok(FileReader::read_lines(path)?
                .into_iter()
                .map(Some)
                .collect());
        }
        if self.values.is_empty() {
            return Ok(vec![None]);
        }
        Ok(self.values.iter().cloned().map(Some).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(type_name: &str, values: &[&str]) -> CoerceArgs {
        CoerceArgs {
            type_name: type_name.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
            input: None,
            yes_no: false,
        }
    }

    #[test]
    fn test_no_values_is_one_null_input() {
        assert_eq!(args("i32", &[]).collect_inputs().unwrap(), vec![None]);
    }

    #[test]
    fn test_inputs_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("values.txt");
        fs::write(&path, "1\n\n3\n").unwrap();

        let mut coerce = args("i32", &[]);
        coerce.input = Some(path);
        assert_eq!(
            coerce.collect_inputs().unwrap(),
            vec![Some("1".to_string()), Some(String::new()), Some("3".to_string())]
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = args("nope", &["1"])
            .execute(&RunContext::default())
            .unwrap_err();
        assert!(err.to_string().contains("unknown type 'nope'"));
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_invalid_value_fails() {
        let err = args("i32", &["abc"])
            .execute(&RunContext::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("Coercion failed:"));
        assert!(err.to_string().contains("abc"));
    }
}
