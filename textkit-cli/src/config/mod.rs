//! Configuration module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Template formatting configuration
    #[serde(default)]
    pub format: FormatConfig,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.message().to_string()).into())
    }

    /// Documented TOML rendering of this configuration
    pub fn to_documented_toml(&self) -> String {
        format!(
            r#"# textkit configuration

[output]
# Output format: "text" or "json"
format = "{format}"
# Pretty-print JSON output
pretty_json = {pretty}

[format]
# Fail instead of falling back to the raw template when formatting fails
strict = {strict}
# A template argument equal to this string is treated as a missing template
null_template_marker = {marker}
"#,
            format = self.output.format.as_str(),
            pretty = self.output.pretty_json,
            strict = self.format.strict,
            marker = toml::Value::String(self.format.null_template_marker.clone()),
        )
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One result per line
    #[default]
    Text,
    /// JSON array of result records
    Json,
}

impl OutputFormat {
    /// Name as used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty_json: true,
        }
    }
}

/// Formatting-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FormatConfig {
    /// Use the strict formatter by default
    pub strict: bool,

    /// Template text that stands for "no template"
    pub null_template_marker: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            strict: false,
            null_template_marker: "<null>".to_string(),
        }
    }
}
