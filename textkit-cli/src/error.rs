//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Configuration error
    ConfigError(String),
    /// A value could not be coerced
    CoercionFailed(String),
    /// A template could not be formatted in strict mode
    FormatFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::CoercionFailed(msg) => write!(f, "Coercion failed: {msg}"),
            CliError::FormatFailed(msg) => write!(f, "Formatting failed: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("values.txt".to_string());
        assert_eq!(error.to_string(), "File not found: values.txt");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_coercion_failed_display() {
        let error = CliError::CoercionFailed("cannot convert 'x' to i32".to_string());
        assert_eq!(error.to_string(), "Coercion failed: cannot convert 'x' to i32");
    }

    #[test]
    fn test_format_failed_display() {
        let error = CliError::FormatFailed("unmatched '}'".to_string());
        assert!(error.to_string().starts_with("Formatting failed:"));
    }

    #[test]
    fn test_converts_into_anyhow() {
        let failure: CliResult<()> = Err(CliError::ConfigError("bad".to_string()).into());
        let err = failure.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert!(err.to_string().contains("bad"));
    }
}
