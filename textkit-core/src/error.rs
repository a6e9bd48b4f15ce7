//! Error types for coercion and template formatting

use thiserror::Error;

/// Failure reported by a single converter while parsing text.
///
/// Converters only know *why* the text was rejected; the coercion layer
/// attaches the input and the target type when it lifts this into a
/// [`CoerceError::Conversion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    reason: String,
}

impl ParseFailure {
    /// Create a failure with a human-readable reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The reason the converter rejected its input
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Attach the original input and the target type name
    pub fn into_conversion_error(self, input: &str, target_type: impl Into<String>) -> CoerceError {
        CoerceError::Conversion {
            input: input.to_string(),
            target_type: target_type.into(),
            reason: self.reason,
        }
    }
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Errors raised by the coercion engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    /// The text was non-empty but the converter rejected it
    #[error("cannot convert '{input}' to {target_type}: {reason}")]
    Conversion {
        /// The original text
        input: String,
        /// Name of the requested type
        target_type: String,
        /// Converter-specific reason
        reason: String,
    },

    /// No converter is registered for the requested type
    #[error("no converter registered for type '{target_type}'")]
    NoConverterFound {
        /// Name of the requested type
        target_type: String,
    },
}

impl CoerceError {
    /// Name of the type the caller asked for
    pub fn target_type(&self) -> &str {
        match self {
            CoerceError::Conversion { target_type, .. }
            | CoerceError::NoConverterFound { target_type } => target_type,
        }
    }
}

/// Errors raised while parsing or rendering a format template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No template was supplied
    #[error("template is missing")]
    MissingTemplate,

    /// A placeholder refers past the end of the argument list
    #[error("placeholder index {index} out of range: {count} argument(s) supplied")]
    IndexOutOfRange {
        /// Zero-based argument index requested by the template
        index: usize,
        /// Number of arguments actually supplied
        count: usize,
    },

    /// The template text itself is not well formed
    #[error("malformed template at byte {position}: {reason}")]
    Malformed {
        /// Byte offset into the template
        position: usize,
        /// What went wrong
        reason: String,
    },

    /// Placeholder syntax that is valid for `format!` but cannot be resolved at runtime
    #[error("unsupported placeholder '{placeholder}'")]
    UnsupportedPlaceholder {
        /// The placeholder body as written
        placeholder: String,
    },

    /// The format specifier does not apply to the argument's kind
    #[error("format specifier '{spec}' cannot be applied to {kind} argument {index}")]
    UnsupportedArgument {
        /// Zero-based argument index
        index: usize,
        /// Kind of the argument (see [`crate::Value::kind`])
        kind: &'static str,
        /// The specifier as written
        spec: String,
    },
}

/// Result type for coercion
pub type CoerceResult<T> = std::result::Result<T, CoerceError>;

/// Result type for template formatting
pub type FormatResult<T> = std::result::Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_display() {
        let err = ParseFailure::new("invalid digit found in string")
            .into_conversion_error("abc", "i32");
        assert_eq!(
            err.to_string(),
            "cannot convert 'abc' to i32: invalid digit found in string"
        );
        assert_eq!(err.target_type(), "i32");
    }

    #[test]
    fn test_no_converter_display() {
        let err = CoerceError::NoConverterFound {
            target_type: "widget".to_string(),
        };
        assert_eq!(err.to_string(), "no converter registered for type 'widget'");
        assert_eq!(err.target_type(), "widget");
    }

    #[test]
    fn test_format_error_display() {
        let err = FormatError::IndexOutOfRange { index: 1, count: 1 };
        assert_eq!(
            err.to_string(),
            "placeholder index 1 out of range: 1 argument(s) supplied"
        );

        let err = FormatError::UnsupportedArgument {
            index: 0,
            kind: "string",
            spec: "x".to_string(),
        };
        assert!(err.to_string().contains("string argument 0"));
    }
}
