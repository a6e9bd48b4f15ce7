//! Textual value utilities: string-to-type coercion and fallback-safe formatting
//!
//! Two independent components with deliberately different error policies:
//!
//! - **Coercion** ([`coerce`]) is strict. Empty input yields the target's
//!   default; anything else either converts or fails with a
//!   [`CoerceError`] carrying the input and target type.
//! - **Formatting** ([`format`]) offers a strict [`format_inline`] and a
//!   resilient [`format_safely`] that never fails, falling back to the raw
//!   template and then to the empty string.
//!
//! Templates use `std::fmt` placeholder syntax, interpreted at runtime.
//!
//! # Example
//!
//! ```rust
//! use textkit_core::{args, coerce, format_safely};
//!
//! let port: u16 = coerce(Some("8080")).unwrap();
//! let line = format_safely(Some("listening on {}:{}"), &args!["0.0.0.0", port]);
//! assert_eq!(line, "listening on 0.0.0.0:8080");
//!
//! // A template/argument mismatch degrades to the template itself
//! assert_eq!(format_safely(Some("{0} and {1}"), &args!["x"]), "{0} and {1}");
//! ```

#![warn(missing_docs)]

pub mod coerce;
pub mod error;
pub mod format;
pub mod text;
pub mod value;

pub use coerce::{coerce, coerce_str, global, ConverterRegistry, FromText, TypeDescriptor};
pub use error::{CoerceError, CoerceResult, FormatError, FormatResult, ParseFailure};
pub use format::{format_inline, format_safely, TemplateExt};
pub use value::Value;
