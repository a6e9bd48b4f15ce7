//! Template formatting, strict and resilient
//!
//! [`format_inline`] surfaces every template/argument mismatch as a
//! [`FormatError`]. [`format_safely`] runs the same substitution and, when it
//! fails, degrades in order: the unsubstituted template, then `""`.

pub mod template;

pub use template::{Align, FormatSpec, Placeholder, SpecKind, Template};

use crate::error::{FormatError, FormatResult};
use crate::value::Value;

/// Substitute `args` into `template`, failing on any mismatch
///
/// ```
/// use textkit_core::{args, format::format_inline};
///
/// assert_eq!(format_inline("{} of {}", &args![3, 5]).unwrap(), "3 of 5");
/// assert!(format_inline("{0} and {1}", &args!["x"]).is_err());
/// ```
pub fn format_inline(template: &str, args: &[Value]) -> FormatResult<String> {
    Template::parse(template)?.render(args)
}

/// Substitute `args` into `template`, never failing
///
/// Returns the substituted text when possible, otherwise the template
/// itself (empty when `None`), otherwise the empty string. A broken
/// template is returned verbatim, not partially substituted.
///
/// ```
/// use textkit_core::{args, format::format_safely};
///
/// assert_eq!(format_safely(Some("{} items"), &args![3]), "3 items");
/// assert_eq!(format_safely(Some("{0} and {1}"), &args!["x"]), "{0} and {1}");
/// assert_eq!(format_safely(None, &[]), "");
/// ```
pub fn format_safely(template: Option<&str>, args: &[Value]) -> String {
    substitute(template, args)
        .or_else(|err| {
            log::debug!("formatting failed, falling back to raw template: {err}");
            raw_template(template)
        })
        .unwrap_or_else(|err| {
            log::debug!("raw template unavailable, falling back to empty string: {err}");
            String::new()
        })
}

fn substitute(template: Option<&str>, args: &[Value]) -> FormatResult<String> {
    let template = template.ok_or(FormatError::MissingTemplate)?;
    format_inline(template, args)
}

fn raw_template(template: Option<&str>) -> FormatResult<String> {
    Ok(template.unwrap_or_default().to_string())
}

/// Method-call sugar for the two formatters
pub trait TemplateExt {
    /// See [`format_inline`]
    fn format_inline(&self, args: &[Value]) -> FormatResult<String>;

    /// See [`format_safely`]
    fn format_safely(&self, args: &[Value]) -> String;
}

impl TemplateExt for str {
    fn format_inline(&self, args: &[Value]) -> FormatResult<String> {
        format_inline(self, args)
    }

    fn format_safely(&self, args: &[Value]) -> String {
        format_safely(Some(self), args)
    }
}

impl TemplateExt for Option<&str> {
    fn format_inline(&self, args: &[Value]) -> FormatResult<String> {
        substitute(*self, args)
    }

    fn format_safely(&self, args: &[Value]) -> String {
        format_safely(*self, args)
    }
}
