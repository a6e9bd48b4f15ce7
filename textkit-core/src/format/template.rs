//! Runtime interpretation of `std::fmt` placeholder syntax
//!
//! Supports `{}`, `{N}`, `{{`/`}}` escapes and the format spec
//! `[[fill]align][sign]['#']['0'][width]['.' precision][type]` with
//! `type` one of `?`, `x`, `X`, `o`, `b`, `e`, `E` or empty.
//! Named arguments and `$`/`*` width or precision references need
//! compile-time context and are rejected.

use crate::error::{FormatError, FormatResult};
use crate::value::Value;
use std::borrow::Cow;
use std::fmt::{LowerExp, UpperExp};
use std::ops::Range;

/// Text alignment inside a padded field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `<`
    Left,
    /// `^`
    Center,
    /// `>`
    Right,
}

/// Presentation type of a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecKind {
    /// No type character
    #[default]
    Display,
    /// `?`
    Debug,
    /// `x`
    LowerHex,
    /// `X`
    UpperHex,
    /// `o`
    Octal,
    /// `b`
    Binary,
    /// `e`
    LowerExp,
    /// `E`
    UpperExp,
}

impl SpecKind {
    fn from_type(ty: &str) -> Option<Self> {
        Some(match ty {
            "" => SpecKind::Display,
            "?" => SpecKind::Debug,
            "x" => SpecKind::LowerHex,
            "X" => SpecKind::UpperHex,
            "o" => SpecKind::Octal,
            "b" => SpecKind::Binary,
            "e" => SpecKind::LowerExp,
            "E" => SpecKind::UpperExp,
            _ => return None,
        })
    }

    /// Type character as written in a template
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecKind::Display => "",
            SpecKind::Debug => "?",
            SpecKind::LowerHex => "x",
            SpecKind::UpperHex => "X",
            SpecKind::Octal => "o",
            SpecKind::Binary => "b",
            SpecKind::LowerExp => "e",
            SpecKind::UpperExp => "E",
        }
    }

    /// All supported kinds with a short description
    pub fn catalog() -> &'static [(SpecKind, &'static str)] {
        &[
            (SpecKind::Display, "default rendering; any value"),
            (SpecKind::Debug, "debug rendering (quoted strings and chars); any value"),
            (SpecKind::LowerHex, "lowercase hexadecimal; integers"),
            (SpecKind::UpperHex, "uppercase hexadecimal; integers"),
            (SpecKind::Octal, "octal; integers"),
            (SpecKind::Binary, "binary; integers"),
            (SpecKind::LowerExp, "scientific notation, lowercase e; numbers"),
            (SpecKind::UpperExp, "scientific notation, uppercase E; numbers"),
        ]
    }
}

/// Parsed format spec of one placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    fill: char,
    align: Option<Align>,
    plus: bool,
    alternate: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
    kind: SpecKind,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            plus: false,
            alternate: false,
            zero: false,
            width: None,
            precision: None,
            kind: SpecKind::Display,
        }
    }
}

impl FormatSpec {
    /// Parse the text after `:` in a placeholder
    fn parse(spec: &str, position: usize) -> FormatResult<Self> {
        let chars: Vec<char> = spec.chars().collect();
        let mut out = FormatSpec::default();
        let mut i = 0;

        if chars.len() >= 2 {
            if let Some(align) = align_of(chars[1]) {
                out.fill = chars[0];
                out.align = Some(align);
                i = 2;
            }
        }
        if out.align.is_none() {
            if let Some(align) = chars.first().copied().and_then(align_of) {
                out.align = Some(align);
                i = 1;
            }
        }

        match chars.get(i) {
            Some('+') => {
                out.plus = true;
                i += 1;
            }
            Some('-') => i += 1,
            _ => {}
        }
        if chars.get(i) == Some(&'#') {
            out.alternate = true;
            i += 1;
        }
        if chars.get(i) == Some(&'0') && chars.get(i + 1) != Some(&'$') {
            out.zero = true;
            i += 1;
        }

        let (width, next) = take_count(&chars, i, spec)?;
        out.width = width;
        i = next;

        if chars.get(i) == Some(&'.') {
            i += 1;
            if chars.get(i) == Some(&'*') {
                return Err(unsupported(spec));
            }
            let (precision, next) = take_count(&chars, i, spec)?;
            if precision.is_none() {
                return Err(FormatError::Malformed {
                    position,
                    reason: format!("missing precision in '{spec}'"),
                });
            }
            out.precision = precision;
            i = next;
        }

        let ty: String = chars[i..].iter().collect();
        out.kind = SpecKind::from_type(&ty).ok_or_else(|| {
            let reference = ty.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '?');
            if ty.ends_with('$') || reference {
                unsupported(spec)
            } else {
                FormatError::Malformed {
                    position,
                    reason: format!("unknown format type '{ty}'"),
                }
            }
        })?;

        Ok(out)
    }

    /// Presentation type
    pub fn kind(&self) -> SpecKind {
        self.kind
    }

    /// Minimum field width
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Precision
    pub fn precision(&self) -> Option<usize> {
        self.precision
    }
}

fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '^' => Some(Align::Center),
        '>' => Some(Align::Right),
        _ => None,
    }
}

fn unsupported(spec: &str) -> FormatError {
    FormatError::UnsupportedPlaceholder {
        placeholder: spec.to_string(),
    }
}

/// Read a run of digits starting at `i`; a trailing `$` marks a runtime
/// argument reference, which is unsupported.
fn take_count(chars: &[char], mut i: usize, spec: &str) -> FormatResult<(Option<usize>, usize)> {
    let start = i;
    while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
        i += 1;
    }
    if chars.get(i) == Some(&'$') {
        return Err(unsupported(spec));
    }
    if i == start {
        return Ok((None, i));
    }
    let digits: String = chars[start..i].iter().collect();
    let count: u16 = digits.parse().map_err(|_| FormatError::Malformed {
        position: start,
        reason: format!("count '{digits}' exceeds {}", u16::MAX),
    })?;
    Ok((Some(usize::from(count)), i))
}

/// One replacement field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    index: usize,
    spec: FormatSpec,
    raw_spec: String,
}

impl Placeholder {
    /// Zero-based argument index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Parsed spec
    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(Cow<'a, str>),
    Field(Placeholder),
}

/// A parsed template, ready to render against arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    /// Parse a template
    pub fn parse(source: &'a str) -> FormatResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut literal_start = 0;
        let mut borrowed = true;
        let mut next_implicit = 0;
        let bytes = source.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' if bytes.get(i + 1) == Some(&b'{') => {
                    if borrowed {
                        literal.push_str(&source[literal_start..i]);
                        borrowed = false;
                    }
                    literal.push('{');
                    i += 2;
                }
                b'}' if bytes.get(i + 1) == Some(&b'}') => {
                    if borrowed {
                        literal.push_str(&source[literal_start..i]);
                        borrowed = false;
                    }
                    literal.push('}');
                    i += 2;
                }
                b'}' => {
                    return Err(FormatError::Malformed {
                        position: i,
                        reason: "unmatched '}'".to_string(),
                    });
                }
                b'{' => {
                    flush_literal(&mut segments, source, &mut literal, literal_start..i, borrowed);
                    let close = source[i + 1..]
                        .find(['{', '}'])
                        .map(|offset| i + 1 + offset)
                        .filter(|&end| bytes[end] == b'}')
                        .ok_or_else(|| FormatError::Malformed {
                            position: i,
                            reason: "unterminated placeholder".to_string(),
                        })?;
                    let field = parse_field(&source[i + 1..close], i, &mut next_implicit)?;
                    segments.push(Segment::Field(field));
                    i = close + 1;
                    literal_start = i;
                    borrowed = true;
                }
                _ => {
                    if !borrowed {
                        // Copy the whole UTF-8 sequence once we are building an owned literal
                        let ch_len = source[i..].chars().next().map_or(1, char::len_utf8);
                        literal.push_str(&source[i..i + ch_len]);
                        i += ch_len;
                        continue;
                    }
                    i += 1;
                }
            }
        }
        flush_literal(
            &mut segments,
            source,
            &mut literal,
            literal_start..bytes.len(),
            borrowed,
        );

        Ok(Self { segments })
    }

    /// Placeholders in template order
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(field) => Some(field),
            Segment::Literal(_) => None,
        })
    }

    /// Number of arguments the template needs (highest index + 1)
    pub fn required_args(&self) -> usize {
        self.placeholders().map(|p| p.index + 1).max().unwrap_or(0)
    }

    /// Substitute `args` into the template
    pub fn render(&self, args: &[Value]) -> FormatResult<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => {
                    let value = args.get(field.index).ok_or(FormatError::IndexOutOfRange {
                        index: field.index,
                        count: args.len(),
                    })?;
                    out.push_str(&render_value(value, field)?);
                }
            }
        }
        Ok(out)
    }
}

/// Push the pending literal: a slice of `source` while no escape has been
/// seen, otherwise the owned buffer
fn flush_literal<'a>(
    segments: &mut Vec<Segment<'a>>,
    source: &'a str,
    literal: &mut String,
    range: Range<usize>,
    borrowed: bool,
) {
    if borrowed {
        if !range.is_empty() {
            segments.push(Segment::Literal(Cow::Borrowed(&source[range])));
        }
    } else if !literal.is_empty() {
        segments.push(Segment::Literal(Cow::Owned(std::mem::take(literal))));
    }
}

fn parse_field(
    body: &str,
    position: usize,
    next_implicit: &mut usize,
) -> FormatResult<Placeholder> {
    let (arg, spec) = match body.split_once(':') {
        Some((arg, spec)) => (arg, spec),
        None => (body, ""),
    };

    let index = if arg.is_empty() {
        let index = *next_implicit;
        *next_implicit += 1;
        index
    } else if arg.bytes().all(|b| b.is_ascii_digit()) {
        arg.parse().map_err(|_| FormatError::Malformed {
            position,
            reason: format!("argument index '{arg}' is too large"),
        })?
    } else if arg.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(FormatError::UnsupportedPlaceholder {
            placeholder: body.to_string(),
        });
    } else {
        return Err(FormatError::Malformed {
            position,
            reason: format!("invalid argument reference '{arg}'"),
        });
    };

    Ok(Placeholder {
        index,
        spec: FormatSpec::parse(spec, position)?,
        raw_spec: spec.to_string(),
    })
}

fn render_value(value: &Value, field: &Placeholder) -> FormatResult<String> {
    let spec = &field.spec;
    let reject = || FormatError::UnsupportedArgument {
        index: field.index,
        kind: value.kind(),
        spec: field.raw_spec.clone(),
    };

    let radix_kind = matches!(
        spec.kind,
        SpecKind::LowerHex | SpecKind::UpperHex | SpecKind::Octal | SpecKind::Binary
    );
    let exp_kind = matches!(spec.kind, SpecKind::LowerExp | SpecKind::UpperExp);
    let debug = spec.kind == SpecKind::Debug;

    let (negative, prefix, body): (bool, &str, String) = match value {
        // Signed integers print as 64-bit two's complement
        Value::Int(n) if radix_kind => (false, radix_prefix(spec), radix(spec.kind, *n as u64)),
        Value::UInt(n) if radix_kind => (false, radix_prefix(spec), radix(spec.kind, *n)),
        _ if radix_kind => return Err(reject()),
        Value::Int(n) if exp_kind => (*n < 0, "", exponent(spec, n.unsigned_abs())),
        Value::UInt(n) if exp_kind => (false, "", exponent(spec, *n)),
        Value::Float(x) if exp_kind => (is_negative(*x), "", exponent(spec, x.abs())),
        _ if exp_kind => return Err(reject()),
        Value::Int(n) => (*n < 0, "", n.unsigned_abs().to_string()),
        Value::UInt(n) => (false, "", n.to_string()),
        Value::Float(x) => {
            let magnitude = x.abs();
            let body = match spec.precision {
                Some(p) => format!("{magnitude:.p$}"),
                None if debug => format!("{magnitude:?}"),
                None => format!("{magnitude}"),
            };
            (is_negative(*x), "", body)
        }
        Value::Str(s) if debug => (false, "", format!("{s:?}")),
        Value::Char(c) if debug => (false, "", format!("{c:?}")),
        Value::Null if debug => (false, "", "null".to_string()),
        Value::Str(s) => (false, "", truncate(s, spec.precision)),
        other => (false, "", other.to_string()),
    };

    let numeric = value.is_numeric();
    let nan = matches!(value, Value::Float(x) if x.is_nan());
    let sign = if negative {
        "-"
    } else if spec.plus && numeric && !nan {
        "+"
    } else {
        ""
    };

    Ok(pad(spec, numeric, sign, prefix, &body))
}

fn is_negative(x: f64) -> bool {
    x.is_sign_negative() && !x.is_nan()
}

fn radix(kind: SpecKind, n: u64) -> String {
    match kind {
        SpecKind::LowerHex => format!("{n:x}"),
        SpecKind::UpperHex => format!("{n:X}"),
        SpecKind::Octal => format!("{n:o}"),
        _ => format!("{n:b}"),
    }
}

fn radix_prefix(spec: &FormatSpec) -> &'static str {
    if !spec.alternate {
        return "";
    }
    match spec.kind {
        SpecKind::LowerHex | SpecKind::UpperHex => "0x",
        SpecKind::Octal => "0o",
        _ => "0b",
    }
}

fn exponent<T: LowerExp + UpperExp>(spec: &FormatSpec, magnitude: T) -> String {
    match (spec.kind, spec.precision) {
        (SpecKind::UpperExp, Some(p)) => format!("{magnitude:.p$E}"),
        (SpecKind::UpperExp, None) => format!("{magnitude:E}"),
        (_, Some(p)) => format!("{magnitude:.p$e}"),
        (_, None) => format!("{magnitude:e}"),
    }
}

fn truncate(s: &str, precision: Option<usize>) -> String {
    match precision {
        Some(p) => s.chars().take(p).collect(),
        None => s.to_string(),
    }
}

fn pad(spec: &FormatSpec, numeric: bool, sign: &str, prefix: &str, body: &str) -> String {
    let len = sign.chars().count() + prefix.chars().count() + body.chars().count();
    let width = spec.width.unwrap_or(0);
    if len >= width {
        return format!("{sign}{prefix}{body}");
    }
    let gap = width - len;

    if spec.zero && numeric {
        return format!("{sign}{prefix}{}{body}", "0".repeat(gap));
    }

    let align = spec
        .align
        .unwrap_or(if numeric { Align::Right } else { Align::Left });
    let (before, after) = match align {
        Align::Left => (0, gap),
        Align::Right => (gap, 0),
        Align::Center => (gap / 2, gap - gap / 2),
    };
    let fill = spec.fill.to_string();
    format!(
        "{}{sign}{prefix}{body}{}",
        fill.repeat(before),
        fill.repeat(after)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn render(template: &str, args: &[Value]) -> FormatResult<String> {
        Template::parse(template)?.render(args)
    }

    #[test]
    fn test_literal_only_borrows() {
        let t = Template::parse("plain text").unwrap();
        assert_eq!(t.required_args(), 0);
        assert_eq!(t.render(&[]).unwrap(), "plain text");
        assert!(matches!(t.segments[0], Segment::Literal(Cow::Borrowed(_))));
    }

    #[test]
    fn test_escapes() {
        assert_eq!(render("{{}} {{0}}", &[]).unwrap(), "{} {0}");
        assert_eq!(render("a {{{}}} b", &args!["x"]).unwrap(), "a {x} b");
    }

    #[test]
    fn test_implicit_and_explicit_indices() {
        assert_eq!(render("{} {} {0}", &args!["a", "b"]).unwrap(), "a b a");
        assert_eq!(render("{1}-{0}", &args![1, 2]).unwrap(), "2-1");
        let t = Template::parse("{2} {}").unwrap();
        assert_eq!(t.required_args(), 3);
    }

    #[test]
    fn test_multibyte_literals() {
        assert_eq!(render("日本{{語}}: {}", &args!["ok"]).unwrap(), "日本{語}: ok");
    }

    #[test]
    fn test_index_out_of_range() {
        assert_eq!(
            render("{0} and {1}", &args!["x"]),
            Err(FormatError::IndexOutOfRange { index: 1, count: 1 })
        );
        assert!(matches!(
            render("{}", &[]),
            Err(FormatError::IndexOutOfRange { index: 0, count: 0 })
        ));
    }

    #[test]
    fn test_malformed_templates() {
        assert!(matches!(render("oops }", &[]), Err(FormatError::Malformed { position: 5, .. })));
        assert!(matches!(render("{0", &args![1]), Err(FormatError::Malformed { .. })));
        assert!(matches!(render("{0{1}}", &args![1]), Err(FormatError::Malformed { .. })));
        assert!(matches!(render("{-1}", &args![1]), Err(FormatError::Malformed { .. })));
        assert!(matches!(render("{:!}", &args![1]), Err(FormatError::Malformed { .. })));
    }

    #[test]
    fn test_oversized_width_rejected() {
        assert!(matches!(
            render("{:99999999}", &args![1]),
            Err(FormatError::Malformed { .. })
        ));
    }

    #[test]
    fn test_named_and_dollar_unsupported() {
        assert!(matches!(
            render("{name}", &args![1]),
            Err(FormatError::UnsupportedPlaceholder { .. })
        ));
        assert!(matches!(
            render("{:1$}", &args![1, 5]),
            Err(FormatError::UnsupportedPlaceholder { .. })
        ));
        assert!(matches!(
            render("{:.*}", &args![2, 1.5]),
            Err(FormatError::UnsupportedPlaceholder { .. })
        ));
    }

    #[test]
    fn test_width_and_alignment_match_std() {
        assert_eq!(render("[{:5}]", &args![42]).unwrap(), format!("[{:5}]", 42));
        assert_eq!(render("[{:5}]", &args!["ab"]).unwrap(), format!("[{:5}]", "ab"));
        assert_eq!(render("[{:>5}]", &args!["ab"]).unwrap(), format!("[{:>5}]", "ab"));
        assert_eq!(render("[{:*^7}]", &args!["ab"]).unwrap(), format!("[{:*^7}]", "ab"));
        assert_eq!(render("[{:<4}]", &args![7]).unwrap(), format!("[{:<4}]", 7));
    }

    #[test]
    fn test_numeric_flags_match_std() {
        assert_eq!(render("{:+}", &args![5]).unwrap(), format!("{:+}", 5));
        assert_eq!(render("{:05}", &args![-42]).unwrap(), format!("{:05}", -42));
        assert_eq!(render("{:+08.2}", &args![3.14159]).unwrap(), format!("{:+08.2}", 3.14159));
        assert_eq!(render("{:.3}", &args![2.0]).unwrap(), format!("{:.3}", 2.0));
        assert_eq!(render("{:#x}", &args![255]).unwrap(), format!("{:#x}", 255));
        assert_eq!(render("{:#010b}", &args![5u8]).unwrap(), format!("{:#010b}", 5u8));
        assert_eq!(render("{:X}", &args![-1i64]).unwrap(), format!("{:X}", -1i64));
        assert_eq!(render("{:o}", &args![8u32]).unwrap(), format!("{:o}", 8u32));
        assert_eq!(render("{:e}", &args![1234.5]).unwrap(), format!("{:e}", 1234.5));
        assert_eq!(render("{:.2E}", &args![-0.000123]).unwrap(), format!("{:.2E}", -0.000123));
        assert_eq!(render("{:?}", &args![1.0]).unwrap(), format!("{:?}", 1.0));
        assert_eq!(render("{:e}", &args![u64::MAX]).unwrap(), format!("{:e}", u64::MAX));
        assert_eq!(render("{:e}", &args![-1500]).unwrap(), format!("{:e}", -1500));
    }

    #[test]
    fn test_plus_flag_skips_nan() {
        assert_eq!(render("{:+}", &args![f64::NAN]).unwrap(), format!("{:+}", f64::NAN));
        assert_eq!(render("{:+e}", &args![f64::NAN]).unwrap(), "NaN");
        assert_eq!(render("{:+}", &args![f64::INFINITY]).unwrap(), "+inf");
        assert_eq!(render("{:+}", &args![-0.5]).unwrap(), "-0.5");
    }

    #[test]
    fn test_f32_arguments_match_std() {
        assert_eq!(render("{}", &args![1.1f32]).unwrap(), format!("{}", 1.1f32));
        assert_eq!(render("{:?}", &args![0.1f32]).unwrap(), format!("{:?}", 0.1f32));
    }

    #[test]
    fn test_signed_radix_is_64_bit() {
        assert_eq!(render("{:x}", &args![-1i32]).unwrap(), format!("{:x}", -1i64));
        assert_eq!(render("{:b}", &args![-2i8]).unwrap(), format!("{:b}", -2i64));
        assert_eq!(render("{:x}", &args![255u8]).unwrap(), "ff");
    }

    #[test]
    fn test_string_precision_and_debug() {
        assert_eq!(render("{:.3}", &args!["abcdef"]).unwrap(), "abc");
        assert_eq!(render("{:?}", &args!["a\"b"]).unwrap(), format!("{:?}", "a\"b"));
        assert_eq!(render("{:?}", &args!['x']).unwrap(), "'x'");
        assert_eq!(render("[{}]", &[Value::Null]).unwrap(), "[]");
    }

    #[test]
    fn test_unsupported_argument_kinds() {
        assert_eq!(
            render("{:x}", &args!["text"]),
            Err(FormatError::UnsupportedArgument {
                index: 0,
                kind: "string",
                spec: "x".to_string(),
            })
        );
        assert!(matches!(
            render("{:x}", &args![1.5]),
            Err(FormatError::UnsupportedArgument { kind: "float", .. })
        ));
        assert!(matches!(
            render("{0} {1:e}", &args![1, true]),
            Err(FormatError::UnsupportedArgument { index: 1, kind: "bool", .. })
        ));
    }

    #[test]
    fn test_spec_accessors() {
        let t = Template::parse("{1:>8.2e}").unwrap();
        let p = t.placeholders().next().unwrap();
        assert_eq!(p.index(), 1);
        assert_eq!(p.spec().width(), Some(8));
        assert_eq!(p.spec().precision(), Some(2));
        assert_eq!(p.spec().kind(), SpecKind::LowerExp);
        assert_eq!(p.spec().kind().as_str(), "e");
    }
}
