//! Small text helpers

/// `"Yes"` for `true`, `"No"` for `false`
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// The first `count` characters of `s`
///
/// Non-positive counts give `""`; counts past the end give all of `s`.
pub fn left(s: &str, count: isize) -> &str {
    if count < 1 {
        return "";
    }
    match s.char_indices().nth(count as usize) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// `s`, or `""` when absent
pub fn empty_if_null(s: Option<&str>) -> &str {
    s.unwrap_or_default()
}

/// Whether `s` is absent, empty, or only whitespace
pub fn is_null_or_whitespace(s: Option<&str>) -> bool {
    s.map_or(true, |s| s.trim().is_empty())
}
