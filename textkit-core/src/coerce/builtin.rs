//! Converters for primitive, date/time and common structured types

use super::{span, FromText};
use crate::error::ParseFailure;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

macro_rules! numeric_from_text {
    ($($ty:ty),+) => {
        $(
            impl FromText for $ty {
                fn from_text(text: &str) -> Result<Self, ParseFailure> {
                    text.trim()
                        .parse::<$ty>()
                        .map_err(|e| ParseFailure::new(e.to_string()))
                }

                fn type_name() -> String {
                    stringify!($ty).to_string()
                }
            }
        )+
    };
}

numeric_from_text!(i8, i16, i32, i64, i128, isize);
numeric_from_text!(u8, u16, u32, u64, u128, usize);
numeric_from_text!(f32, f64);

impl FromText for bool {
    fn from_text(text: &str) -> Result<Self, ParseFailure> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ParseFailure::new(format!(
                "'{trimmed}' is not a valid boolean (expected true or false)"
            )))
        }
    }

    fn type_name() -> String {
        "bool".to_string()
    }
}

impl FromText for char {
    fn from_text(text: &str) -> Result<Self, ParseFailure> {
        let mut chars = text.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(c);
        }
        let mut trimmed = text.trim().chars();
        match (trimmed.next(), trimmed.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ParseFailure::new("expected exactly one character")),
        }
    }

    fn type_name() -> String {
        "char".to_string()
    }
}

impl FromText for String {
    fn from_text(text: &str) -> Result<Self, ParseFailure> {
        Ok(text.to_string())
    }

    fn type_name() -> String {
        "string".to_string()
    }
}

impl<T: FromText> FromText for Option<T> {
    fn from_text(text: &str) -> Result<Self, ParseFailure> {
        T::from_text(text).map(Some)
    }

    fn type_name() -> String {
        format!("Option<{}>", T::type_name())
    }
}

fn parse_with_formats<T>(
    text: &str,
    formats: &[&str],
    parse: impl Fn(&str, &str) -> chrono::ParseResult<T>,
    what: &str,
) -> Result<T, ParseFailure> {
    let trimmed = text.trim();
    formats
        .iter()
        .find_map(|fmt| parse(trimmed, fmt).ok())
        .ok_or_else(|| {
            ParseFailure::new(format!(
                "'{trimmed}' is not a valid {what} (accepted: {})",
                formats.join(", ")
            ))
        })
}

impl FromText for NaiveDate {
    fn from_text(text: &str) -> Result<Self, ParseFailure> {
        parse_with_formats(text, DATE_FORMATS, NaiveDate::parse_from_str, "date")
    }

    fn type_name() -> String {
        "date".to_string()
    }
}

impl FromText for NaiveTime {
    fn from_text(text: &str) -> Result<Self, ParseFailure> {
        parse_with_formats(text, TIME_FORMATS, NaiveTime::parse_from_str, "time")
    }

    fn type_name() -> String {
        "time".to_string()
    }
}

impl FromText for NaiveDateTime {
    fn from_text(text: &str) -> Result<Self, ParseFailure> {
        parse_with_formats(
            text,
            DATETIME_FORMATS,
            NaiveDateTime::parse_from_str,
            "date-time",
        )
        .or_else(|failure| {
            NaiveDate::from_text(text)
                .map(|date| date.and_time(NaiveTime::MIN))
                .map_err(|_| failure)
        })
    }

    fn type_name() -> String {
        "datetime".to_string()
    }
}

impl FromText for DateTime<Utc> {
    fn from_text(text: &str) -> Result<Self, ParseFailure> {
        let trimmed = text.trim();
        DateTime::parse_from_rfc3339(trimmed)
            .or_else(|_| DateTime::parse_from_rfc2822(trimmed))
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                ParseFailure::new(format!(
                    "'{trimmed}' is not an RFC 3339 or RFC 2822 timestamp: {e}"
                ))
            })
    }

    fn type_name() -> String {
        "timestamp".to_string()
    }
}

impl FromText for Duration {
    fn from_text(text: &str) -> Result<Self, ParseFailure> {
        span::parse_span(text)
    }

    fn type_name() -> String {
        "duration".to_string()
    }
}

impl FromText for Uuid {
    fn from_text(text: &str) -> Result<Self, ParseFailure> {
        Uuid::parse_str(text.trim()).map_err(|e| ParseFailure::new(e.to_string()))
    }

    fn type_name() -> String {
        "uuid".to_string()
    }
}

crate::from_text_via_from_str!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, PathBuf);
