//! Dynamically typed values
//!
//! [`Value`] is what named coercion produces and what the template
//! formatter consumes as arguments.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

use crate::coerce::span;

/// A value of one of the supported kinds
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value; renders as the empty string
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Single character
    Char(char),
    /// Text
    Str(String),
    /// Calendar date
    Date(NaiveDate),
    /// Wall-clock time
    Time(NaiveTime),
    /// Date and time without an offset
    DateTime(NaiveDateTime),
    /// UTC instant
    Timestamp(DateTime<Utc>),
    /// Time span
    Duration(Duration),
    /// UUID
    Uuid(Uuid),
}

impl Value {
    /// Short name of the value's kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_) => "datetime",
            Value::Timestamp(_) => "timestamp",
            Value::Duration(_) => "duration",
            Value::Uuid(_) => "uuid",
        }
    }

    /// Whether this is [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value is an integer of either signedness
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Int(_) | Value::UInt(_))
    }

    /// Whether this value is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::UInt(_) | Value::Float(_))
    }

    /// Borrow the text of a [`Value::Str`]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean of a [`Value::Bool`]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Str(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{d}"),
            Value::Time(t) => write!(f, "{t}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Duration(d) => f.write_str(&span::format_span(*d)),
            Value::Uuid(u) => write!(f, "{u}"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            other => serializer.collect_str(other),
        }
    }
}

macro_rules! value_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )+
    };
}

value_from!(Bool: bool);
value_from!(Int: i8, i16, i32, i64);
value_from!(UInt: u8, u16, u32, u64);
value_from!(Float: f64);
value_from!(Char: char);
value_from!(Str: String, &str);
value_from!(Date: NaiveDate);
value_from!(Time: NaiveTime);
value_from!(DateTime: NaiveDateTime);
value_from!(Timestamp: DateTime<Utc>);
value_from!(Duration: Duration);
value_from!(Uuid: Uuid);

impl From<f32> for Value {
    /// Widens through the shortest decimal form, so `1.1f32` becomes `1.1`
    fn from(v: f32) -> Self {
        Value::Float(v.to_string().parse().unwrap_or(f64::from(v)))
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Build a `Vec<Value>` from heterogeneous arguments
///
/// ```
/// use textkit_core::{args, Value};
///
/// let args = args![1, "two", 3.5];
/// assert_eq!(args[1], Value::Str("two".into()));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
