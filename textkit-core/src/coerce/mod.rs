//! String-to-type coercion
//!
//! Two entry points share one set of converters:
//!
//! - [`coerce`] resolves the converter at compile time through [`FromText`].
//! - [`ConverterRegistry`] resolves it at runtime by `TypeId` or by name,
//!   reporting [`CoerceError::NoConverterFound`] when nothing is registered.
//!
//! Both treat `None` and `""` as "no value" and hand back the target's
//! default without consulting a converter.
//!
//! # Example
//!
//! ```
//! use textkit_core::coerce::coerce;
//!
//! assert_eq!(coerce::<i32>(Some("42")).unwrap(), 42);
//! assert_eq!(coerce::<i32>(Some("")).unwrap(), 0);
//! assert!(coerce::<i32>(Some("notanumber")).is_err());
//! ```

mod builtin;
pub mod registry;
pub mod span;

pub use registry::{global, ConverterRegistry, TypeDescriptor};

use crate::error::{CoerceResult, ParseFailure};

/// Capability of being parsed from text
///
/// Implement this directly, or derive it from an existing `FromStr` impl
/// with [`from_text_via_from_str!`](crate::from_text_via_from_str), or for
/// field-less enums with [`from_text_enum!`](crate::from_text_enum).
pub trait FromText: Sized {
    /// Parse non-empty text into `Self`
    fn from_text(text: &str) -> Result<Self, ParseFailure>;

    /// Name used in diagnostics
    fn type_name() -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// Coerce optional text into `T`
///
/// `None` and the empty string yield `T::default()`. Anything else goes
/// through `T`'s converter; whitespace-only text counts as non-empty.
pub fn coerce<T>(text: Option<&str>) -> CoerceResult<T>
where
    T: FromText + Default,
{
    match text {
        None | Some("") => Ok(T::default()),
        Some(text) => T::from_text(text).map_err(|failure| {
            log::trace!("conversion of {text:?} to {} failed: {failure}", T::type_name());
            failure.into_conversion_error(text, T::type_name())
        }),
    }
}

/// Coerce text that is known to be present
///
/// Same as `coerce(Some(text))`.
pub fn coerce_str<T>(text: &str) -> CoerceResult<T>
where
    T: FromText + Default,
{
    coerce(Some(text))
}

/// Implement [`FromText`] for types that already implement `FromStr`
///
/// ```
/// use std::str::FromStr;
/// use textkit_core::{coerce::coerce, from_text_via_from_str};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Celsius(f64);
///
/// impl FromStr for Celsius {
///     type Err = String;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         s.trim_end_matches("°C").parse().map(Celsius).map_err(|e| format!("{e}"))
///     }
/// }
///
/// from_text_via_from_str!(Celsius);
///
/// assert_eq!(coerce::<Celsius>(Some("21.5°C")).unwrap(), Celsius(21.5));
/// ```
#[macro_export]
macro_rules! from_text_via_from_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::coerce::FromText for $ty {
                fn from_text(text: &str) -> ::std::result::Result<Self, $crate::ParseFailure> {
                    <$ty as ::std::str::FromStr>::from_str(text)
                        .map_err(|e| $crate::ParseFailure::new(e.to_string()))
                }

                fn type_name() -> ::std::string::String {
                    ::std::stringify!($ty).to_string()
                }
            }
        )+
    };
}

/// Implement [`FromText`] for a field-less enum by case-insensitive variant name
///
/// ```
/// use textkit_core::{coerce::coerce, from_text_enum};
///
/// #[derive(Debug, Default, PartialEq)]
/// enum Level {
///     #[default]
///     Low,
///     High,
/// }
///
/// from_text_enum!(Level { Low, High });
///
/// assert_eq!(coerce::<Level>(Some("HIGH")).unwrap(), Level::High);
/// assert_eq!(coerce::<Level>(None).unwrap(), Level::Low);
/// assert!(coerce::<Level>(Some("medium")).is_err());
/// ```
#[macro_export]
macro_rules! from_text_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::coerce::FromText for $ty {
            fn from_text(text: &str) -> ::std::result::Result<Self, $crate::ParseFailure> {
                let name = text.trim();
                $(
                    if name.eq_ignore_ascii_case(::std::stringify!($variant)) {
                        return ::std::result::Result::Ok($ty::$variant);
                    }
                )+
                ::std::result::Result::Err($crate::ParseFailure::new(::std::format!(
                    "'{}' is not one of: {}",
                    name,
                    [$(::std::stringify!($variant)),+].join(", ")
                )))
            }

            fn type_name() -> ::std::string::String {
                ::std::stringify!($ty).to_string()
            }
        }
    };
}
