//! Runtime converter registry
//!
//! Maps type descriptors to boxed converters so that call sites which only
//! know the target type at runtime (a type name from a config file or the
//! command line, or a `TypeId`) can still coerce text.

use super::FromText;
use crate::error::{CoerceError, CoerceResult, ParseFailure};
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use uuid::Uuid;

type AnyConverter = dyn Fn(&str) -> Result<Box<dyn Any + Send>, ParseFailure> + Send + Sync;
type ValueConverter = dyn Fn(&str) -> Result<Value, ParseFailure> + Send + Sync;

/// Process-wide registry with every built-in converter
static GLOBAL: OnceLock<ConverterRegistry> = OnceLock::new();

/// Get the shared registry of built-in converters
///
/// Built on first access and never mutated afterwards; concurrent first
/// calls all observe the same fully populated registry.
pub fn global() -> &'static ConverterRegistry {
    GLOBAL.get_or_init(|| {
        let registry = ConverterRegistry::with_builtins();
        log::debug!(
            "initialized global converter registry with {} type names",
            registry.by_name.len()
        );
        registry
    })
}

/// Identifies a target type by name and `TypeId`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: String,
    id: TypeId,
}

impl TypeDescriptor {
    /// Describe `T` under the given name
    pub fn of<T: 'static>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: TypeId::of::<T>(),
        }
    }

    /// Canonical registry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust type identity
    pub fn id(&self) -> TypeId {
        self.id
    }
}

struct ConverterEntry {
    descriptor: TypeDescriptor,
    parse_any: Box<AnyConverter>,
    parse_value: Box<ValueConverter>,
    default_value: Value,
}

/// Registry of converters keyed by `TypeId` and by case-insensitive name
#[derive(Default)]
pub struct ConverterRegistry {
    by_id: HashMap<TypeId, Arc<ConverterEntry>>,
    by_name: HashMap<String, Arc<ConverterEntry>>,
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl ConverterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in converter
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register::<i8>("i8")
            .register::<i16>("i16")
            .register::<i32>("i32")
            .register::<i64>("i64")
            .register::<isize>("isize")
            .register::<u8>("u8")
            .register::<u16>("u16")
            .register::<u32>("u32")
            .register::<u64>("u64")
            .register::<usize>("usize")
            .register::<f32>("f32")
            .register::<f64>("f64")
            .register::<bool>("bool")
            .register::<char>("char")
            .register::<String>("string")
            .register::<NaiveDate>("date")
            .register::<NaiveTime>("time")
            .register::<NaiveDateTime>("datetime")
            .register::<DateTime<Utc>>("timestamp")
            .register::<Duration>("duration")
            .register::<Uuid>("uuid");

        for (alias, target) in [
            ("int", "i32"),
            ("long", "i64"),
            ("float", "f64"),
            ("double", "f64"),
            ("str", "string"),
            ("guid", "uuid"),
            ("timespan", "duration"),
        ] {
            if let Err(e) = registry.alias(alias, target) {
                log::warn!("skipping built-in alias '{alias}': {e}");
            }
        }

        registry
    }

    /// Register `T` through its [`FromText`] implementation
    pub fn register<T>(&mut self, name: &str) -> &mut Self
    where
        T: FromText + Default + Into<Value> + Send + 'static,
    {
        self.register_fn::<T, _>(name, T::from_text)
    }

    /// Register `T` with an explicit parsing function
    ///
    /// Replaces any converter previously registered under the same name or
    /// for the same type.
    pub fn register_fn<T, F>(&mut self, name: &str, parse: F) -> &mut Self
    where
        T: Default + Into<Value> + Send + 'static,
        F: Fn(&str) -> Result<T, ParseFailure> + Send + Sync + 'static,
    {
        let parse = Arc::new(parse);
        let parse_value = Arc::clone(&parse);
        let entry = Arc::new(ConverterEntry {
            descriptor: TypeDescriptor::of::<T>(name),
            parse_any: Box::new(move |text: &str| {
                parse(text).map(|v| Box::new(v) as Box<dyn Any + Send>)
            }),
            parse_value: Box::new(move |text: &str| parse_value(text).map(Into::into)),
            default_value: T::default().into(),
        });

        log::trace!("registering converter for '{name}'");
        self.by_id.insert(TypeId::of::<T>(), Arc::clone(&entry));
        self.by_name.insert(name.to_ascii_lowercase(), entry);
        self
    }

    /// Make `alias` resolve to the converter registered as `target`
    pub fn alias(&mut self, alias: &str, target: &str) -> CoerceResult<&mut Self> {
        let entry = self
            .entry(target)
            .cloned()
            .ok_or_else(|| CoerceError::NoConverterFound {
                target_type: target.to_string(),
            })?;
        self.by_name.insert(alias.to_ascii_lowercase(), entry);
        Ok(self)
    }

    /// Whether a converter is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Whether a converter is registered for `T`
    pub fn contains_type<T: 'static>(&self) -> bool {
        self.by_id.contains_key(&TypeId::of::<T>())
    }

    /// Descriptor of the converter registered under `name`
    pub fn descriptor(&self, name: &str) -> Option<&TypeDescriptor> {
        self.entry(name).map(|entry| &entry.descriptor)
    }

    /// All registered names, aliases included, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered names paired with the canonical name they resolve to, sorted
    pub fn name_targets(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .by_name
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.descriptor.name()))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Coerce text into `T` using the converter registered for `T`'s `TypeId`
    ///
    /// `None` and `""` yield `T::default()` even when nothing is registered.
    pub fn coerce<T: Default + 'static>(&self, text: Option<&str>) -> CoerceResult<T> {
        let text = match text {
            None | Some("") => return Ok(T::default()),
            Some(text) => text,
        };

        let entry = self
            .by_id
            .get(&TypeId::of::<T>())
            .ok_or_else(|| CoerceError::NoConverterFound {
                target_type: std::any::type_name::<T>().to_string(),
            })?;

        let parsed = (entry.parse_any)(text)
            .map_err(|failure| failure.into_conversion_error(text, entry.descriptor.name()))?;

        parsed
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| CoerceError::Conversion {
                input: text.to_string(),
                target_type: entry.descriptor.name().to_string(),
                reason: "converter produced a value of another type".to_string(),
            })
    }

    /// Coerce text into a [`Value`] using the converter registered under `name`
    ///
    /// `None` and `""` yield the type's default value, or [`Value::Null`] for
    /// names with no converter.
    pub fn coerce_named(&self, name: &str, text: Option<&str>) -> CoerceResult<Value> {
        let entry = self.entry(name);
        let text = match text {
            None | Some("") => {
                return Ok(entry.map_or(Value::Null, |entry| entry.default_value.clone()))
            }
            Some(text) => text,
        };

        let entry = entry.ok_or_else(|| CoerceError::NoConverterFound {
            target_type: name.to_string(),
        })?;

        (entry.parse_value)(text)
            .map_err(|failure| failure.into_conversion_error(text, entry.descriptor.name()))
    }

    fn entry(&self, name: &str) -> Option<&Arc<ConverterEntry>> {
        self.by_name.get(&name.to_ascii_lowercase())
    }
}
