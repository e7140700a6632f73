use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FixtureError, Result};
use crate::form::seed::SeedValue;

/// Keyed value lookup behind a structured seed.
///
/// A missing key is an ordinary outcome: the caller falls back to
/// generated data.
pub trait FieldSource: fmt::Debug {
    fn resolve(&self, key: &str) -> Option<SeedValue>;
}

/// Explicit key → value map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSource {
    values: HashMap<String, SeedValue>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value unless the key is already present.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SeedValue>) -> Self {
        self.values.entry(key.into()).or_insert_with(|| value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<SeedValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MapSource::new(), |source, (k, v)| source.with(k, v))
    }
}

impl FieldSource for MapSource {
    fn resolve(&self, key: &str) -> Option<SeedValue> {
        self.values.get(key).cloned()
    }
}

/// Records that can enumerate their own fields for seeding.
///
/// ```
/// use web_fixture::form::seed::SeedValue;
/// use web_fixture::form::source::FieldRecord;
///
/// struct Signup { name: String, age: Option<u32> }
///
/// impl FieldRecord for Signup {
///     fn record_fields(&self) -> Vec<(&'static str, Option<SeedValue>)> {
///         vec![
///             ("name", Some(self.name.clone().into())),
///             ("age", self.age.map(SeedValue::from)),
///         ]
///     }
/// }
/// ```
pub trait FieldRecord {
    /// Every readable field with its current value; `None` means unset.
    fn record_fields(&self) -> Vec<(&'static str, Option<SeedValue>)>;
}

/// Fields of a typed record, captured once when the seed is built.
#[derive(Debug, Clone, PartialEq)]
pub struct StructSource {
    type_name: &'static str,
    fields: Vec<(String, SeedValue)>,
}

impl StructSource {
    pub fn from_record<R: FieldRecord>(record: &R) -> Self {
        let fields = record
            .record_fields()
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
            .collect();

        StructSource {
            type_name: std::any::type_name::<R>(),
            fields,
        }
    }

    /// Capture the top-level fields of a value that serializes to an object.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value).map_err(|e| FixtureError::JsonSerialize {
            context: std::any::type_name::<T>().into(),
            source: e,
        })?;

        match json {
            Value::Object(map) => Ok(Self::from_json_object(std::any::type_name::<T>(), map)),
            other => Err(FixtureError::invalid_argument(
                "value",
                format!("expected a record, got {}", json_kind(&other)),
            )),
        }
    }

    pub fn from_json_object(type_name: &'static str, map: Map<String, Value>) -> Self {
        let fields = map
            .iter()
            .filter_map(|(name, value)| SeedValue::from_json(value).map(|v| (name.clone(), v)))
            .collect();

        StructSource { type_name, fields }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl FieldSource for StructSource {
    fn resolve(&self, key: &str) -> Option<SeedValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
