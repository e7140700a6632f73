use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{FixtureError, Result};
use crate::form::source::{FieldRecord, FieldSource, MapSource, StructSource};

/// Date layout used when a date is typed into a field.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// A single value a seed can hand to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedValue {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// A C-like enum: fields see its discriminant, not its name.
    Enum { name: String, discriminant: i64 },
}

/// Enums usable as seed values.
pub trait SeedEnum {
    fn variant_name(&self) -> &'static str;
    fn discriminant(&self) -> i64;
}

impl SeedValue {
    pub fn from_enum<E: SeedEnum>(value: &E) -> Self {
        SeedValue::Enum {
            name: value.variant_name().to_string(),
            discriminant: value.discriminant(),
        }
    }

    /// Map a JSON scalar to a seed value. `null` has no value; arrays and
    /// objects keep their JSON text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(SeedValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(SeedValue::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Some(SeedValue::Unsigned(u))
                } else {
                    n.as_f64().map(SeedValue::Float)
                }
            }
            Value::String(s) => Some(SeedValue::Text(s.clone())),
            other => Some(SeedValue::Text(other.to_string())),
        }
    }

    /// The text a field receives for this value.
    pub fn project(&self) -> String {
        match self {
            SeedValue::Text(s) => s.clone(),
            SeedValue::Integer(i) => i.to_string(),
            SeedValue::Unsigned(u) => u.to_string(),
            SeedValue::Float(f) => f.to_string(),
            SeedValue::Bool(b) => b.to_string(),
            SeedValue::Char(c) => c.to_string(),
            SeedValue::Date(d) => d.format(DATE_FORMAT).to_string(),
            SeedValue::DateTime(dt) => dt.date().format(DATE_FORMAT).to_string(),
            SeedValue::Enum { discriminant, .. } => discriminant.to_string(),
        }
    }
}

impl fmt::Display for SeedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.project())
    }
}

impl Serialize for SeedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.project())
    }
}

macro_rules! seed_value_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for SeedValue {
                fn from(value: $source) -> Self {
                    SeedValue::$variant(value as $target)
                }
            }
        )+
    };
}

seed_value_from!(Integer as i64: i8, i16, i32, i64, isize);
seed_value_from!(Unsigned as u64: u8, u16, u32, u64, usize);
seed_value_from!(Float as f64: f32, f64);

impl From<bool> for SeedValue {
    fn from(value: bool) -> Self {
        SeedValue::Bool(value)
    }
}

impl From<char> for SeedValue {
    fn from(value: char) -> Self {
        SeedValue::Char(value)
    }
}

impl From<&str> for SeedValue {
    fn from(value: &str) -> Self {
        SeedValue::Text(value.to_string())
    }
}

impl From<String> for SeedValue {
    fn from(value: String) -> Self {
        SeedValue::Text(value)
    }
}

impl From<NaiveDate> for SeedValue {
    fn from(value: NaiveDate) -> Self {
        SeedValue::Date(value)
    }
}

impl From<NaiveDateTime> for SeedValue {
    fn from(value: NaiveDateTime) -> Self {
        SeedValue::DateTime(value)
    }
}

/// What a fill call draws its values from.
#[derive(Debug, Default)]
pub enum Seed {
    /// No seed: every field falls back to generated data.
    #[default]
    Empty,
    /// One scalar applied to every field.
    Simple(SeedValue),
    /// Per-field values looked up by field identifier.
    Structured(Box<dyn FieldSource>),
}

impl Seed {
    pub fn simple(value: impl Into<SeedValue>) -> Self {
        Seed::Simple(value.into())
    }

    /// Structured seed from key/value pairs. The first value for a key wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SeedValue>,
    {
        Seed::Structured(Box::new(pairs.into_iter().collect::<MapSource>()))
    }

    pub fn from_record<R: FieldRecord>(record: &R) -> Self {
        Seed::Structured(Box::new(StructSource::from_record(record)))
    }

    pub fn from_source(source: impl FieldSource + 'static) -> Self {
        Seed::Structured(Box::new(source))
    }

    /// Build a seed from any serializable value: objects become structured
    /// seeds, scalars simple ones, `null` the empty seed.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value).map_err(|e| FixtureError::JsonSerialize {
            context: "seed".into(),
            source: e,
        })?;
        Self::from_json(json)
    }

    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Seed::Empty),
            Value::Object(map) => Ok(Seed::Structured(Box::new(StructSource::from_json_object(
                "json", map,
            )))),
            Value::Array(_) => Err(FixtureError::invalid_argument(
                "seed",
                "a sequence cannot seed a form; use key/value pairs or an object",
            )),
            scalar => Ok(SeedValue::from_json(&scalar).map_or(Seed::Empty, Seed::Simple)),
        }
    }

    pub fn is_simple(&self) -> bool {
        matches!(self, Seed::Simple(_))
    }

    /// Per-field lookup. Always `None` for simple and empty seeds.
    pub fn resolve(&self, key: &str) -> Option<SeedValue> {
        match self {
            Seed::Structured(source) => source.resolve(key),
            Seed::Simple(_) | Seed::Empty => None,
        }
    }

    /// Text of a simple seed.
    pub fn projection(&self) -> Option<String> {
        match self {
            Seed::Simple(value) => Some(value.project()),
            _ => None,
        }
    }
}

impl From<SeedValue> for Seed {
    fn from(value: SeedValue) -> Self {
        Seed::Simple(value)
    }
}

impl From<MapSource> for Seed {
    fn from(source: MapSource) -> Self {
        Seed::Structured(Box::new(source))
    }
}

impl From<StructSource> for Seed {
    fn from(source: StructSource) -> Self {
        Seed::Structured(Box::new(source))
    }
}
