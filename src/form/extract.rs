use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::browser::driver::{By, Driver, ElementHandle};
use crate::error::{FixtureError, Result};
use crate::form::field::field_identifier;
use crate::form::source::json_kind;

/// A value read back out of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    Bool(bool),
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

/// Field identifier → value, in the order fields were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the key is already present. Returns whether it was inserted.
    pub fn insert(&mut self, key: impl Into<String>, value: FormValue) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FormData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, FormValue)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, FormValue)>>(iter: I) -> Self {
        let mut data = FormData::new();
        for (key, value) in iter {
            data.insert(key, value);
        }
        data
    }
}

/// Read the current values of every `<input>` below `container`.
///
/// Inputs without an id or name are skipped, as are input types with no
/// extractable value. The first value for a key wins.
pub fn extract_form_data(driver: &mut dyn Driver, container: &ElementHandle) -> Result<FormData> {
    let mut data = FormData::new();

    for element in driver.find_elements(&By::tag("input"), Some(container))? {
        let Some(key) = field_identifier(driver, &element)? else {
            continue;
        };

        let tag = driver.tag_name(&element)?;
        let value = match tag.to_ascii_lowercase().as_str() {
            "input" => input_value(driver, &element)?,
            "select" => select_value(driver, &element)?,
            _ => None,
        };

        if let Some(value) = value {
            data.insert(key, value);
        }
    }

    Ok(data)
}

fn input_value(driver: &mut dyn Driver, element: &ElementHandle) -> Result<Option<FormValue>> {
    let input_type = driver
        .attribute(element, "type")?
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_else(|| "text".to_string());

    let value = match input_type.as_str() {
        "password" | "hidden" | "text" => Some(FormValue::Text(
            driver.attribute(element, "value")?.unwrap_or_default(),
        )),
        "checkbox" => Some(FormValue::Bool(driver.is_selected(element)?)),
        _ => None,
    };

    Ok(value)
}

// Selects are not read back; they never appear in extracted form data.
fn select_value(_driver: &mut dyn Driver, _element: &ElementHandle) -> Result<Option<FormValue>> {
    Ok(None)
}

/// Declared shape of a record property, taken from its default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Bool,
    Integer,
    Float,
    /// Strings, and unit enums that serialize by variant name
    Text,
    /// `null`, sequences and nested records: assigned verbatim
    Unknown,
}

impl TargetKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Bool(_) => TargetKind::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => TargetKind::Integer,
            Value::Number(_) => TargetKind::Float,
            Value::String(_) => TargetKind::Text,
            Value::Null | Value::Array(_) | Value::Object(_) => TargetKind::Unknown,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TargetKind::Bool => "bool",
            TargetKind::Integer => "integer",
            TargetKind::Float => "float",
            TargetKind::Text => "string",
            TargetKind::Unknown => "value",
        }
    }
}

/// Convert an extracted form value to the JSON shape of `target`.
pub fn coerce(field: &str, value: &FormValue, target: TargetKind) -> Result<Value> {
    let failed = || FixtureError::Conversion {
        field: field.to_string(),
        target: target.name().to_string(),
        value: form_value_text(value),
    };

    let converted = match (value, target) {
        (FormValue::Text(s), TargetKind::Text | TargetKind::Unknown) => Value::String(s.clone()),
        (FormValue::Text(s), TargetKind::Bool) => {
            if s.eq_ignore_ascii_case("true") {
                Value::Bool(true)
            } else if s.eq_ignore_ascii_case("false") {
                Value::Bool(false)
            } else {
                return Err(failed());
            }
        }
        (FormValue::Text(s), TargetKind::Integer) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                Value::Number(i.into())
            } else if let Ok(u) = s.parse::<u64>() {
                Value::Number(u.into())
            } else {
                return Err(failed());
            }
        }
        (FormValue::Text(s), TargetKind::Float) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(failed)?,
        (FormValue::Bool(b), TargetKind::Bool | TargetKind::Unknown) => Value::Bool(*b),
        (FormValue::Bool(b), TargetKind::Integer) => Value::Number(u8::from(*b).into()),
        (FormValue::Bool(b), TargetKind::Float) => Number::from_f64(if *b { 1.0 } else { 0.0 })
            .map(Value::Number)
            .ok_or_else(failed)?,
        (FormValue::Bool(b), TargetKind::Text) => Value::String(b.to_string()),
    };

    Ok(converted)
}

/// Build a `T` from form data: every property of `T` whose name matches a
/// form key is assigned through [`coerce`]; other properties keep their
/// default.
///
/// Properties whose default is `null` (typically `Option`s) have no declared
/// shape, so the conversions are tried in table order (bool, integer,
/// float, string) and the first one `T` accepts is kept. Every assignment is
/// checked against `T` as it is made, so a rejected value is reported
/// against its own property.
pub fn map_form_values<T>(data: &FormData) -> Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    let type_name = std::any::type_name::<T>();

    let template = serde_json::to_value(T::default()).map_err(|e| FixtureError::JsonSerialize {
        context: type_name.into(),
        source: e,
    })?;

    let mut properties = match template {
        Value::Object(properties) => properties,
        other => {
            return Err(FixtureError::invalid_argument(
                "T",
                format!("{} serializes to {}, not a record", type_name, json_kind(&other)),
            ));
        }
    };

    let names: Vec<String> = properties.keys().cloned().collect();
    for name in names {
        let Some(value) = data.get(&name) else {
            continue;
        };

        let target = properties.get(&name).map(TargetKind::of).unwrap_or(TargetKind::Unknown);
        let candidates: Vec<Value> = match target {
            TargetKind::Unknown => [TargetKind::Bool, TargetKind::Integer, TargetKind::Float, TargetKind::Text]
                .into_iter()
                .filter_map(|kind| coerce(&name, value, kind).ok())
                .collect(),
            kind => vec![coerce(&name, value, kind)?],
        };

        let mut accepted = false;
        for candidate in candidates {
            properties.insert(name.clone(), candidate);
            if serde_json::from_value::<T>(Value::Object(properties.clone())).is_ok() {
                accepted = true;
                break;
            }
        }

        if !accepted {
            return Err(FixtureError::Conversion {
                field: name,
                target: target.name().to_string(),
                value: form_value_text(value),
            });
        }
    }

    serde_json::from_value(Value::Object(properties)).map_err(|e| FixtureError::Conversion {
        field: type_name.to_string(),
        target: type_name.to_string(),
        value: e.to_string(),
    })
}

fn form_value_text(value: &FormValue) -> String {
    match value {
        FormValue::Text(s) => s.clone(),
        FormValue::Bool(b) => b.to_string(),
    }
}
