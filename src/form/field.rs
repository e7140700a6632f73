use serde::Serialize;

use crate::browser::driver::{Driver, ElementHandle};
use crate::error::Result;

/// CSS query for the fillable descendants of a container.
pub const FILLABLE_SELECTOR: &str = "input, select, textarea, datalist";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Any text-like `<input>` (text, email, password, number, date, ...)
    Text,
    TextArea,
    DataList,
    Select,
    Checkbox,
    Radio,
    Hidden,
    Submit,
}

impl FieldKind {
    /// Fields filled by clearing and typing text.
    pub fn is_text_like(self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::TextArea | FieldKind::DataList)
    }
}

/// Classify an element from its tag name and `type` attribute.
///
/// Returns `None` for anything that is not a form field, i.e. a container.
pub fn classify(tag: &str, input_type: Option<&str>) -> Option<FieldKind> {
    match tag.to_ascii_lowercase().as_str() {
        "select" => Some(FieldKind::Select),
        "textarea" => Some(FieldKind::TextArea),
        "datalist" => Some(FieldKind::DataList),
        "input" => {
            let kind = match input_type.map(|t| t.to_ascii_lowercase()).as_deref() {
                Some("radio") => FieldKind::Radio,
                Some("checkbox") => FieldKind::Checkbox,
                Some("hidden") => FieldKind::Hidden,
                Some("submit") => FieldKind::Submit,
                _ => FieldKind::Text,
            };
            Some(kind)
        }
        _ => None,
    }
}

/// A form field as seen by one fill or extract pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub element: ElementHandle,
    pub kind: FieldKind,
    /// `id` if non-empty, else `name` if non-empty.
    pub identifier: Option<String>,
    /// Raw `name` attribute, used to group radio buttons.
    pub name: Option<String>,
}

impl FormField {
    /// Read tag, type, id and name of `element`. `None` when it is not a field.
    pub fn inspect(driver: &mut dyn Driver, element: &ElementHandle) -> Result<Option<FormField>> {
        let tag = driver.tag_name(element)?;
        let input_type = driver.attribute(element, "type")?;

        let Some(kind) = classify(&tag, input_type.as_deref()) else {
            return Ok(None);
        };

        let id = non_empty(driver.attribute(element, "id")?);
        let name = non_empty(driver.attribute(element, "name")?);

        Ok(Some(FormField {
            element: element.clone(),
            kind,
            identifier: id.or_else(|| name.clone()),
            name,
        }))
    }
}

/// Lookup key of an element: `id` if non-empty, else `name` if non-empty.
pub fn field_identifier(driver: &mut dyn Driver, element: &ElementHandle) -> Result<Option<String>> {
    if let Some(id) = non_empty(driver.attribute(element, "id")?) {
        return Ok(Some(id));
    }
    Ok(non_empty(driver.attribute(element, "name")?))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
