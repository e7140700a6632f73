use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::form::autofill::{FieldFill, ValueSource};
use crate::form::field::FieldKind;

/// One line of the action journal.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEvent {
    pub timestamp_ms: u128,

    pub action: String,

    pub selector: Option<String>,
    pub field: Option<String>,
    pub kind: Option<FieldKind>,
    pub source: Option<ValueSource>,
    pub value: Option<String>,
}

impl JournalEvent {
    pub fn now(action: impl ToString) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            action: action.to_string(),
            selector: None,
            field: None,
            kind: None,
            source: None,
            value: None,
        }
    }

    /// Event describing one field decision of a fill pass.
    pub fn field_fill(fill: &FieldFill) -> Self {
        let mut event = Self::now("fill_field");
        event.field = fill.identifier.clone();
        event.kind = Some(fill.kind);
        event.source = Some(fill.source);
        event.value = fill.value.clone();
        event
    }

    pub fn with_selector(mut self, selector: impl ToString) -> Self {
        self.selector = Some(selector.to_string());
        self
    }

    pub fn with_value(mut self, value: impl ToString) -> Self {
        self.value = Some(value.to_string());
        self
    }
}
