use serde::Serialize;
use tracing::debug;

use crate::browser::driver::{By, Driver, ElementHandle};
use crate::browser::select::SelectElement;
use crate::data::generator::{DataGenerator, StringKind};
use crate::error::{FixtureError, Result};
use crate::form::field::{FILLABLE_SELECTOR, FieldKind, FormField};
use crate::form::seed::Seed;
use crate::trace::logger::ActionJournal;
use crate::trace::trace::JournalEvent;

/// What to do with a field the seed has no value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Generate a random value.
    #[default]
    AutoFill,
    /// Leave the field as it is.
    SeedOnly,
}

/// Where the value a field ended up with came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    Seed,
    Random,
    Skipped,
}

/// Outcome for one field (or one radio group) of a fill pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFill {
    /// The element written to; for radio groups the member clicked.
    pub element: Option<ElementHandle>,
    /// Field identifier, or the group name for radio groups.
    pub identifier: Option<String>,
    pub kind: FieldKind,
    pub source: ValueSource,
    /// Text typed, option value selected, checkbox state or radio value.
    pub value: Option<String>,
    /// Whether the page was touched.
    pub changed: bool,
}

impl FieldFill {
    fn skipped(field: &FormField) -> Self {
        FieldFill {
            element: Some(field.element.clone()),
            identifier: field.identifier.clone(),
            kind: field.kind,
            source: ValueSource::Skipped,
            value: None,
            changed: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillReport {
    pub fields: Vec<FieldFill>,
}

impl FillReport {
    pub fn field(&self, identifier: &str) -> Option<&FieldFill> {
        self.fields
            .iter()
            .find(|f| f.identifier.as_deref() == Some(identifier))
    }

    pub fn count(&self, source: ValueSource) -> usize {
        self.fields.iter().filter(|f| f.source == source).count()
    }
}

/// Radio buttons sharing one `name`, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct RadioGroup {
    pub name: String,
    pub members: Vec<FormField>,
}

/// Classify `elements` in order. Fields are taken as-is; any other element
/// contributes its fillable descendants.
pub fn collect_fields(driver: &mut dyn Driver, elements: &[ElementHandle]) -> Result<Vec<FormField>> {
    let mut fields = Vec::new();

    for element in elements {
        if let Some(field) = FormField::inspect(driver, element)? {
            fields.push(field);
            continue;
        }

        for descendant in driver.find_elements(&By::css(FILLABLE_SELECTOR), Some(element))? {
            if let Some(field) = FormField::inspect(driver, &descendant)? {
                fields.push(field);
            }
        }
    }

    Ok(fields)
}

/// Split radio buttons out of `fields` and group them by name, keeping the
/// order in which groups were first seen. Unnamed radios belong to no group.
pub fn group_radios(fields: Vec<FormField>) -> (Vec<FormField>, Vec<RadioGroup>) {
    let mut others = Vec::new();
    let mut groups: Vec<RadioGroup> = Vec::new();

    for field in fields {
        if field.kind != FieldKind::Radio {
            others.push(field);
            continue;
        }

        let Some(name) = field.name.clone() else {
            continue;
        };

        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.members.push(field),
            None => groups.push(RadioGroup {
                name,
                members: vec![field],
            }),
        }
    }

    (others, groups)
}

/// Populates form fields from a seed, generating whatever the seed lacks.
pub struct AutoFill<'a> {
    driver: &'a mut dyn Driver,
    data: &'a mut dyn DataGenerator,
    seed: &'a Seed,
    policy: FillPolicy,
    journal: Option<&'a ActionJournal>,
}

impl<'a> AutoFill<'a> {
    pub fn new(driver: &'a mut dyn Driver, data: &'a mut dyn DataGenerator, seed: &'a Seed) -> Self {
        AutoFill {
            driver,
            data,
            seed,
            policy: FillPolicy::AutoFill,
            journal: None,
        }
    }

    pub fn policy(mut self, policy: FillPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn journal(mut self, journal: Option<&'a ActionJournal>) -> Self {
        self.journal = journal;
        self
    }

    /// Fill every field in or below `elements`. Radio groups are decided
    /// after all other fields.
    pub fn perform(mut self, elements: &[ElementHandle]) -> Result<FillReport> {
        if elements.is_empty() {
            return Err(FixtureError::invalid_argument("elements", "nothing to fill"));
        }

        let fields = collect_fields(&mut *self.driver, elements)?;
        let (fields, radio_groups) = group_radios(fields);
        let mut report = FillReport::default();

        for field in &fields {
            let fill = self.fill_field(field)?;
            self.record(&mut report, fill);
        }

        for group in &radio_groups {
            let fill = self.fill_radio_group(group)?;
            self.record(&mut report, fill);
        }

        Ok(report)
    }

    fn record(&self, report: &mut FillReport, fill: FieldFill) {
        debug!(
            field = fill.identifier.as_deref().unwrap_or("<unnamed>"),
            kind = ?fill.kind,
            source = ?fill.source,
            value = fill.value.as_deref().unwrap_or(""),
            "filled field"
        );

        if let Some(journal) = self.journal {
            journal.log(&JournalEvent::field_fill(&fill));
        }

        report.fields.push(fill);
    }

    fn fill_field(&mut self, field: &FormField) -> Result<FieldFill> {
        match field.kind {
            FieldKind::Checkbox => self.fill_checkbox(field),
            FieldKind::Select => self.fill_select(field),
            kind if kind.is_text_like() => self.fill_text(field),
            // hidden and submit inputs; radios are filled per group
            _ => Ok(FieldFill::skipped(field)),
        }
    }

    fn lookup(&self, key: Option<&str>) -> Option<String> {
        key.and_then(|k| self.seed.resolve(k)).map(|v| v.project())
    }

    fn fill_text(&mut self, field: &FormField) -> Result<FieldFill> {
        let (text, source) = if let Some(text) = self.seed.projection() {
            (text, ValueSource::Seed)
        } else if let Some(text) = self.lookup(field.identifier.as_deref()) {
            (text, ValueSource::Seed)
        } else if self.policy == FillPolicy::AutoFill {
            let hint = field.identifier.as_deref().unwrap_or_default();
            (self.data.generate_string(hint, StringKind::AlphaNumeric), ValueSource::Random)
        } else {
            return Ok(FieldFill::skipped(field));
        };

        self.driver.clear(&field.element)?;
        self.driver.send_keys(&field.element, &text)?;

        Ok(FieldFill {
            element: Some(field.element.clone()),
            identifier: field.identifier.clone(),
            kind: field.kind,
            source,
            value: Some(text),
            changed: true,
        })
    }

    fn fill_checkbox(&mut self, field: &FormField) -> Result<FieldFill> {
        // A scalar seed cannot say which boxes to tick.
        let seeded = if self.seed.is_simple() {
            None
        } else {
            self.lookup(field.identifier.as_deref())
                .and_then(|text| parse_checked(&text))
        };

        let (checked, source) = match seeded {
            Some(checked) => (checked, ValueSource::Seed),
            None if self.policy == FillPolicy::AutoFill => (self.data.next_bool(), ValueSource::Random),
            None => return Ok(FieldFill::skipped(field)),
        };

        let changed = self.driver.is_selected(&field.element)? != checked;
        if changed {
            self.driver.click(&field.element)?;
        }

        Ok(FieldFill {
            element: Some(field.element.clone()),
            identifier: field.identifier.clone(),
            kind: field.kind,
            source,
            value: Some(checked.to_string()),
            changed,
        })
    }

    fn fill_select(&mut self, field: &FormField) -> Result<FieldFill> {
        let wanted = if self.seed.is_simple() {
            None
        } else {
            self.lookup(field.identifier.as_deref())
        };

        let mut select = SelectElement::new(&mut *self.driver, &field.element)?;

        let mut options = Vec::new();
        for option in select.options()? {
            let value = select.option_value(&option)?.unwrap_or_default();
            let text = select.option_text(&option)?;
            options.push((value, text));
        }

        if let Some(wanted) = wanted {
            if options.iter().any(|(value, _)| *value == wanted) {
                select.select_by_value(&wanted)?;
                return Ok(select_fill(field, ValueSource::Seed, wanted));
            }

            if let Some((value, _)) = options.iter().find(|(_, text)| *text == wanted) {
                let value = value.clone();
                select.select_by_text(&wanted)?;
                return Ok(select_fill(field, ValueSource::Seed, value));
            }
        }

        if self.policy == FillPolicy::SeedOnly {
            return Ok(FieldFill::skipped(field));
        }

        let candidates: Vec<String> = options
            .into_iter()
            .map(|(value, _)| value)
            .filter(|value| !value.is_empty())
            .collect();

        match self.data.next_in_set(&candidates) {
            Some(value) => {
                select.select_by_value(value)?;
                Ok(select_fill(field, ValueSource::Random, value.clone()))
            }
            None => Ok(FieldFill::skipped(field)),
        }
    }

    fn fill_radio_group(&mut self, group: &RadioGroup) -> Result<FieldFill> {
        let wanted = match self.seed.projection() {
            Some(text) => Some(text),
            None => self.lookup(Some(&group.name)),
        }
        .filter(|text| !text.is_empty());

        if let Some(wanted) = wanted {
            for member in &group.members {
                if self.driver.attribute(&member.element, "value")?.as_deref() == Some(wanted.as_str()) {
                    self.driver.click(&member.element)?;
                    return Ok(radio_fill(group, member, ValueSource::Seed, wanted));
                }
            }
        }

        if self.policy == FillPolicy::SeedOnly {
            return Ok(FieldFill {
                element: None,
                identifier: Some(group.name.clone()),
                kind: FieldKind::Radio,
                source: ValueSource::Skipped,
                value: None,
                changed: false,
            });
        }

        let member = self
            .data
            .next_in_set(&group.members)
            .ok_or_else(|| FixtureError::not_found(format!("input[type=radio][name='{}']", group.name)))?;

        self.driver.click(&member.element)?;
        let value = self.driver.attribute(&member.element, "value")?.unwrap_or_default();

        Ok(radio_fill(group, member, ValueSource::Random, value))
    }
}

/// `"true"` / `"false"` in any case; anything else is no answer.
fn parse_checked(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn select_fill(field: &FormField, source: ValueSource, value: String) -> FieldFill {
    FieldFill {
        element: Some(field.element.clone()),
        identifier: field.identifier.clone(),
        kind: FieldKind::Select,
        source,
        value: Some(value),
        changed: true,
    }
}

fn radio_fill(group: &RadioGroup, member: &FormField, source: ValueSource, value: String) -> FieldFill {
    FieldFill {
        element: Some(member.element.clone()),
        identifier: Some(group.name.clone()),
        kind: FieldKind::Radio,
        source,
        value: Some(value),
        changed: true,
    }
}
