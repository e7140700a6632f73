use serde::{Deserialize, Serialize};
use tracing::info;

use crate::actions::fill::{FillAction, ThenSubmit};
use crate::actions::fixture::Fixture;
use crate::actions::get::GetAction;
use crate::actions::navigate::NavigateAction;
use crate::actions::page_object::PageObject;
use crate::actions::switch_to::SwitchToAction;
use crate::actions::wait::WaitAction;
use crate::browser::driver::{By, Driver, ElementHandle};
use crate::cli::config::FixtureConfig;
use crate::error::{FixtureError, Result};
use crate::form::autofill::{AutoFill, FillPolicy};
use crate::form::seed::Seed;
use crate::form::wrapper::FormWrapper;
use crate::locator::selector::to_by;
use crate::trace::trace::JournalEvent;

/// Which of the matched elements a click acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClickMode {
    /// The first match; fails when nothing matches.
    ClickOne,
    /// Every match; nothing happens when nothing matches.
    ClickAny,
    /// Every match; fails when nothing matches.
    #[default]
    ClickAll,
    /// The first match; fails when nothing matches.
    ClickFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Click,
    DoubleClick,
}

/// Fluent actions against the page held by a [`Fixture`].
///
/// Methods that act on the page return the provider again so calls chain:
///
/// ```ignore
/// fixture
///     .i()
///     .navigate().to("/signup")?
///     .auto_fill("#signup", Seed::from_pairs([("email", "ada@example.com")]))?
///     .then_submit()?;
/// ```
pub struct ActionProvider<'f, D: Driver> {
    fixture: &'f mut Fixture<D>,
}

impl<'f, D: Driver> ActionProvider<'f, D> {
    pub(crate) fn new(fixture: &'f mut Fixture<D>) -> Self {
        ActionProvider { fixture }
    }

    pub fn fixture(&mut self) -> &mut Fixture<D> {
        self.fixture
    }

    pub fn config(&self) -> &FixtureConfig {
        self.fixture.config()
    }

    fn journal(&self, event: JournalEvent) {
        self.fixture.journal().log(&event);
    }

    // ------------------------------------------------------------------
    // Finding elements
    // ------------------------------------------------------------------

    pub fn find_element(&mut self, selector: &str) -> Result<ElementHandle> {
        self.find_elements(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| FixtureError::not_found(selector))
    }

    pub fn find_element_by(&mut self, by: &By) -> Result<ElementHandle> {
        self.fixture.driver_mut().find_element(by, None)
    }

    pub fn find_elements(&mut self, selector: &str) -> Result<Vec<ElementHandle>> {
        let by = to_by(selector, self.config().selector)?;
        self.find_elements_by(&by)
    }

    pub fn find_elements_by(&mut self, by: &By) -> Result<Vec<ElementHandle>> {
        self.fixture.driver_mut().find_elements(by, None)
    }

    pub fn check_for_element(&mut self, selector: &str) -> Result<bool> {
        Ok(!self.find_elements(selector)?.is_empty())
    }

    pub fn count(&mut self, selector: &str) -> Result<usize> {
        Ok(self.find_elements(selector)?.len())
    }

    // ------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------

    pub fn click(&mut self, selector: &str, mode: ClickMode) -> Result<&mut Self> {
        let by = to_by(selector, self.config().selector)?;
        self.gesture(&by, selector, mode, Gesture::Click)
    }

    pub fn click_by(&mut self, by: &By, mode: ClickMode) -> Result<&mut Self> {
        self.gesture(by, by.selector(), mode, Gesture::Click)
    }

    pub fn double_click(&mut self, selector: &str, mode: ClickMode) -> Result<&mut Self> {
        let by = to_by(selector, self.config().selector)?;
        self.gesture(&by, selector, mode, Gesture::DoubleClick)
    }

    pub fn double_click_by(&mut self, by: &By, mode: ClickMode) -> Result<&mut Self> {
        self.gesture(by, by.selector(), mode, Gesture::DoubleClick)
    }

    fn gesture(&mut self, by: &By, selector: &str, mode: ClickMode, gesture: Gesture) -> Result<&mut Self> {
        let elements = self.find_elements_by(by)?;

        let targets: &[ElementHandle] = match mode {
            ClickMode::ClickAny => &elements,
            ClickMode::ClickAll if elements.is_empty() => return Err(FixtureError::not_found(selector)),
            ClickMode::ClickAll => &elements,
            ClickMode::ClickOne | ClickMode::ClickFirst => match elements.first() {
                Some(first) => std::slice::from_ref(first),
                None => return Err(FixtureError::not_found(selector)),
            },
        };

        info!(selector, ?mode, ?gesture, count = targets.len(), "click");

        let driver = self.fixture.driver_mut();
        for element in targets {
            match gesture {
                Gesture::Click => driver.click(element)?,
                Gesture::DoubleClick => driver.double_click(element)?,
            }
        }

        let action = match gesture {
            Gesture::Click => "click",
            Gesture::DoubleClick => "double_click",
        };
        self.journal(JournalEvent::now(action).with_selector(selector));

        Ok(self)
    }

    /// Move the pointer over the first element matching `selector`,
    /// optionally offset from its top-left corner.
    pub fn move_the_mouse_to(&mut self, selector: &str, offset: Option<(i32, i32)>) -> Result<&mut Self> {
        let element = self.find_element(selector)?;
        self.fixture.driver_mut().move_to(&element, offset)?;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Sub-surfaces
    // ------------------------------------------------------------------

    pub fn navigate(&mut self) -> NavigateAction<'_, 'f, D> {
        NavigateAction::new(self)
    }

    pub fn get(&mut self) -> GetAction<'_, 'f, D> {
        GetAction::new(self)
    }

    pub fn wait(&mut self) -> WaitAction<'_, 'f, D> {
        WaitAction::new(self)
    }

    pub fn switch_to(&mut self) -> SwitchToAction<'_, 'f, D> {
        SwitchToAction::new(self)
    }

    // ------------------------------------------------------------------
    // Forms
    // ------------------------------------------------------------------

    /// Fill every field matched by (or contained in) `selector`, using the
    /// seed where it has a value and generated data everywhere else.
    pub fn auto_fill(&mut self, selector: &str, seed: Seed) -> Result<ThenSubmit<'_, 'f, D>> {
        let elements = self.find_elements(selector)?;
        if elements.is_empty() {
            return Err(FixtureError::not_found(selector));
        }
        self.journal(JournalEvent::now("auto_fill").with_selector(selector));
        self.fill_elements(elements, &seed, FillPolicy::AutoFill)
    }

    pub fn auto_fill_elements(&mut self, elements: Vec<ElementHandle>, seed: Seed) -> Result<ThenSubmit<'_, 'f, D>> {
        self.fill_elements(elements, &seed, FillPolicy::AutoFill)
    }

    /// Start a fill that only writes values the seed provides.
    pub fn fill(&mut self, selector: &str) -> Result<FillAction<'_, 'f, D>> {
        let elements = self.find_elements(selector)?;
        if elements.is_empty() {
            return Err(FixtureError::not_found(selector));
        }
        Ok(FillAction::new(self, elements))
    }

    pub fn fill_elements(
        &mut self,
        elements: Vec<ElementHandle>,
        seed: &Seed,
        policy: FillPolicy,
    ) -> Result<ThenSubmit<'_, 'f, D>> {
        let first = elements
            .first()
            .cloned()
            .ok_or_else(|| FixtureError::invalid_argument("elements", "nothing to fill"))?;

        let (driver, data, journal) = self.fixture.parts();
        let report = AutoFill::new(driver, data, seed)
            .policy(policy)
            .journal(journal)
            .perform(&elements)?;

        info!(
            fields = report.fields.len(),
            ?policy,
            "form filled"
        );

        Ok(ThenSubmit::new(self, first, report))
    }

    /// Wrap the first element matching `selector` as a form.
    pub fn form(&mut self, selector: &str) -> Result<FormWrapper<'_, D>> {
        let element = self.find_element(selector)?;
        Ok(FormWrapper::new(self.fixture, element))
    }

    /// Submit the form enclosing the first element matching `selector`.
    pub fn submit(&mut self, selector: &str) -> Result<&mut Self> {
        let element = self.find_element(selector)?;
        self.submit_element(&element)
    }

    pub fn submit_element(&mut self, element: &ElementHandle) -> Result<&mut Self> {
        info!(element = element.id(), "submit");
        self.fixture.driver_mut().submit(element)?;
        self.journal(JournalEvent::now("submit").with_value(element.id()));
        Ok(self)
    }

    /// Hand this provider to a page object.
    pub fn yields<P: PageObject<'f, D>>(self) -> P {
        P::attach(self)
    }
}
