use tracing::info;

use crate::actions::provider::ActionProvider;
use crate::browser::driver::{Driver, ElementHandle};
use crate::error::Result;
use crate::form::autofill::{FillPolicy, FillReport};
use crate::form::seed::Seed;

/// A fill that writes only what the seed provides.
pub struct FillAction<'a, 'f, D: Driver> {
    provider: &'a mut ActionProvider<'f, D>,
    elements: Vec<ElementHandle>,
}

impl<'a, 'f, D: Driver> FillAction<'a, 'f, D> {
    pub(crate) fn new(provider: &'a mut ActionProvider<'f, D>, elements: Vec<ElementHandle>) -> Self {
        FillAction { provider, elements }
    }

    pub fn with(self, seed: impl Into<Seed>) -> Result<ThenSubmit<'a, 'f, D>> {
        let FillAction { provider, elements } = self;
        provider.fill_elements(elements, &seed.into(), FillPolicy::SeedOnly)
    }
}

/// Result of a fill pass, with the option to submit what was filled.
pub struct ThenSubmit<'a, 'f, D: Driver> {
    provider: &'a mut ActionProvider<'f, D>,
    element: ElementHandle,
    report: FillReport,
}

impl<'a, 'f, D: Driver> ThenSubmit<'a, 'f, D> {
    pub(crate) fn new(provider: &'a mut ActionProvider<'f, D>, element: ElementHandle, report: FillReport) -> Self {
        ThenSubmit {
            provider,
            element,
            report,
        }
    }

    pub fn report(&self) -> &FillReport {
        &self.report
    }

    pub fn into_report(self) -> FillReport {
        self.report
    }

    /// Submit the form the filled elements belong to.
    pub fn then_submit(self) -> Result<&'a mut ActionProvider<'f, D>> {
        info!(element = self.element.id(), "submit after fill");
        self.provider.submit_element(&self.element)?;
        Ok(self.provider)
    }

    /// Continue with other actions without submitting.
    pub fn and(self) -> &'a mut ActionProvider<'f, D> {
        self.provider
    }
}
