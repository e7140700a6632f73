use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::actions::fixture::Fixture;
use crate::actions::wait::wait_for_ajax;
use crate::browser::driver::{Driver, ElementHandle};
use crate::error::Result;
use crate::form::autofill::{AutoFill, FillPolicy, FillReport};
use crate::form::extract::{FormData, extract_form_data, map_form_values};
use crate::form::seed::Seed;
use crate::trace::trace::JournalEvent;

/// Convenience handle around one form element.
pub struct FormWrapper<'f, D: Driver> {
    fixture: &'f mut Fixture<D>,
    form: ElementHandle,
}

impl<'f, D: Driver> FormWrapper<'f, D> {
    pub fn new(fixture: &'f mut Fixture<D>, form: ElementHandle) -> Self {
        FormWrapper { fixture, form }
    }

    pub fn element(&self) -> &ElementHandle {
        &self.form
    }

    /// Write only the values the seed provides.
    pub fn fill_with(&mut self, seed: &Seed) -> Result<FillReport> {
        self.run(seed, FillPolicy::SeedOnly)
    }

    /// Fill every field with generated data.
    pub fn auto_fill(&mut self) -> Result<FillReport> {
        self.run(&Seed::Empty, FillPolicy::AutoFill)
    }

    /// Fill every field, preferring values from the seed.
    pub fn auto_fill_seed_with(&mut self, seed: &Seed) -> Result<FillReport> {
        self.run(seed, FillPolicy::AutoFill)
    }

    fn run(&mut self, seed: &Seed, policy: FillPolicy) -> Result<FillReport> {
        let (driver, data, journal) = self.fixture.parts();
        AutoFill::new(driver, data, seed)
            .policy(policy)
            .journal(journal)
            .perform(std::slice::from_ref(&self.form))
    }

    pub fn submit(&mut self) -> Result<()> {
        info!(form = self.form.id(), "submit form");
        self.fixture.driver_mut().submit(&self.form)?;
        self.fixture
            .journal()
            .log(&JournalEvent::now("submit").with_value(self.form.id()));
        Ok(())
    }

    /// Submit, then wait for the page's ajax requests to settle.
    pub fn ajax_submit(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.submit()?;
        let config = self.fixture.config();
        let timeout = timeout.unwrap_or(Duration::from_millis(config.default_timeout_ms));
        let poll = Duration::from_millis(config.poll_interval_ms);
        wait_for_ajax(self.fixture.driver_mut(), timeout, poll)
    }

    pub fn form_data(&mut self) -> Result<FormData> {
        extract_form_data(self.fixture.driver_mut(), &self.form)
    }

    /// Read the form and map it onto `T` by property name.
    pub fn form_data_as<T>(&mut self) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let data = self.form_data()?;
        map_form_values(&data)
    }
}
