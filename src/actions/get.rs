use crate::actions::provider::ActionProvider;
use crate::browser::driver::Driver;
use crate::error::Result;

/// Read-only queries against the current page.
pub struct GetAction<'a, 'f, D: Driver> {
    provider: &'a mut ActionProvider<'f, D>,
}

impl<'a, 'f, D: Driver> GetAction<'a, 'f, D> {
    pub(crate) fn new(provider: &'a mut ActionProvider<'f, D>) -> Self {
        GetAction { provider }
    }

    pub fn page_title(self) -> Result<String> {
        self.provider.fixture().driver_mut().title()
    }

    pub fn current_url(self) -> Result<String> {
        self.provider.fixture().driver_mut().current_url()
    }

    /// Attribute of the first element matching `selector`.
    pub fn attribute(self, selector: &str, name: &str) -> Result<Option<String>> {
        let element = self.provider.find_element(selector)?;
        self.provider.fixture().driver_mut().attribute(&element, name)
    }

    /// `value` attribute of the first match, empty when absent.
    pub fn value(self, selector: &str) -> Result<String> {
        Ok(self.attribute(selector, "value")?.unwrap_or_default())
    }

    pub fn text(self, selector: &str) -> Result<String> {
        let element = self.provider.find_element(selector)?;
        self.provider.fixture().driver_mut().text(&element)
    }
}
