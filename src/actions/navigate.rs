use tracing::info;

use crate::actions::provider::ActionProvider;
use crate::browser::driver::Driver;
use crate::error::{FixtureError, Result};
use crate::trace::trace::JournalEvent;

pub struct NavigateAction<'a, 'f, D: Driver> {
    provider: &'a mut ActionProvider<'f, D>,
}

impl<'a, 'f, D: Driver> NavigateAction<'a, 'f, D> {
    pub(crate) fn new(provider: &'a mut ActionProvider<'f, D>) -> Self {
        NavigateAction { provider }
    }

    /// Open `url`. Relative targets are joined to the configured base URL.
    pub fn to(self, url: &str) -> Result<&'a mut ActionProvider<'f, D>> {
        let target = resolve_url(self.provider.config().base_url.as_deref(), url)?;
        info!(url = %target, "navigate");

        let fixture = self.provider.fixture();
        fixture.driver_mut().navigate(&target)?;
        fixture.journal().log(&JournalEvent::now("navigate").with_value(&target));

        Ok(self.provider)
    }

    pub fn back(self) -> Result<&'a mut ActionProvider<'f, D>> {
        self.provider.fixture().driver_mut().back()?;
        Ok(self.provider)
    }

    pub fn forward(self) -> Result<&'a mut ActionProvider<'f, D>> {
        self.provider.fixture().driver_mut().forward()?;
        Ok(self.provider)
    }

    pub fn refresh(self) -> Result<&'a mut ActionProvider<'f, D>> {
        self.provider.fixture().driver_mut().refresh()?;
        Ok(self.provider)
    }
}

/// Join `url` onto `base` unless it is already absolute.
pub fn resolve_url(base: Option<&str>, url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FixtureError::invalid_argument("url", "url must not be empty"));
    }

    if url.contains("://") || url.starts_with("about:") || url.starts_with("data:") {
        return Ok(url.to_string());
    }

    match base {
        Some(base) => Ok(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            url.trim_start_matches('/')
        )),
        None => Ok(url.to_string()),
    }
}
