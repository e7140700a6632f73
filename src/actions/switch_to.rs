use tracing::debug;

use crate::actions::provider::ActionProvider;
use crate::browser::driver::Driver;
use crate::error::Result;

pub struct SwitchToAction<'a, 'f, D: Driver> {
    provider: &'a mut ActionProvider<'f, D>,
}

impl<'a, 'f, D: Driver> SwitchToAction<'a, 'f, D> {
    pub(crate) fn new(provider: &'a mut ActionProvider<'f, D>) -> Self {
        SwitchToAction { provider }
    }

    /// Enter the frame matched by `selector`.
    pub fn frame(self, selector: &str) -> Result<&'a mut ActionProvider<'f, D>> {
        let frame = self.provider.find_element(selector)?;
        debug!(selector, "switch to frame");
        self.provider.fixture().driver_mut().switch_to_frame(&frame)?;
        Ok(self.provider)
    }

    pub fn parent_frame(self) -> Result<&'a mut ActionProvider<'f, D>> {
        self.provider.fixture().driver_mut().switch_to_parent_frame()?;
        Ok(self.provider)
    }

    pub fn default_content(self) -> Result<&'a mut ActionProvider<'f, D>> {
        self.provider.fixture().driver_mut().switch_to_default_content()?;
        Ok(self.provider)
    }

    pub fn window(self, name: &str) -> Result<&'a mut ActionProvider<'f, D>> {
        debug!(name, "switch to window");
        self.provider.fixture().driver_mut().switch_to_window(name)?;
        Ok(self.provider)
    }
}
