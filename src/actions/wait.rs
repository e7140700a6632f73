use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::actions::provider::ActionProvider;
use crate::browser::driver::Driver;
use crate::error::{FixtureError, Result};
use crate::locator::selector::to_by;

/// Script that reports whether jQuery has no requests in flight. Pages
/// without jQuery count as idle.
pub const AJAX_IDLE_SCRIPT: &str =
    "return (typeof jQuery === 'undefined') || jQuery.active == 0;";

/// Poll `check` until it returns true or `timeout` elapses.
///
/// The condition is evaluated at least once, even with a zero timeout.
pub fn wait_until<F>(
    driver: &mut dyn Driver,
    condition: &str,
    timeout: Duration,
    poll: Duration,
    mut check: F,
) -> Result<()>
where
    F: FnMut(&mut dyn Driver) -> Result<bool>,
{
    let start = Instant::now();
    // Too far out to represent: poll until the check passes.
    let deadline = start.checked_add(timeout);

    loop {
        if check(&mut *driver)? {
            debug!(condition, elapsed_ms = start.elapsed().as_millis() as u64, "wait satisfied");
            return Ok(());
        }

        let Some(deadline) = deadline else {
            thread::sleep(poll);
            continue;
        };

        let now = Instant::now();
        if now >= deadline {
            return Err(FixtureError::Timeout {
                condition: condition.to_string(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            });
        }

        thread::sleep(poll.min(deadline - now));
    }
}

/// Wait until the page has no outstanding jQuery requests.
pub fn wait_for_ajax(driver: &mut dyn Driver, timeout: Duration, poll: Duration) -> Result<()> {
    wait_until(driver, "ajax to finish", timeout, poll, |driver| {
        Ok(driver.execute_script(AJAX_IDLE_SCRIPT, &[])?.as_bool().unwrap_or(false))
    })
}

pub struct WaitAction<'a, 'f, D: Driver> {
    provider: &'a mut ActionProvider<'f, D>,
    timeout: Duration,
    poll: Duration,
}

impl<'a, 'f, D: Driver> WaitAction<'a, 'f, D> {
    pub(crate) fn new(provider: &'a mut ActionProvider<'f, D>) -> Self {
        let config = provider.config();
        let timeout = Duration::from_millis(config.default_timeout_ms);
        let poll = Duration::from_millis(config.poll_interval_ms);

        WaitAction {
            provider,
            timeout,
            poll,
        }
    }

    /// Override the configured timeout for this wait.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn until<F>(self, condition: &str, check: F) -> Result<&'a mut ActionProvider<'f, D>>
    where
        F: FnMut(&mut dyn Driver) -> Result<bool>,
    {
        wait_until(
            self.provider.fixture().driver_mut(),
            condition,
            self.timeout,
            self.poll,
            check,
        )?;
        Ok(self.provider)
    }

    /// Wait until at least one element matches `selector`.
    pub fn for_element(self, selector: &str) -> Result<&'a mut ActionProvider<'f, D>> {
        let by = to_by(selector, self.provider.config().selector)?;
        let condition = format!("element '{}'", selector);
        self.until(&condition, |driver| Ok(!driver.find_elements(&by, None)?.is_empty()))
    }

    /// Wait until no element matches `selector`.
    pub fn for_element_to_vanish(self, selector: &str) -> Result<&'a mut ActionProvider<'f, D>> {
        let by = to_by(selector, self.provider.config().selector)?;
        let condition = format!("element '{}' to vanish", selector);
        self.until(&condition, |driver| Ok(driver.find_elements(&by, None)?.is_empty()))
    }

    pub fn for_ajax(self) -> Result<&'a mut ActionProvider<'f, D>> {
        wait_for_ajax(self.provider.fixture().driver_mut(), self.timeout, self.poll)?;
        Ok(self.provider)
    }

    pub fn for_duration(self, duration: Duration) -> &'a mut ActionProvider<'f, D> {
        thread::sleep(duration);
        self.provider
    }
}
