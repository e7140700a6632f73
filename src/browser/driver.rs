use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FixtureError, Result};

/// Opaque reference to one DOM node, assigned by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(String);

impl ElementHandle {
    pub fn new(id: impl Into<String>) -> Self {
        ElementHandle(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Driver-native lookup strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    #[serde(rename = "css")]
    Css(String),
    #[serde(rename = "xpath")]
    XPath(String),
    #[serde(rename = "jquery")]
    JQuery(String),
    #[serde(rename = "tag")]
    TagName(String),
    #[serde(rename = "id")]
    Id(String),
    #[serde(rename = "name")]
    Name(String),
}

impl By {
    pub fn css(selector: impl Into<String>) -> Self {
        By::Css(selector.into())
    }

    pub fn xpath(selector: impl Into<String>) -> Self {
        By::XPath(selector.into())
    }

    pub fn tag(name: impl Into<String>) -> Self {
        By::TagName(name.into())
    }

    /// The raw selector text, without the strategy.
    pub fn selector(&self) -> &str {
        match self {
            By::Css(s) | By::XPath(s) | By::JQuery(s) | By::TagName(s) | By::Id(s) | By::Name(s) => s,
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            By::Css(s) => write!(f, "css '{}'", s),
            By::XPath(s) => write!(f, "xpath '{}'", s),
            By::JQuery(s) => write!(f, "jquery '{}'", s),
            By::TagName(s) => write!(f, "tag '{}'", s),
            By::Id(s) => write!(f, "id '{}'", s),
            By::Name(s) => write!(f, "name '{}'", s),
        }
    }
}

/// Synchronous browser-driver capability consumed by the fixture.
///
/// Every call blocks until the browser confirms completion. Failures are
/// returned as-is to the caller; nothing above this trait retries.
pub trait Driver {
    /// Find all elements matching `by`, searching below `scope` when given,
    /// otherwise the whole document. Results are in document order.
    fn find_elements(&mut self, by: &By, scope: Option<&ElementHandle>) -> Result<Vec<ElementHandle>>;

    /// Find the first element matching `by`, or fail with `NotFound`.
    fn find_element(&mut self, by: &By, scope: Option<&ElementHandle>) -> Result<ElementHandle> {
        self.find_elements(by, scope)?
            .into_iter()
            .next()
            .ok_or_else(|| FixtureError::not_found(by.to_string()))
    }

    fn tag_name(&mut self, element: &ElementHandle) -> Result<String>;

    /// Current value of an attribute or property; `None` when absent.
    fn attribute(&mut self, element: &ElementHandle, name: &str) -> Result<Option<String>>;

    /// Visible text of the element.
    fn text(&mut self, element: &ElementHandle) -> Result<String>;

    /// Checked state for checkboxes/radios, selected state for options.
    fn is_selected(&mut self, element: &ElementHandle) -> Result<bool>;

    fn is_displayed(&mut self, element: &ElementHandle) -> Result<bool>;

    fn click(&mut self, element: &ElementHandle) -> Result<()>;

    fn double_click(&mut self, element: &ElementHandle) -> Result<()>;

    /// Move the pointer over the element, optionally offset from its top-left corner.
    fn move_to(&mut self, element: &ElementHandle, offset: Option<(i32, i32)>) -> Result<()>;

    fn clear(&mut self, element: &ElementHandle) -> Result<()>;

    fn send_keys(&mut self, element: &ElementHandle, text: &str) -> Result<()>;

    /// Submit the form enclosing the element.
    fn submit(&mut self, element: &ElementHandle) -> Result<()>;

    fn navigate(&mut self, url: &str) -> Result<()>;

    fn back(&mut self) -> Result<()>;

    fn forward(&mut self) -> Result<()>;

    fn refresh(&mut self) -> Result<()>;

    fn current_url(&mut self) -> Result<String>;

    fn title(&mut self) -> Result<String>;

    fn switch_to_frame(&mut self, frame: &ElementHandle) -> Result<()>;

    fn switch_to_parent_frame(&mut self) -> Result<()>;

    fn switch_to_default_content(&mut self) -> Result<()>;

    fn switch_to_window(&mut self, name: &str) -> Result<()>;

    /// Run a script in the page and return its JSON-encoded result.
    fn execute_script(&mut self, script: &str, args: &[Value]) -> Result<Value>;
}
