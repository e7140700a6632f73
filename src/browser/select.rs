use crate::browser::driver::{By, Driver, ElementHandle};
use crate::error::{FixtureError, Result};

/// Select-list semantics layered on the plain element API.
///
/// Choosing an option clicks it only when it is not already selected, so a
/// selection that already holds is a no-op on the page.
pub struct SelectElement<'d> {
    driver: &'d mut dyn Driver,
    element: ElementHandle,
    multiple: bool,
}

impl<'d> SelectElement<'d> {
    pub fn new(driver: &'d mut dyn Driver, element: &ElementHandle) -> Result<Self> {
        let tag = driver.tag_name(element)?;
        if !tag.eq_ignore_ascii_case("select") {
            return Err(FixtureError::invalid_argument(
                "element",
                format!("expected a <select> element, found <{}>", tag),
            ));
        }

        let multiple = matches!(
            driver.attribute(element, "multiple")?.as_deref(),
            Some(v) if !v.eq_ignore_ascii_case("false")
        );

        Ok(SelectElement {
            driver,
            element: element.clone(),
            multiple,
        })
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn options(&mut self) -> Result<Vec<ElementHandle>> {
        self.driver.find_elements(&By::tag("option"), Some(&self.element))
    }

    pub fn option_value(&mut self, option: &ElementHandle) -> Result<Option<String>> {
        self.driver.attribute(option, "value")
    }

    pub fn option_text(&mut self, option: &ElementHandle) -> Result<String> {
        Ok(self.driver.text(option)?.trim().to_string())
    }

    pub fn selected_options(&mut self) -> Result<Vec<ElementHandle>> {
        let mut selected = Vec::new();
        for option in self.options()? {
            if self.driver.is_selected(&option)? {
                selected.push(option);
            }
        }
        Ok(selected)
    }

    pub fn select_by_value(&mut self, value: &str) -> Result<()> {
        let mut matched = false;
        for option in self.options()? {
            if self.option_value(&option)?.as_deref() == Some(value) {
                self.set_selected(&option)?;
                matched = true;
                if !self.multiple {
                    break;
                }
            }
        }

        if matched {
            Ok(())
        } else {
            Err(FixtureError::not_found(format!("option[value='{}']", value)))
        }
    }

    pub fn select_by_text(&mut self, text: &str) -> Result<()> {
        let mut matched = false;
        for option in self.options()? {
            if self.option_text(&option)? == text {
                self.set_selected(&option)?;
                matched = true;
                if !self.multiple {
                    break;
                }
            }
        }

        if matched {
            Ok(())
        } else {
            Err(FixtureError::not_found(format!("option with text '{}'", text)))
        }
    }

    pub fn select_by_index(&mut self, index: usize) -> Result<()> {
        let option = self
            .options()?
            .into_iter()
            .nth(index)
            .ok_or_else(|| FixtureError::not_found(format!("option at index {}", index)))?;
        self.set_selected(&option)
    }

    /// Clear every selected option. Only valid for multi-selects.
    pub fn deselect_all(&mut self) -> Result<()> {
        if !self.multiple {
            return Err(FixtureError::invalid_argument(
                "element",
                "you may only deselect all options of a multi-select",
            ));
        }

        for option in self.selected_options()? {
            self.driver.click(&option)?;
        }
        Ok(())
    }

    fn set_selected(&mut self, option: &ElementHandle) -> Result<()> {
        if !self.driver.is_selected(option)? {
            self.driver.click(option)?;
        }
        Ok(())
    }
}
