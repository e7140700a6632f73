//! In-memory DOM implementing `Driver`, for exercising the fixture without a browser.
//!
//! Supports enough CSS for the tests: comma lists of `tag`, `#id`,
//! `tag#id`, `[attr]` and `[attr='value']`, matched against descendants
//! of the scope. Clicks toggle checkboxes, select radios within their
//! group and pick options, the way a browser would.

#![allow(dead_code)]

use std::collections::BTreeMap;

use serde_json::Value;
use web_fixture::browser::driver::{By, Driver, ElementHandle};
use web_fixture::error::{FixtureError, Result};

#[derive(Debug, Clone)]
struct Node {
    handle: ElementHandle,
    tag: String,
    attrs: BTreeMap<String, String>,
    parent: Option<usize>,
    selected: bool,
    text: String,
}

#[derive(Debug, Default)]
pub struct FakeDom {
    nodes: Vec<Node>,

    pub url: String,
    pub title: String,
    history: Vec<String>,
    history_pos: usize,

    /// Every element clicked, in order (handle ids).
    pub clicks: Vec<String>,
    pub double_clicks: Vec<String>,
    pub moves: Vec<(String, Option<(i32, i32)>)>,
    /// `(handle id, text)` for every `send_keys`.
    pub typed: Vec<(String, String)>,
    pub submits: Vec<String>,
    pub navigations: Vec<String>,
    pub scripts: Vec<String>,
    pub switches: Vec<String>,
    /// Every lookup issued, in order.
    pub lookups: Vec<By>,

    /// Results returned by successive `execute_script` calls; the last
    /// one repeats. `true` when empty.
    pub script_results: Vec<Value>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent` (or the document root).
    pub fn add(&mut self, parent: Option<&ElementHandle>, tag: &str, attrs: &[(&str, &str)]) -> ElementHandle {
        let handle = ElementHandle::new(format!("e{}", self.nodes.len()));
        let parent = parent.map(|p| self.index(p).expect("parent exists"));
        let attrs: BTreeMap<String, String> = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let selected = attrs.contains_key("checked") || attrs.contains_key("selected");

        self.nodes.push(Node {
            handle: handle.clone(),
            tag: tag.to_ascii_lowercase(),
            attrs,
            parent,
            selected,
            text: String::new(),
        });
        handle
    }

    /// Append an `<option>` with both a value and visible text.
    pub fn option(&mut self, select: &ElementHandle, value: &str, text: &str) -> ElementHandle {
        let option = self.add(Some(select), "option", &[("value", value)]);
        self.set_text(&option, text);
        option
    }

    pub fn set_text(&mut self, element: &ElementHandle, text: &str) {
        let idx = self.index(element).expect("element exists");
        self.nodes[idx].text = text.to_string();
    }

    pub fn set_attr(&mut self, element: &ElementHandle, name: &str, value: &str) {
        let idx = self.index(element).expect("element exists");
        self.nodes[idx].attrs.insert(name.to_string(), value.to_string());
    }

    pub fn remove(&mut self, element: &ElementHandle) {
        let idx = self.index(element).expect("element exists");
        self.nodes[idx].tag = "#removed".into();
        self.nodes[idx].parent = None;
    }

    pub fn value_of(&self, element: &ElementHandle) -> String {
        self.index(element)
            .and_then(|idx| self.nodes[idx].attrs.get("value").cloned())
            .unwrap_or_default()
    }

    pub fn selected(&self, element: &ElementHandle) -> bool {
        self.index(element).is_some_and(|idx| self.nodes[idx].selected)
    }

    /// Value of the selected option of a select.
    pub fn selected_option_value(&self, select: &ElementHandle) -> Option<String> {
        let sidx = self.index(select)?;
        self.nodes
            .iter()
            .filter(|n| n.parent == Some(sidx) && n.tag == "option" && n.selected)
            .map(|n| n.attrs.get("value").cloned().unwrap_or_default())
            .next()
    }

    fn index(&self, element: &ElementHandle) -> Option<usize> {
        self.nodes.iter().position(|n| &n.handle == element)
    }

    fn node(&self, element: &ElementHandle, command: &str) -> Result<usize> {
        self.index(element)
            .filter(|&idx| self.nodes[idx].tag != "#removed")
            .ok_or_else(|| FixtureError::driver(command, format!("stale element {}", element.id())))
    }

    fn is_descendant(&self, mut idx: usize, ancestor: usize) -> bool {
        while let Some(parent) = self.nodes[idx].parent {
            if parent == ancestor {
                return true;
            }
            idx = parent;
        }
        false
    }

    fn matches_css(node: &Node, selector: &str) -> bool {
        let mut rest = selector.trim();

        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '*'))
            .unwrap_or(rest.len());
        let (tag, tail) = rest.split_at(tag_len);
        if !tag.is_empty() && tag != "*" && !tag.eq_ignore_ascii_case(&node.tag) {
            return false;
        }
        rest = tail;

        if let Some(tail) = rest.strip_prefix('#') {
            let end = tail.find('[').unwrap_or(tail.len());
            if node.attrs.get("id").map(String::as_str) != Some(&tail[..end]) {
                return false;
            }
            rest = &tail[end..];
        }

        while let Some(tail) = rest.strip_prefix('[') {
            let Some(end) = tail.find(']') else {
                return false;
            };
            let condition = &tail[..end];
            let ok = match condition.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim_matches(|c| c == '\'' || c == '"');
                    node.attrs.get(name.trim()).map(String::as_str) == Some(value)
                }
                None => node.attrs.contains_key(condition.trim()),
            };
            if !ok {
                return false;
            }
            rest = &tail[end + 1..];
        }

        rest.is_empty()
    }

    fn matches(node: &Node, by: &By) -> bool {
        match by {
            By::Css(selector) => selector.split(',').any(|s| Self::matches_css(node, s)),
            By::TagName(tag) => node.tag.eq_ignore_ascii_case(tag),
            By::Id(id) => node.attrs.get("id") == Some(id),
            By::Name(name) => node.attrs.get("name") == Some(name),
            By::XPath(_) | By::JQuery(_) => false,
        }
    }

    fn click_node(&mut self, idx: usize) {
        let tag = self.nodes[idx].tag.clone();
        let input_type = self.nodes[idx].attrs.get("type").cloned().unwrap_or_default();

        match (tag.as_str(), input_type.as_str()) {
            ("input", "checkbox") => self.nodes[idx].selected = !self.nodes[idx].selected,
            ("input", "radio") => {
                let name = self.nodes[idx].attrs.get("name").cloned();
                for node in self.nodes.iter_mut() {
                    if node.tag == "input"
                        && node.attrs.get("type").map(String::as_str) == Some("radio")
                        && name.is_some()
                        && node.attrs.get("name") == name.as_ref()
                    {
                        node.selected = false;
                    }
                }
                self.nodes[idx].selected = true;
            }
            ("option", _) => {
                let parent = self.nodes[idx].parent;
                let multiple = parent.is_some_and(|p| self.nodes[p].attrs.contains_key("multiple"));
                if multiple {
                    self.nodes[idx].selected = !self.nodes[idx].selected;
                } else {
                    for node in self.nodes.iter_mut().filter(|n| n.parent == parent && n.tag == "option") {
                        node.selected = false;
                    }
                    self.nodes[idx].selected = true;
                }
            }
            _ => {}
        }
    }

    fn go_to(&mut self, url: &str) {
        self.history.truncate(self.history_pos);
        self.history.push(url.to_string());
        self.history_pos = self.history.len();
        self.url = url.to_string();
    }
}

impl Driver for FakeDom {
    fn find_elements(&mut self, by: &By, scope: Option<&ElementHandle>) -> Result<Vec<ElementHandle>> {
        self.lookups.push(by.clone());
        let scope = match scope {
            Some(scope) => Some(self.node(scope, "find")?),
            None => None,
        };

        Ok(self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.tag != "#removed")
            .filter(|(idx, _)| scope.is_none_or(|s| self.is_descendant(*idx, s)))
            .filter(|(_, n)| Self::matches(n, by))
            .map(|(_, n)| n.handle.clone())
            .collect())
    }

    fn tag_name(&mut self, element: &ElementHandle) -> Result<String> {
        let idx = self.node(element, "tagName")?;
        Ok(self.nodes[idx].tag.clone())
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> Result<Option<String>> {
        let idx = self.node(element, "attribute")?;
        Ok(self.nodes[idx].attrs.get(name).cloned())
    }

    fn text(&mut self, element: &ElementHandle) -> Result<String> {
        let idx = self.node(element, "text")?;
        Ok(self.nodes[idx].text.clone())
    }

    fn is_selected(&mut self, element: &ElementHandle) -> Result<bool> {
        let idx = self.node(element, "isSelected")?;
        Ok(self.nodes[idx].selected)
    }

    fn is_displayed(&mut self, element: &ElementHandle) -> Result<bool> {
        self.node(element, "isDisplayed")?;
        Ok(true)
    }

    fn click(&mut self, element: &ElementHandle) -> Result<()> {
        let idx = self.node(element, "click")?;
        self.clicks.push(element.id().to_string());
        self.click_node(idx);
        Ok(())
    }

    fn double_click(&mut self, element: &ElementHandle) -> Result<()> {
        self.node(element, "doubleClick")?;
        self.double_clicks.push(element.id().to_string());
        Ok(())
    }

    fn move_to(&mut self, element: &ElementHandle, offset: Option<(i32, i32)>) -> Result<()> {
        self.node(element, "moveTo")?;
        self.moves.push((element.id().to_string(), offset));
        Ok(())
    }

    fn clear(&mut self, element: &ElementHandle) -> Result<()> {
        let idx = self.node(element, "clear")?;
        self.nodes[idx].attrs.insert("value".into(), String::new());
        Ok(())
    }

    fn send_keys(&mut self, element: &ElementHandle, text: &str) -> Result<()> {
        let idx = self.node(element, "sendKeys")?;
        self.nodes[idx].attrs.entry("value".into()).or_default().push_str(text);
        self.typed.push((element.id().to_string(), text.to_string()));
        Ok(())
    }

    fn submit(&mut self, element: &ElementHandle) -> Result<()> {
        self.node(element, "submit")?;
        self.submits.push(element.id().to_string());
        Ok(())
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());
        self.go_to(url);
        Ok(())
    }

    fn back(&mut self) -> Result<()> {
        if self.history_pos > 1 {
            self.history_pos -= 1;
            self.url = self.history[self.history_pos - 1].clone();
        }
        Ok(())
    }

    fn forward(&mut self) -> Result<()> {
        if self.history_pos < self.history.len() {
            self.history_pos += 1;
            self.url = self.history[self.history_pos - 1].clone();
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.navigations.push(self.url.clone());
        Ok(())
    }

    fn current_url(&mut self) -> Result<String> {
        Ok(self.url.clone())
    }

    fn title(&mut self) -> Result<String> {
        Ok(self.title.clone())
    }

    fn switch_to_frame(&mut self, frame: &ElementHandle) -> Result<()> {
        self.node(frame, "switchToFrame")?;
        self.switches.push(format!("frame:{}", frame.id()));
        Ok(())
    }

    fn switch_to_parent_frame(&mut self) -> Result<()> {
        self.switches.push("parent".into());
        Ok(())
    }

    fn switch_to_default_content(&mut self) -> Result<()> {
        self.switches.push("default".into());
        Ok(())
    }

    fn switch_to_window(&mut self, name: &str) -> Result<()> {
        self.switches.push(format!("window:{}", name));
        Ok(())
    }

    fn execute_script(&mut self, script: &str, _args: &[Value]) -> Result<Value> {
        self.scripts.push(script.to_string());
        let result = match self.script_results.len() {
            0 => Value::Bool(true),
            1 => self.script_results[0].clone(),
            _ => self.script_results.remove(0),
        };
        Ok(result)
    }
}

/// The sign-up form used across the fill and extract tests:
/// text `name`, checkbox `agree`, select `color` (red/blue) and radio
/// group `size` (S/L).
pub struct SignupForm {
    pub form: ElementHandle,
    pub name: ElementHandle,
    pub agree: ElementHandle,
    pub color: ElementHandle,
    pub size_s: ElementHandle,
    pub size_l: ElementHandle,
}

pub fn signup_form(dom: &mut FakeDom) -> SignupForm {
    let form = dom.add(None, "form", &[("id", "signup")]);
    let name = dom.add(Some(&form), "input", &[("id", "name"), ("type", "text")]);
    let agree = dom.add(Some(&form), "input", &[("id", "agree"), ("type", "checkbox")]);
    let color = dom.add(Some(&form), "select", &[("id", "color")]);
    dom.option(&color, "red", "Red");
    dom.option(&color, "blue", "Blue");
    let size_s = dom.add(Some(&form), "input", &[("name", "size"), ("type", "radio"), ("value", "S")]);
    let size_l = dom.add(Some(&form), "input", &[("name", "size"), ("type", "radio"), ("value", "L")]);

    SignupForm {
        form,
        name,
        agree,
        color,
        size_s,
        size_l,
    }
}
