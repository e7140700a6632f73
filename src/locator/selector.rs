use serde::{Deserialize, Serialize};

use crate::browser::driver::By;
use crate::error::{FixtureError, Result};

/// How string selectors passed to the fixture are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorAlgorithm {
    Css,
    XPath,
    JQuery,
    #[default]
    Auto,
}

impl std::str::FromStr for SelectorAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "css" => Ok(SelectorAlgorithm::Css),
            "xpath" => Ok(SelectorAlgorithm::XPath),
            "jquery" => Ok(SelectorAlgorithm::JQuery),
            "auto" => Ok(SelectorAlgorithm::Auto),
            other => Err(format!("unknown selector algorithm '{}'", other)),
        }
    }
}

/// Pseudo selectors that only jQuery understands.
const JQUERY_PSEUDOS: &[&str] = &[
    ":eq(",
    ":gt(",
    ":lt(",
    ":first",
    ":last",
    ":even",
    ":odd",
    ":contains(",
    ":visible",
    ":hidden",
    ":input",
    ":checkbox",
    ":radio",
    ":selected",
    ":text",
    ":button",
    ":submit",
    ":password",
    ":header",
    ":animated",
    ":parent",
];

/// Translate a string selector into a driver lookup.
pub fn to_by(selector: &str, algorithm: SelectorAlgorithm) -> Result<By> {
    if selector.trim().is_empty() {
        return Err(FixtureError::invalid_argument("selector", "selector must not be empty"));
    }

    let by = match algorithm {
        SelectorAlgorithm::Css => By::Css(selector.to_string()),
        SelectorAlgorithm::XPath => By::XPath(selector.to_string()),
        SelectorAlgorithm::JQuery => By::JQuery(selector.to_string()),
        SelectorAlgorithm::Auto => detect(selector),
    };

    Ok(by)
}

/// Pick a lookup strategy from the shape of the selector.
pub fn detect(selector: &str) -> By {
    let trimmed = selector.trim_start();

    if is_xpath(trimmed) {
        By::XPath(selector.to_string())
    } else if is_jquery(trimmed) {
        By::JQuery(selector.to_string())
    } else {
        By::Css(selector.to_string())
    }
}

fn is_xpath(selector: &str) -> bool {
    selector.starts_with('/')
        || selector.starts_with("./")
        || selector.starts_with("..")
        || selector.starts_with('(')
}

fn is_jquery(selector: &str) -> bool {
    let lower = selector.to_ascii_lowercase();
    JQUERY_PSEUDOS.iter().any(|pseudo| {
        lower.match_indices(pseudo).any(|(idx, _)| {
            // `:first` must not match `:first-child`, `:last` not `:last-of-type`, ...
            let rest = &lower[idx + pseudo.len()..];
            pseudo.ends_with('(') || !rest.starts_with('-')
        })
    })
}
