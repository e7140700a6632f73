use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{FixtureError, Result};
use crate::locator::selector::SelectorAlgorithm;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "web-fixture",
    version,
    about = "Fill and inspect web forms through a live browser session"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Selector algorithm: css, xpath, jquery or auto
    #[arg(long, global = true)]
    pub selector: Option<SelectorAlgorithm>,

    /// Path to the browser server script
    #[arg(long, global = true)]
    pub browser_server: Option<String>,

    /// Path to config file (default: web-fixture.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fill a form, generating values the seed does not provide
    Fill {
        /// Page to open
        #[arg(long)]
        url: String,

        /// Selector of the form (or any container of fields)
        #[arg(long)]
        form: String,

        /// Seed as JSON: an object for per-field values, a scalar for every field
        #[arg(long)]
        seed: Option<String>,

        /// Only use seed values; leave other fields untouched
        #[arg(long, default_value_t = false)]
        seed_only: bool,

        /// Submit the form after filling it
        #[arg(long, default_value_t = false)]
        submit: bool,

        /// Seed for the random generator, for reproducible fills
        #[arg(long)]
        rng_seed: Option<u64>,
    },

    /// Print the current values of a form as JSON
    Extract {
        /// Page to open
        #[arg(long)]
        url: String,

        /// Selector of the form
        #[arg(long)]
        form: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Fixture settings; optionally loaded from `web-fixture.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureConfig {
    #[serde(default)]
    pub selector: SelectorAlgorithm,

    /// Relative navigation targets are joined to this
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// JSONL action journal; disabled when unset
    #[serde(default)]
    pub journal_path: Option<String>,

    #[serde(default = "default_browser_server")]
    pub browser_server: String,

    /// Fixed seed for the random data generator
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            selector: SelectorAlgorithm::Auto,
            base_url: None,
            default_timeout_ms: default_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            journal_path: None,
            browser_server: default_browser_server(),
            rng_seed: None,
        }
    }
}

// Serde default helpers
fn default_timeout_ms() -> u64 { 10_000 }
fn default_poll_interval_ms() -> u64 { 100 }
fn default_browser_server() -> String { crate::browser::session::DEFAULT_BROWSER_SERVER.to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

pub const DEFAULT_CONFIG_PATH: &str = "web-fixture.yaml";

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> FixtureConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match read_config(config_path) {
        Ok(Some(config)) => config,
        Ok(None) => FixtureConfig::default(),
        Err(e) => {
            warn!(error = %e, "ignoring config file");
            FixtureConfig::default()
        }
    }
}

/// Parse a config file. `Ok(None)` when the file does not exist.
pub fn read_config(path: &str) -> Result<Option<FixtureConfig>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(FixtureError::Config(format!("{}: {}", path, e))),
    };

    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| FixtureError::Config(format!("{}: {}", path, e)))
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Apply CLI overrides on top of the file config.
pub fn build_fixture_config(
    mut config: FixtureConfig,
    selector: Option<SelectorAlgorithm>,
    browser_server: Option<&str>,
    rng_seed: Option<u64>,
) -> FixtureConfig {
    if let Some(selector) = selector {
        config.selector = selector;
    }
    if let Some(server) = browser_server {
        config.browser_server = server.to_string();
    }
    if rng_seed.is_some() {
        config.rng_seed = rng_seed;
    }
    config
}
