use thiserror::Error;

pub type Result<T> = std::result::Result<T, FixtureError>;

#[derive(Debug, Error)]
pub enum FixtureError {
    /// A required argument was missing or empty (e.g. an empty selector)
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A lookup that must match at least one element matched none
    #[error("Could not locate any element using selector: {selector}")]
    NotFound { selector: String },

    /// A form value could not be coerced to the target property type
    #[error("Cannot convert value '{value}' of field '{field}' to {target}")]
    Conversion {
        field: String,
        target: String,
        value: String,
    },

    /// A wait condition did not hold before its deadline
    #[error("Timed out after {timeout_ms}ms waiting for {condition}")]
    Timeout { condition: String, timeout_ms: u64 },

    /// The driver reported a failure for a command
    #[error("Driver command '{command}' failed: {error}")]
    Driver { command: String, error: String },

    /// Browser server subprocess failed to spawn
    #[error("Failed to spawn {script} (is Node.js installed?): {source}")]
    SubprocessSpawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to the browser server pipes failed
    #[error("Browser session I/O error: {0}")]
    SessionIO(String),

    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl FixtureError {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        FixtureError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub fn not_found(selector: impl Into<String>) -> Self {
        FixtureError::NotFound {
            selector: selector.into(),
        }
    }

    pub fn driver(command: impl Into<String>, error: impl Into<String>) -> Self {
        FixtureError::Driver {
            command: command.into(),
            error: error.into(),
        }
    }
}
