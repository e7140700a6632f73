use std::{fs::OpenOptions, io::Write, sync::Mutex};

use tracing::warn;

use crate::trace::trace::JournalEvent;

/// Append-only JSONL journal of fixture actions.
///
/// Problems opening or writing the file are logged and otherwise ignored;
/// the journal never fails a test.
pub struct ActionJournal {
    file: Option<Mutex<std::fs::File>>,
}

impl ActionJournal {
    pub fn new(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => ActionJournal {
                file: Some(Mutex::new(file)),
            },
            Err(e) => {
                warn!(path, error = %e, "could not open action journal");
                Self::disabled()
            }
        }
    }

    /// A journal that records nothing.
    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn log(&self, event: &JournalEvent) {
        let Some(file) = &self.file else {
            return;
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                warn!(action = %event.action, error = %e, "failed to serialize journal event");
                return;
            }
        };

        let written = match file.lock() {
            Ok(mut file) => writeln!(file, "{}", line),
            Err(e) => {
                warn!(error = %e, "action journal lock poisoned");
                return;
            }
        };

        if let Err(e) = written {
            warn!(error = %e, "failed to write journal event");
        }
    }
}
