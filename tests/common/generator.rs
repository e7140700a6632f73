#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use web_fixture::data::generator::{DataGenerator, StringKind};

/// Deterministic generator that counts how often it was asked for a value.
///
/// Always answers `true`, the first index and `"generated-<hint>"`, so
/// tests can tell generated values from seeded ones.
#[derive(Debug, Clone, Default)]
pub struct CountingGenerator {
    calls: Rc<Cell<usize>>,
}

impl CountingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counter; stays readable after the generator is boxed.
    pub fn counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }

    fn bump(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl DataGenerator for CountingGenerator {
    fn next_int(&mut self, min: i64, _max: i64) -> i64 {
        self.bump();
        min
    }

    fn next_bool(&mut self) -> bool {
        self.bump();
        true
    }

    fn next_index(&mut self, len: usize) -> Option<usize> {
        self.bump();
        (len > 0).then_some(0)
    }

    fn generate_string(&mut self, hint: &str, _kind: StringKind) -> String {
        self.bump();
        format!("generated-{}", hint)
    }
}
