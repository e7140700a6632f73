use rand::distributions::{Alphanumeric, DistString};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const MIN_STRING_LEN: usize = 8;
const MAX_STRING_LEN: usize = 16;

/// Character class of a generated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringKind {
    #[default]
    AlphaNumeric,
    Alpha,
    Numeric,
}

/// Source of fallback values for fields a seed does not cover.
pub trait DataGenerator {
    /// Uniform integer in `[min, max)`. Returns `min` when the range is empty.
    fn next_int(&mut self, min: i64, max: i64) -> i64;

    fn next_bool(&mut self) -> bool;

    /// Uniform index into a sequence of `len` items, `None` when empty.
    fn next_index(&mut self, len: usize) -> Option<usize>;

    /// Random string. `hint` names the field the value is for and may be
    /// empty; implementations are free to ignore it.
    fn generate_string(&mut self, hint: &str, kind: StringKind) -> String;
}

impl dyn DataGenerator + '_ {
    /// Uniformly pick one item of `items`.
    pub fn next_in_set<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.next_index(items.len()).and_then(|idx| items.get(idx))
    }
}

/// `DataGenerator` over `rand`'s `StdRng`.
pub struct RandomDataGenerator {
    rng: StdRng,
}

impl RandomDataGenerator {
    pub fn new() -> Self {
        RandomDataGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator for repeatable test runs.
    pub fn seeded(seed: u64) -> Self {
        RandomDataGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DataGenerator for RandomDataGenerator {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    fn next_bool(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn next_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.rng.gen_range(0..len))
        }
    }

    fn generate_string(&mut self, _hint: &str, kind: StringKind) -> String {
        let len = self.rng.gen_range(MIN_STRING_LEN..=MAX_STRING_LEN);
        match kind {
            StringKind::AlphaNumeric => Alphanumeric.sample_string(&mut self.rng, len),
            StringKind::Alpha => (0..len)
                .map(|_| {
                    let offset = self.rng.gen_range(0..52u8);
                    if offset < 26 {
                        (b'a' + offset) as char
                    } else {
                        (b'A' + offset - 26) as char
                    }
                })
                .collect(),
            StringKind::Numeric => (0..len)
                .map(|_| (b'0' + self.rng.gen_range(0..10u8)) as char)
                .collect(),
        }
    }
}
