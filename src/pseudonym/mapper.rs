use std::collections::{BTreeMap, HashMap};

use crate::types::Prefix;

use super::NumberAllocator;

/// In-memory value mapper for a single pseudonymization session.
///
/// The first time a (prefix, value) pair is seen, a random number is drawn
/// from the allocator and the pseudonym is cached; every later lookup of the
/// same pair returns the cached label. Nothing is persisted: a new session
/// assigns fresh random numbers to the same values.
#[derive(Debug)]
pub struct SessionMapper {
    allocator: NumberAllocator,
    mappings: HashMap<String, HashMap<String, String>>,
}

impl SessionMapper {
    /// Create a mapper whose allocator is seeded from OS entropy
    pub fn new() -> Self {
        Self {
            allocator: NumberAllocator::new(),
            mappings: HashMap::new(),
        }
    }

    /// Create a mapper with a fixed allocator seed, for reproducible labels
    pub fn from_seed(seed: u64) -> Self {
        Self {
            allocator: NumberAllocator::from_seed(seed),
            mappings: HashMap::new(),
        }
    }

    /// Return the pseudonym for `value` under `prefix`, assigning a new one
    /// on first sight. Callers must not pass missing values; the transformer
    /// filters them out before this point.
    pub fn map(&mut self, prefix: &Prefix, value: &str) -> String {
        let table = self
            .mappings
            .entry(prefix.as_str().to_string())
            .or_default();

        if let Some(pseudonym) = table.get(value) {
            return pseudonym.clone();
        }

        let number = self.allocator.allocate(prefix);
        let pseudonym = format_pseudonym(prefix, number);
        table.insert(value.to_string(), pseudonym.clone());
        pseudonym
    }

    /// Distinct values mapped under each prefix this session
    pub fn summary(&self) -> BTreeMap<String, usize> {
        self.mappings
            .iter()
            .map(|(prefix, table)| (prefix.clone(), table.len()))
            .collect()
    }
}

impl Default for SessionMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a pseudonym label. Numbers are zero-padded to three digits; the
/// sequential fallback range (1000 and up) renders at natural width.
fn format_pseudonym(prefix: &Prefix, number: u32) -> String {
    format!("{}_{:03}", prefix, number)
}
