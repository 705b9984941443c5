use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Prefix;

/// Randomized numbers are drawn from 1..=PRIMARY_MAX
const PRIMARY_MAX: u32 = 999;

/// First number handed out once the randomized range is exhausted
const OVERFLOW_BASE: u32 = 1000;

/// Numbers issued so far for one prefix
#[derive(Debug, Default)]
struct PrefixPool {
    used: HashSet<u32>,
    issued: u32,
}

/// Issues unique pseudonym numbers per prefix. Numbers in [1, 999] are chosen
/// uniformly at random among those not yet issued; once all 999 are taken,
/// allocation continues sequentially from 1000. Different prefixes draw from
/// independent pools, so the same number can appear under two prefixes.
///
/// All state lives in the allocator instance; dropping it discards every
/// assignment, so a new run never repeats the previous run's numbers.
#[derive(Debug)]
pub struct NumberAllocator {
    rng: StdRng,
    pools: HashMap<String, PrefixPool>,
}

impl NumberAllocator {
    /// Create an allocator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            pools: HashMap::new(),
        }
    }

    /// Create an allocator with a fixed seed, for reproducible sequences
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pools: HashMap::new(),
        }
    }

    /// Issue the next number for `prefix`, distinct from all numbers issued
    /// for it so far. Never fails: after the randomized range runs out the
    /// sequential fallback takes over.
    pub fn allocate(&mut self, prefix: &Prefix) -> u32 {
        let pool = self.pools.entry(prefix.as_str().to_string()).or_default();

        let number = if pool.used.len() < PRIMARY_MAX as usize {
            let available: Vec<u32> =
                (1..=PRIMARY_MAX).filter(|n| !pool.used.contains(n)).collect();
            let chosen = available[self.rng.gen_range(0..available.len())];
            pool.used.insert(chosen);
            chosen
        } else {
            OVERFLOW_BASE + (pool.issued - PRIMARY_MAX)
        };

        pool.issued += 1;
        number
    }

    /// Total numbers issued for a prefix so far
    #[allow(dead_code)]
    pub fn issued_count(&self, prefix: &Prefix) -> u32 {
        self.pools.get(prefix.as_str()).map_or(0, |p| p.issued)
    }
}

impl Default for NumberAllocator {
    fn default() -> Self {
        Self::new()
    }
}
