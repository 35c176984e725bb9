//! Standard (fixed-capacity) Bloom filter
//!
//! INVARIANTS:
//! - No false negatives: after `add(x)`, `check(x)` returns true forever
//! - Shape (m, k) is fixed at construction; only bit values change

use std::any::Any;

use bitvec::prelude::*;
use parking_lot::RwLock;
use tracing::debug;

use super::config::{sanitize_false_pos_rate, FilterType};
use super::filter::Filter;
use super::hash_functions::{base_hashes, hash_positions};
use super::parameters::{calculate_fpr, calculate_optimal_parameters, MAX_FILTER_SLOTS};

/// Mutable part of the filter, guarded by one lock
#[derive(Debug)]
struct BitState {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Number of add calls (n)
    n: usize,
}

/// Bloom filter over a fixed-size bit array
///
/// `add` takes the write lock and `check` the read lock, so checks never
/// observe a half-written item.
#[derive(Debug)]
pub struct StandardFilter {
    /// Size in bits (m)
    m: usize,
    /// Number of hash functions (k)
    k: usize,
    state: RwLock<BitState>,
}

impl StandardFilter {
    /// Create a filter with explicit shape
    ///
    /// # Arguments
    /// * `m` - Size in bits (clamped to `1..=MAX_FILTER_SLOTS`)
    /// * `k` - Number of hash functions (floored to 1)
    pub fn new(m: usize, k: usize) -> Self {
        let m = m.clamp(1, MAX_FILTER_SLOTS);
        let k = k.max(1);
        Self {
            m,
            k,
            state: RwLock::new(BitState {
                bits: bitvec![u8, Lsb0; 0; m],
                n: 0,
            }),
        }
    }

    /// Create a filter sized for `expected_items` at `false_pos_rate`
    pub fn with_estimated_params(expected_items: usize, false_pos_rate: f64) -> Self {
        let params =
            calculate_optimal_parameters(expected_items, sanitize_false_pos_rate(false_pos_rate));
        debug!(
            expected_items,
            size_bits = params.size_bits,
            hash_count = params.hash_count,
            "Standard filter created"
        );
        Self::new(params.size_bits, params.hash_count)
    }

    /// Insert an item. Re-adding an item leaves the bits unchanged.
    pub fn insert(&self, element: &[u8]) {
        let hashes = base_hashes(element);
        let mut state = self.state.write();
        for pos in hash_positions(&hashes, self.k, self.m) {
            state.bits.set(pos, true);
        }
        state.n += 1;
    }

    /// Test if an item might be in the filter
    ///
    /// Returns:
    /// - `true` if the item might be in the set (could be false positive)
    /// - `false` if the item is definitely NOT in the set
    pub fn contains(&self, element: &[u8]) -> bool {
        let hashes = base_hashes(element);
        let state = self.state.read();
        hash_positions(&hashes, self.k, self.m).all(|pos| state.bits[pos])
    }

    /// Current estimated false positive rate, from the number of adds so far
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    pub fn false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.state.read().n, self.k)
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.state.read().bits.count_ones()
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Get the number of add calls
    pub fn elements_inserted(&self) -> usize {
        self.state.read().n
    }
}

impl Filter for StandardFilter {
    fn add(&self, data: &[u8]) {
        self.insert(data);
    }

    fn check(&self, data: &[u8]) -> bool {
        self.contains(data)
    }

    fn filter_type(&self) -> FilterType {
        FilterType::Standard
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
