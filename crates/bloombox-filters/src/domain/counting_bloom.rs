//! # Counting Bloom Filter
//!
//! Replaces bits with 8-bit counters so items can be removed:
//! - Add: increment the k counters (saturating at 255)
//! - Check: true if all k counters > 0
//! - Remove: decrement the k counters, only if all of them are > 0
//!
//! ## Limitations
//!
//! A counter that reached 255 stops counting. Further adds are dropped for
//! that slot, so after enough removes the slot can reach 0 while items that
//! still map to it were never removed. Saturation errs toward "present";
//! callers that need exact counts must not use this structure.
//!
//! Removing an item that was never added but whose counters are all non-zero
//! (a false positive) succeeds and decrements counters owned by other items.

use std::any::Any;

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::config::{sanitize_false_pos_rate, FilterType};
use super::filter::Filter;
use super::hash_functions::{base_hashes, hash_positions};
use super::parameters::{calculate_optimal_parameters, MAX_FILTER_SLOTS};

/// Maximum counter value
pub const MAX_COUNTER: u8 = u8::MAX;

/// Counting Bloom Filter with 8-bit saturating counters.
///
/// Supports both add AND remove operations, unlike standard Bloom filters.
/// All three operations go through one lock; `remove` verifies and
/// decrements inside a single write critical section.
#[derive(Debug)]
pub struct CountingFilter {
    /// Size in counters (m)
    m: usize,
    /// Number of hash functions (k)
    k: usize,
    counters: RwLock<Vec<u8>>,
}

impl CountingFilter {
    /// Create a counting filter with explicit shape.
    ///
    /// Both are floored to 1; `m` is capped at [`MAX_FILTER_SLOTS`].
    pub fn new(m: usize, k: usize) -> Self {
        let m = m.clamp(1, MAX_FILTER_SLOTS);
        let k = k.max(1);
        Self {
            m,
            k,
            counters: RwLock::new(vec![0u8; m]),
        }
    }

    /// Create a counting filter sized exactly like a standard filter would be.
    pub fn with_estimated_params(expected_items: usize, false_pos_rate: f64) -> Self {
        let params =
            calculate_optimal_parameters(expected_items, sanitize_false_pos_rate(false_pos_rate));
        debug!(
            expected_items,
            counters = params.size_bits,
            hash_count = params.hash_count,
            "Counting filter created"
        );
        Self::new(params.size_bits, params.hash_count)
    }

    /// Add an item (increment counters, saturating at [`MAX_COUNTER`]).
    pub fn insert(&self, element: &[u8]) {
        let hashes = base_hashes(element);
        let mut counters = self.counters.write();
        for pos in hash_positions(&hashes, self.k, self.m) {
            let counter = &mut counters[pos];
            if *counter < MAX_COUNTER {
                *counter += 1;
            } else {
                trace!(pos, "Counter saturated, increment dropped");
            }
        }
    }

    /// Check if an item might be in the filter.
    pub fn contains(&self, element: &[u8]) -> bool {
        let hashes = base_hashes(element);
        let counters = self.counters.read();
        hash_positions(&hashes, self.k, self.m).all(|pos| counters[pos] > 0)
    }

    /// Remove an item (decrement counters).
    ///
    /// Returns `false` and changes nothing if any of the item's counters is
    /// already 0: the item was definitely never added (or already removed).
    /// Returns `true` after decrementing all k counters otherwise.
    pub fn remove(&self, element: &[u8]) -> bool {
        let hashes = base_hashes(element);
        let mut counters = self.counters.write();

        if !hash_positions(&hashes, self.k, self.m).all(|pos| counters[pos] > 0) {
            trace!("Remove rejected, item not present");
            return false;
        }

        // A slot visited twice is decremented twice; after saturation it can
        // hold less than the visit count, so floor at 0.
        for pos in hash_positions(&hashes, self.k, self.m) {
            let counter = &mut counters[pos];
            *counter = counter.saturating_sub(1);
        }
        true
    }

    /// The k counter values an item maps to, in hash order.
    pub fn counters_for(&self, element: &[u8]) -> Vec<u8> {
        let hashes = base_hashes(element);
        let counters = self.counters.read();
        hash_positions(&hashes, self.k, self.m)
            .map(|pos| counters[pos])
            .collect()
    }

    /// Number of counters stuck at [`MAX_COUNTER`]
    pub fn saturated_counters(&self) -> usize {
        self.counters
            .read()
            .iter()
            .filter(|&&c| c == MAX_COUNTER)
            .count()
    }

    /// Sum of all counters
    pub fn total_count(&self) -> u64 {
        self.counters.read().iter().map(|&c| c as u64).sum()
    }

    /// Get size in counters
    pub fn size(&self) -> usize {
        self.m
    }

    /// Get number of hash functions.
    pub fn hash_count(&self) -> usize {
        self.k
    }
}

impl Filter for CountingFilter {
    fn add(&self, data: &[u8]) {
        self.insert(data);
    }

    fn check(&self, data: &[u8]) -> bool {
        self.contains(data)
    }

    fn filter_type(&self) -> FilterType {
        FilterType::Counting
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_contains() {
        let filter = CountingFilter::new(1000, 7);

        filter.add(b"test_element");
        assert!(filter.check(b"test_element"));
    }

    #[test]
    fn test_basic_add_check_remove() {
        let filter = CountingFilter::with_estimated_params(100, 0.01);

        filter.add(b"apple");
        filter.add(b"orange");

        assert!(filter.check(b"apple"));
        assert!(filter.check(b"orange"));
        assert!(!filter.check(b"watermelon"));

        assert!(filter.remove(b"apple"), "Removing apple should succeed");
        assert!(!filter.check(b"apple"), "Apple should be removed");
        assert!(filter.check(b"orange"), "Orange should still be present");

        assert!(
            !filter.remove(b"banana"),
            "Removing an item that was never added should fail"
        );
    }

    #[test]
    fn test_remove_absent_leaves_counters_untouched() {
        let filter = CountingFilter::with_estimated_params(100, 0.01);
        filter.add(b"present");
        let total_before = filter.total_count();

        assert!(!filter.remove(b"absent"));
        assert!(!filter.remove(b"absent"));

        assert_eq!(filter.total_count(), total_before);
        assert!(filter.check(b"present"));
    }

    #[test]
    fn test_remove_twice_fails_second_time() {
        let filter = CountingFilter::with_estimated_params(100, 0.01);
        filter.add(b"once");

        assert!(filter.remove(b"once"));
        assert!(!filter.remove(b"once"));
        assert_eq!(filter.total_count(), 0);
    }

    #[test]
    fn test_counter_saturation() {
        let filter = CountingFilter::new(1000, 7);

        for _ in 0..=(MAX_COUNTER as usize) {
            filter.add(b"saturate_me");
        }

        let counters = filter.counters_for(b"saturate_me");
        assert!(
            counters.iter().all(|&c| c == MAX_COUNTER),
            "Counters must stop at 255, got {:?}",
            counters
        );
        assert!(filter.saturated_counters() >= 1);

        // One more add past saturation is dropped
        filter.add(b"saturate_me");
        assert!(filter.counters_for(b"saturate_me").iter().all(|&c| c == MAX_COUNTER));
    }

    #[test]
    fn test_counts_stack_for_repeated_adds() {
        let filter = CountingFilter::new(1000, 3);
        filter.add(b"twice");
        let once: Vec<u8> = filter.counters_for(b"twice");

        filter.add(b"twice");
        let twice = filter.counters_for(b"twice");

        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(*b, a * 2);
        }

        assert!(filter.remove(b"twice"));
        assert!(filter.check(b"twice"), "One copy is still present");
        assert!(filter.remove(b"twice"));
        assert!(!filter.check(b"twice"));
    }

    #[test]
    fn test_sized_like_standard() {
        let counting = CountingFilter::with_estimated_params(100, 0.01);
        let params = calculate_optimal_parameters(100, 0.01);

        assert_eq!(counting.size(), params.size_bits);
        assert_eq!(counting.hash_count(), params.hash_count);
    }

    #[test]
    fn test_empty_item_round_trip() {
        let filter = CountingFilter::new(64, 3);

        filter.add(b"");
        assert!(filter.check(b""));
        assert!(filter.remove(b""));
        assert!(!filter.check(b""));
    }
}
