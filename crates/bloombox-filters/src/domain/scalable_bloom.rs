//! # Scalable Bloom Filter
//!
//! A sequence of standard filters ("segments"). Only the newest segment
//! receives adds; once it holds `current_capacity` items a new segment is
//! appended with:
//! - capacity = round(current_capacity * growth_factor), at least one more
//!   than before and at most [`MAX_FILTER_SLOTS`]
//! - false positive rate = current rate * [`TIGHTENING_RATIO`]
//!
//! ## Aggregate false positive rate
//!
//! A check is an OR over all segments, so the aggregate rate is
//! `1 - Π(1 - p_i) ≈ Σ p_i`. Shrinking each new segment's rate keeps that sum
//! from growing linearly with the segment count. The 0.9 ratio is a
//! heuristic approximation, not a derived bound.

use std::any::Any;

use parking_lot::RwLock;
use tracing::debug;

use super::config::{
    sanitize_false_pos_rate, sanitize_growth_factor, FilterType, DEFAULT_SCALABLE_CAPACITY,
};
use super::filter::Filter;
use super::parameters::MAX_FILTER_SLOTS;
use super::standard_bloom::StandardFilter;

/// Rate multiplier applied to each new segment
pub const TIGHTENING_RATIO: f64 = 0.9;

#[derive(Debug)]
struct ScalableState {
    /// Append-only; the last element is the active segment
    filters: Vec<StandardFilter>,
    /// Capacity of the active segment
    current_capacity: usize,
    /// Target rate of the active segment
    false_pos_rate: f64,
    growth_factor: f64,
    /// Items added to the active segment since it was appended
    items_added: usize,
}

impl ScalableState {
    fn active(&self) -> &StandardFilter {
        // Never empty: the first segment is created in the constructor
        &self.filters[self.filters.len() - 1]
    }

    fn scale_up(&mut self) {
        self.false_pos_rate *= TIGHTENING_RATIO;

        self.current_capacity = next_capacity(self.current_capacity, self.growth_factor);
        self.items_added = 0;

        self.filters.push(StandardFilter::with_estimated_params(
            self.current_capacity,
            self.false_pos_rate,
        ));

        debug!(
            segments = self.filters.len(),
            capacity = self.current_capacity,
            false_pos_rate = self.false_pos_rate,
            "Scalable filter grew a new segment"
        );
    }
}

/// Capacity of the segment that follows one of `current` items.
///
/// Once the cap is reached every further segment keeps the capped capacity.
fn next_capacity(current: usize, growth_factor: f64) -> usize {
    let grown = (current as f64 * growth_factor).round() as usize;
    grown
        .max(current.saturating_add(1))
        .min(MAX_FILTER_SLOTS)
}

/// Bloom filter that grows by appending segments
///
/// One write lock covers the capacity check, the optional append and the add,
/// so concurrent adds can neither append twice nor overfill a segment.
#[derive(Debug)]
pub struct ScalableFilter {
    state: RwLock<ScalableState>,
}

impl ScalableFilter {
    /// Create a scalable filter
    ///
    /// # Arguments
    /// * `initial_capacity` - Items in the first segment (0 → 1000, capped at
    ///   `MAX_FILTER_SLOTS`)
    /// * `false_pos_rate` - Target rate of the first segment
    /// * `growth_factor` - Capacity multiplier per segment (<= 1.0 → 2.0,
    ///   capped at `MAX_GROWTH_FACTOR`)
    pub fn with_estimated_params(
        initial_capacity: usize,
        false_pos_rate: f64,
        growth_factor: f64,
    ) -> Self {
        let initial_capacity = if initial_capacity == 0 {
            DEFAULT_SCALABLE_CAPACITY
        } else {
            initial_capacity.min(MAX_FILTER_SLOTS)
        };
        let false_pos_rate = sanitize_false_pos_rate(false_pos_rate);
        let growth_factor = sanitize_growth_factor(growth_factor);

        let first = StandardFilter::with_estimated_params(initial_capacity, false_pos_rate);

        Self {
            state: RwLock::new(ScalableState {
                filters: vec![first],
                current_capacity: initial_capacity,
                false_pos_rate,
                growth_factor,
                items_added: 0,
            }),
        }
    }

    /// Add an item, appending a new segment first if the active one is full
    pub fn insert(&self, element: &[u8]) {
        let mut state = self.state.write();

        if state.items_added >= state.current_capacity {
            state.scale_up();
        }

        state.active().insert(element);
        state.items_added += 1;
    }

    /// Check all segments, newest first
    pub fn contains(&self, element: &[u8]) -> bool {
        let state = self.state.read();
        state.filters.iter().rev().any(|f| f.contains(element))
    }

    /// Number of segments
    pub fn segment_count(&self) -> usize {
        self.state.read().filters.len()
    }

    /// Capacity of the active segment
    pub fn current_capacity(&self) -> usize {
        self.state.read().current_capacity
    }

    /// Target rate of the active segment
    pub fn current_false_pos_rate(&self) -> f64 {
        self.state.read().false_pos_rate
    }

    /// Growth factor in effect after defaults were applied
    pub fn growth_factor(&self) -> f64 {
        self.state.read().growth_factor
    }

    /// Items added to the active segment since it was appended
    pub fn items_in_active_segment(&self) -> usize {
        self.state.read().items_added
    }

    /// Sum of the capacities of all segments
    ///
    /// Superseded segments are always exactly full, so their insert counts
    /// stand in for their capacities.
    pub fn total_capacity(&self) -> usize {
        let state = self.state.read();
        let full: usize = state.filters[..state.filters.len() - 1]
            .iter()
            .map(StandardFilter::elements_inserted)
            .sum();
        full + state.current_capacity
    }
}

impl Filter for ScalableFilter {
    fn add(&self, data: &[u8]) {
        self.insert(data);
    }

    fn check(&self, data: &[u8]) -> bool {
        self.contains(data)
    }

    fn filter_type(&self) -> FilterType {
        FilterType::Scalable
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
