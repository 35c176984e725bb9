//! Optimal Bloom filter parameter calculation
//!
//! Formulas:
//! - m = ceil(-n*ln(p) / (ln(2)^2))  -- optimal slots
//! - k = round((m/n) * ln(2))        -- optimal hash functions
//!
//! Every variant sizes itself through [`calculate_optimal_parameters`], so a
//! standard and a counting filter built from the same inputs have the same
//! shape and the same false positive guarantee.

use std::f64::consts::LN_2;

/// Upper bound on the slots of one filter (or one scalable segment).
///
/// 2^28 slots: 32 MiB of bits, 256 MiB of counters. Larger item counts or
/// tighter rates are sized down to this bound instead of failing.
pub const MAX_FILTER_SLOTS: usize = 1 << 28;

/// Bloom filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    /// Number of slots (bits or counters) in the filter
    pub size_bits: usize,
    /// Number of hash functions
    pub hash_count: usize,
    /// Expected false positive rate once `n` items are inserted
    pub expected_fpr: f64,
}

/// Calculate optimal Bloom filter parameters for given constraints
///
/// # Arguments
/// * `num_elements` - Expected number of elements to insert (n)
/// * `target_fpr` - Target false positive rate (p), in (0, 1)
///
/// Both results are floored to 1, so a zero element count or a rate close
/// to 1 still yields a usable one-slot, one-hash filter. `m` is capped at
/// [`MAX_FILTER_SLOTS`].
pub fn calculate_optimal_parameters(num_elements: usize, target_fpr: f64) -> BloomFilterParams {
    let n = num_elements.max(1);
    let m = minimum_bits(n, target_fpr).clamp(1, MAX_FILTER_SLOTS);
    let k = optimal_k(m, n).max(1);

    BloomFilterParams {
        size_bits: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, n, k),
    }
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Calculate optimal k for given m and n
pub fn optimal_k(m: usize, n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    ((m as f64 / n as f64) * LN_2).round() as usize
}

/// Calculate minimum m for given n and target FPR
pub fn minimum_bits(n: usize, target_fpr: f64) -> usize {
    let ln2_squared = LN_2 * LN_2;
    (-(n as f64) * target_fpr.ln() / ln2_squared).ceil() as usize
}
