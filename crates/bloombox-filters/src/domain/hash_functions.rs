//! Hash derivation shared by every filter variant
//!
//! Each item is hashed once into a tuple of four 64-bit digests (two
//! MurmurHash3 x64-128 runs). The k slot indices are then derived from that
//! tuple by double hashing, so the cost of hashing does not grow with k.
//!
//! Seeds are fixed: the same bytes always map to the same slots, in this
//! process and in any other.

use std::io::{Cursor, Read};

/// Four 64-bit digests of one item.
pub type BaseHashes = [u64; 4];

/// Byte appended to the item for the second 128-bit run.
const SECOND_RUN_SUFFIX: [u8; 1] = [1];

/// Hash a byte stream with MurmurHash3 x64-128 and split it into two halves.
///
/// In-memory readers cannot fail, so the error branch only exists to satisfy
/// the `Read` based API.
fn murmur_128<R: Read>(mut source: R) -> (u64, u64) {
    let hash = murmur3::murmur3_x64_128(&mut source, 0).unwrap_or(0);
    (hash as u64, (hash >> 64) as u64)
}

/// Compute the base hash tuple for an item.
///
/// `(h0, h1)` hash the item itself, `(h2, h3)` hash the item followed by a
/// single `0x01` byte. Empty items are valid.
pub fn base_hashes(data: &[u8]) -> BaseHashes {
    let (h0, h1) = murmur_128(Cursor::new(data));
    let (h2, h3) = murmur_128(Cursor::new(data).chain(Cursor::new(SECOND_RUN_SUFFIX)));
    [h0, h1, h2, h3]
}

/// Raw (unreduced) location of the i-th hash function.
///
/// Double hashing with alternating pairs:
/// `h[i % 2] + i * h[2 + ((i + i % 2) % 4) / 2]`
pub fn location(hashes: &BaseHashes, i: u64) -> u64 {
    let ii = i as usize;
    let base = hashes[ii % 2];
    let step = hashes[2 + ((ii + ii % 2) % 4) / 2];
    base.wrapping_add(i.wrapping_mul(step))
}

/// Location of the i-th hash function reduced into `0..m`.
///
/// `m` must be at least 1; the parameter estimator never produces 0.
pub fn location_at(hashes: &BaseHashes, i: u64, m: usize) -> usize {
    (location(hashes, i) % m as u64) as usize
}

/// Iterate the k slot indices of an item for an array of `m` slots.
///
/// The iterator owns a copy of the digests and does not borrow `hashes`.
pub fn hash_positions(hashes: &BaseHashes, k: usize, m: usize) -> impl Iterator<Item = usize> {
    let hashes = *hashes;
    (0..k as u64).map(move |i| location_at(&hashes, i, m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_hashes_deterministic() {
        let item = b"deterministic_item";

        assert_eq!(
            base_hashes(item),
            base_hashes(item),
            "Same input must produce same digests"
        );
    }

    #[test]
    fn test_base_hashes_halves_differ() {
        let hashes = base_hashes(b"apple");

        assert_ne!(hashes[0], hashes[2], "Suffixed run must change the digest");
        assert_ne!(hashes[1], hashes[3], "Suffixed run must change the digest");
    }

    #[test]
    fn test_empty_input_is_hashable() {
        let hashes = base_hashes(b"");
        let positions: Vec<usize> = hash_positions(&hashes, 7, 100).collect();

        assert_eq!(positions.len(), 7);
        assert!(positions.iter().all(|&p| p < 100));
    }

    #[test]
    fn test_location_first_index_is_h0() {
        let hashes = [11, 22, 33, 44];

        // i = 0 → h[0] + 0 * h[2]
        assert_eq!(location(&hashes, 0), 11);
        // i = 1 → h[1] + 1 * h[3]
        assert_eq!(location(&hashes, 1), 22 + 44);
        // i = 2 → h[0] + 2 * h[3]
        assert_eq!(location(&hashes, 2), 11 + 2 * 44);
        // i = 3 → h[1] + 3 * h[2]
        assert_eq!(location(&hashes, 3), 22 + 3 * 33);
    }

    #[test]
    fn test_location_wraps_instead_of_overflowing() {
        let hashes = [u64::MAX; 4];
        // Must not panic in debug builds
        let _ = location(&hashes, 63);
    }

    #[test]
    fn test_positions_within_bounds_and_varied() {
        let hashes = base_hashes(b"test_item_0xABCD");
        let m = 10_000;
        let positions: Vec<usize> = hash_positions(&hashes, 7, m).collect();

        assert_eq!(positions.len(), 7, "Should produce k positions");
        for pos in &positions {
            assert!(*pos < m, "Position {} should be < m={}", pos, m);
        }

        let unique: std::collections::HashSet<_> = positions.iter().collect();
        assert!(unique.len() >= 3, "Positions should vary across i");
    }

    #[test]
    fn test_positions_outlive_digests() {
        // The digests are a temporary here; the iterator must not borrow them
        fn slots_of(data: &[u8]) -> impl Iterator<Item = usize> {
            hash_positions(&base_hashes(data), 4, 64)
        }

        let hashes = base_hashes(b"detached");
        let expected: Vec<usize> = hash_positions(&hashes, 4, 64).collect();
        assert_eq!(slots_of(b"detached").collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_single_slot_array() {
        let hashes = base_hashes(b"anything");
        assert!(hash_positions(&hashes, 5, 1).all(|p| p == 0));
    }

    #[test]
    fn test_hash_uniformity() {
        // 1000 items * 7 positions over 10 buckets → ~700 per bucket
        let m = 1000;
        let k = 7;
        let mut counts = vec![0usize; 10];

        for i in 0..1000 {
            let item = format!("item_{}", i);
            let hashes = base_hashes(item.as_bytes());
            for pos in hash_positions(&hashes, k, m) {
                counts[pos / 100] += 1;
            }
        }

        let expected = 700;
        let min_acceptable = expected / 2;
        let max_acceptable = expected * 3 / 2;

        for (i, count) in counts.iter().enumerate() {
            assert!(
                *count >= min_acceptable && *count <= max_acceptable,
                "Bucket {} has {} entries, expected ~{}",
                i,
                count,
                expected
            );
        }
    }
}
