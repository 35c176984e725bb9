//! The common filter contract
//!
//! Every variant answers membership the same way:
//! - `check() == false` means the item is definitely NOT in the set
//! - `check() == true` means the item is in the set OR this is a false positive
//!
//! The ambiguity of `true` is inherent to Bloom filters and is never resolved.
//!
//! Removal is not part of the contract. Callers that need it downcast a
//! `dyn Filter` to [`CountingFilter`](super::CountingFilter).

use std::any::Any;
use std::fmt::Debug;

use super::config::FilterType;

/// Probabilistic set membership (Add / Check)
///
/// All methods take `&self`: implementations synchronize internally, so a
/// single instance can be shared across threads behind an `Arc`.
pub trait Filter: Debug + Send + Sync {
    /// Insert an item. Never fails; any length, including empty, is accepted.
    fn add(&self, data: &[u8]);

    /// Test whether an item might be in the set.
    fn check(&self, data: &[u8]) -> bool;

    /// The variant backing this filter
    fn filter_type(&self) -> FilterType;

    /// Access to the concrete type for capability queries
    fn as_any(&self) -> &dyn Any;
}

impl dyn Filter {
    /// Downcast to a concrete variant, e.g. to reach `CountingFilter::remove`.
    pub fn downcast_ref<T: Filter + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Whether the concrete variant is `T`
    pub fn is<T: Filter + 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
