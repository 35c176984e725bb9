//! Filter factory
//!
//! Maps a [`FilterConfig`] to a constructed filter behind the [`Filter`]
//! contract. The configuration is normalized first, so the only failure is
//! an unknown variant tag.

use tracing::debug;

use super::config::{FilterConfig, FilterType};
use super::counting_bloom::CountingFilter;
use super::filter::Filter;
use super::scalable_bloom::ScalableFilter;
use super::standard_bloom::StandardFilter;
use crate::error::FilterError;

/// Build a filter from a configuration
///
/// - standard → [`StandardFilter`] sized for `expected_items` at `false_pos_rate`
/// - scalable → [`ScalableFilter`] with `expected_items` as first segment
///   capacity and `growth_factor` per segment
/// - counting → [`CountingFilter`] sized like standard
///
/// # Errors
/// [`FilterError::UnsupportedFilterType`] carrying the offending tag.
pub fn new_filter(config: &FilterConfig) -> Result<Box<dyn Filter>, FilterError> {
    let filter_type = config.parsed_type()?;
    let config = config.normalized();

    debug!(
        %filter_type,
        expected_items = config.expected_items,
        false_pos_rate = config.false_pos_rate,
        "Building filter"
    );

    let filter: Box<dyn Filter> = match filter_type {
        FilterType::Standard => Box::new(StandardFilter::with_estimated_params(
            config.expected_items,
            config.false_pos_rate,
        )),
        FilterType::Scalable => Box::new(ScalableFilter::with_estimated_params(
            config.expected_items,
            config.false_pos_rate,
            config.growth_factor,
        )),
        FilterType::Counting => Box::new(CountingFilter::with_estimated_params(
            config.expected_items,
            config.false_pos_rate,
        )),
    };

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parameters::calculate_optimal_parameters;

    #[test]
    fn test_factory_standard() {
        let config = FilterConfig::new(FilterType::Standard, 100, 0.01);
        let filter = new_filter(&config).unwrap();

        assert_eq!(filter.filter_type(), FilterType::Standard);
        let standard = filter
            .downcast_ref::<StandardFilter>()
            .expect("Factory did not return a StandardFilter");

        let params = calculate_optimal_parameters(100, 0.01);
        assert_eq!(standard.size_bits(), params.size_bits);
        assert_eq!(standard.hash_count(), params.hash_count);
    }

    #[test]
    fn test_factory_scalable() {
        let config = FilterConfig::new(FilterType::Scalable, 100, 0.01).with_growth_factor(3.0);
        let filter = new_filter(&config).unwrap();

        let scalable = filter
            .downcast_ref::<ScalableFilter>()
            .expect("Factory did not return a ScalableFilter");
        assert_eq!(scalable.current_capacity(), 100);
        assert_eq!(scalable.growth_factor(), 3.0);
    }

    #[test]
    fn test_factory_counting_supports_remove() {
        let config = FilterConfig::new(FilterType::Counting, 100, 0.01);
        let filter = new_filter(&config).unwrap();

        filter.add(b"apple");
        let counting = filter
            .downcast_ref::<CountingFilter>()
            .expect("Factory did not return a CountingFilter");
        assert!(counting.remove(b"apple"));
        assert!(!filter.check(b"apple"));
    }

    #[test]
    fn test_factory_standard_is_not_counting() {
        let config = FilterConfig::new(FilterType::Standard, 100, 0.01);
        let filter = new_filter(&config).unwrap();

        assert!(filter.is::<StandardFilter>());
        assert!(filter.downcast_ref::<CountingFilter>().is_none());
    }

    #[test]
    fn test_factory_unknown_type() {
        let config = FilterConfig {
            filter_type: "bogus".to_string(),
            ..Default::default()
        };

        match new_filter(&config) {
            Err(FilterError::UnsupportedFilterType(tag)) => assert_eq!(tag, "bogus"),
            Err(other) => panic!("Unexpected error: {}", other),
            Ok(filter) => panic!("Expected an error, got {:?}", filter),
        }
    }

    #[test]
    fn test_factory_clamps_bad_parameters() {
        let config = FilterConfig {
            filter_type: "scalable".to_string(),
            expected_items: 0,
            false_pos_rate: -1.0,
            growth_factor: 0.0,
        };
        let filter = new_filter(&config).unwrap();

        filter.add(b"still works");
        assert!(filter.check(b"still works"));
    }
}
