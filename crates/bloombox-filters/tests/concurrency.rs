//! Multi-threaded behavior of the filters and the service handle.

use std::sync::Arc;
use std::thread;

use bloombox_filters::events::{AddRequest, CheckRequest, CreateFilterRequest};
use bloombox_filters::{
    BloomServiceApi, CountingFilter, Filter, FilterService, ScalableFilter, StandardFilter,
};

const THREADS: usize = 8;

fn item(thread: usize, i: usize) -> Vec<u8> {
    format!("t{}-item-{}", thread, i).into_bytes()
}

/// Run `per_thread` adds from each of `THREADS` threads against one filter.
fn add_concurrently(filter: Arc<dyn Filter>, per_thread: usize) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let filter = Arc::clone(&filter);
            thread::spawn(move || {
                for i in 0..per_thread {
                    filter.add(&item(t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_adds_standard_no_false_negatives() {
    bloombox_telemetry::init_test_telemetry();

    let filter: Arc<dyn Filter> = Arc::new(StandardFilter::with_estimated_params(4000, 0.01));
    add_concurrently(Arc::clone(&filter), 500);

    for t in 0..THREADS {
        for i in 0..500 {
            assert!(filter.check(&item(t, i)), "lost item t{} #{}", t, i);
        }
    }
}

#[test]
fn test_concurrent_scale_up_matches_sequential_schedule() {
    bloombox_telemetry::init_test_telemetry();

    // 2000 items into capacity 1000 with growth 2: exactly one scale-up
    let concurrent = Arc::new(ScalableFilter::with_estimated_params(1000, 0.01, 2.0));
    add_concurrently(concurrent.clone(), 250);

    let sequential = ScalableFilter::with_estimated_params(1000, 0.01, 2.0);
    for t in 0..THREADS {
        for i in 0..250 {
            sequential.insert(&item(t, i));
        }
    }

    assert_eq!(concurrent.segment_count(), 2);
    assert_eq!(concurrent.segment_count(), sequential.segment_count());
    assert_eq!(concurrent.current_capacity(), sequential.current_capacity());
    assert_eq!(
        concurrent.items_in_active_segment(),
        sequential.items_in_active_segment()
    );

    for t in 0..THREADS {
        for i in 0..250 {
            assert!(concurrent.contains(&item(t, i)));
        }
    }
}

#[test]
fn test_concurrent_multi_segment_growth() {
    // capacities 100, 200, 400, 800 cover 1500 items; 1600 needs a fifth
    let filter = Arc::new(ScalableFilter::with_estimated_params(100, 0.01, 2.0));
    add_concurrently(filter.clone(), 200);

    assert_eq!(filter.segment_count(), 5);
    assert_eq!(filter.current_capacity(), 1600);
    assert_eq!(filter.items_in_active_segment(), 100);

    for t in 0..THREADS {
        for i in 0..200 {
            assert!(filter.contains(&item(t, i)));
        }
    }
}

#[test]
fn test_concurrent_counting_add_remove_balances() {
    bloombox_telemetry::init_test_telemetry();

    let filter = Arc::new(CountingFilter::with_estimated_params(2000, 0.01));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let filter = Arc::clone(&filter);
            thread::spawn(move || {
                for i in 0..100 {
                    filter.insert(&item(t, i));
                }
                for i in 0..100 {
                    assert!(filter.remove(&item(t, i)), "own item must be removable");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(filter.total_count(), 0);
    assert_eq!(filter.saturated_counters(), 0);
}

#[test]
fn test_concurrent_counting_removals_keep_survivors() {
    let filter = Arc::new(CountingFilter::with_estimated_params(2000, 0.01));
    for i in 0..500 {
        filter.insert(format!("keep-{}", i).as_bytes());
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let filter = Arc::clone(&filter);
            thread::spawn(move || {
                for i in 0..50 {
                    filter.insert(&item(t, i));
                    filter.remove(&item(t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..500 {
        assert!(filter.contains(format!("keep-{}", i).as_bytes()));
    }
}

#[test]
fn test_replace_during_traffic() {
    bloombox_telemetry::init_test_telemetry();

    let service = Arc::new(FilterService::new());
    let create = |filter_type: &str| CreateFilterRequest {
        filter_type: filter_type.to_string(),
        expected_items: 500,
        false_pos_rate: 0.01,
        growth_factor: 2.0,
    };
    assert!(service.create_filter(create("standard")).success);

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for i in 0..200 {
                    // A held handle keeps answering for the filter it names
                    let held = service.active_filter().unwrap();
                    held.add(&item(t, i));
                    assert!(held.check(&item(t, i)));

                    assert!(service.add(AddRequest { data: item(t, i) }).success);
                    service.check(CheckRequest { data: item(t, i) });
                }
            })
        })
        .collect();

    let replacer = {
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for round in 0..50 {
                let filter_type = ["standard", "counting", "scalable"][round % 3];
                assert!(service.create_filter(create(filter_type)).success);
            }
        })
    };

    for worker in workers {
        worker.join().unwrap();
    }
    replacer.join().unwrap();

    // Round 49 is the last one: 49 % 3 == 1
    assert!(service.active_filter().unwrap().is::<CountingFilter>());
}
