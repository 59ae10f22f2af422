//! Memory tracker hierarchy tests

use rowlist_core::tracker::MemoryTracker;
use rowlist_mem::{Error, Tracker};
use std::thread;

#[test]
fn test_tracker_tree_sums_children() {
    let query = Tracker::new("query");
    let sort = Tracker::new("sort");
    let join = Tracker::new("join");
    sort.attach_to(&query).unwrap();
    join.attach_to(&query).unwrap();

    sort.consume(1024);
    join.consume(2048);
    assert_eq!(query.bytes_consumed(), 3072);

    join.consume(-2048);
    assert_eq!(query.bytes_consumed(), 1024);
    assert_eq!(query.max_consumed(), 3072);
}

#[test]
fn test_concurrent_children() {
    let query = Tracker::new("query");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let query = query.clone();
            thread::spawn(move || {
                let child = Tracker::new(format!("worker-{i}"));
                child.attach_to(&query).unwrap();
                for _ in 0..1000 {
                    child.consume(16);
                }
                for _ in 0..500 {
                    child.consume(-16);
                }
                child.bytes_consumed()
            })
        })
        .collect();

    let total: i64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 8 * 500 * 16);
    assert_eq!(query.bytes_consumed(), total);
}

#[test]
fn test_cycle_is_rejected() {
    let a = Tracker::new("a");
    let b = Tracker::new("b");
    let c = Tracker::new("c");
    b.attach_to(&a).unwrap();
    c.attach_to(&b).unwrap();

    let err = a.attach_to(&c).unwrap_err();
    assert!(matches!(err, Error::TrackerCycle { .. }));
    assert!(err.to_string().contains("cycle"));
}
