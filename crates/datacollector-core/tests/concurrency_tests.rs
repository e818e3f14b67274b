#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::memory_app;
use datacollector_core::{attr, App, AttrValue, Driver, Entry, ExError};

const CALLERS: i64 = 16;
const CALLS_PER_CALLER: i64 = 200;

#[test]
fn test_concurrent_app_calls_each_reach_driver_once() {
    let (app, driver) = memory_app([]);

    std::thread::scope(|s| {
        for caller in 0..CALLERS {
            let app = &app;
            s.spawn(move || {
                for seq in 0..CALLS_PER_CALLER {
                    app.info("tick", &[attr("caller", caller), attr("seq", seq)]);
                }
            });
        }
    });

    let entries = driver.entries();
    assert_eq!(entries.len() as i64, CALLERS * CALLS_PER_CALLER);

    let mut seen: HashMap<(i64, i64), usize> = HashMap::new();
    for entry in &entries {
        let key = match (&entry.attributes()[0].value, &entry.attributes()[1].value) {
            (AttrValue::Int(c), AttrValue::Int(s)) => (*c, *s),
            other => panic!("unexpected attributes {:?}", other),
        };
        *seen.entry(key).or_default() += 1;
    }
    assert_eq!(seen.len() as i64, CALLERS * CALLS_PER_CALLER);
    assert!(seen.values().all(|count| *count == 1));
}

#[test]
fn test_concurrent_calls_preserve_per_caller_order() {
    let (app, driver) = memory_app([]);

    std::thread::scope(|s| {
        for caller in 0..CALLERS {
            let app = &app;
            s.spawn(move || {
                for seq in 0..CALLS_PER_CALLER {
                    app.debug("tick", &[attr("caller", caller), attr("seq", seq)]);
                }
            });
        }
    });

    let mut last: HashMap<i64, i64> = HashMap::new();
    for entry in driver.entries() {
        if let (AttrValue::Int(c), AttrValue::Int(s)) =
            (&entry.attributes()[0].value, &entry.attributes()[1].value)
        {
            if let Some(prev) = last.insert(*c, *s) {
                assert!(*s > prev, "caller {} went backwards", c);
            }
        }
    }
}

/// Driver that detects overlapping calls from the app path
struct OverlapDetector {
    in_flight: AtomicUsize,
    overlaps: AtomicUsize,
    recorded: AtomicUsize,
}

impl Driver for OverlapDetector {
    fn record_log(&self, _entry: &Entry) -> Result<(), ExError> {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) != 0 {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        std::thread::yield_now();
        self.recorded.fetch_add(1, Ordering::SeqCst);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }

    fn set_encoding(&self, _encoding: &str) -> Result<(), ExError> {
        Ok(())
    }
}

#[test]
fn test_app_serializes_direct_calls() {
    let driver = Arc::new(OverlapDetector {
        in_flight: AtomicUsize::new(0),
        overlaps: AtomicUsize::new(0),
        recorded: AtomicUsize::new(0),
    });
    let app = App::new(driver.clone(), []).unwrap();

    std::thread::scope(|s| {
        for _ in 0..12 {
            s.spawn(|| {
                for _ in 0..50 {
                    app.warning("serialized", &[]);
                }
            });
        }
    });

    assert_eq!(driver.recorded.load(Ordering::SeqCst), 600);
    assert_eq!(driver.overlaps.load(Ordering::SeqCst), 0);
}

#[test]
fn test_transactions_log_concurrently_with_app() {
    let (app, driver) = memory_app([]);
    let txns: Vec<_> = (0..4)
        .map(|_| app.start_transaction(&[]).unwrap())
        .collect();

    std::thread::scope(|s| {
        for txn in &txns {
            s.spawn(move || {
                for _ in 0..100 {
                    txn.info("txn", &[]);
                }
            });
        }
        s.spawn(|| {
            for _ in 0..100 {
                app.info("app", &[]);
            }
        });
    });

    let entries = driver.entries();
    assert_eq!(entries.len(), 500);
    for txn in &txns {
        let count = entries
            .iter()
            .filter(|e| e.transaction_id() == Some(txn.id()))
            .count();
        assert_eq!(count, 100);
    }
}
