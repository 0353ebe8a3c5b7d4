//! Event replay lock tests: a recorded search can be replayed through
//! subscriptions to rebuild what the engine did.

use std::cell::RefCell;
use std::rc::Rc;

use lock_tests::fixtures::lattice_graph;
use serde_json::json;
use wayfinder_harness::event_log::{EventLogConfig, EventLogWriter};
use wayfinder_harness::event_replay::{read_event_log, EventReplay, ReplayError};
use wayfinder_harness::policy::RunPolicy;
use wayfinder_harness::runner::run_search;
use wayfinder_search::frontier::FrontierKind;
use wayfinder_search::heuristic::ZeroHeuristic;

fn record_lattice(dir: &std::path::Path, kind: FrontierKind) -> std::path::PathBuf {
    let path = dir.join("lattice.json");
    let config = EventLogConfig {
        max_lines_per_file: 50,
        create_parent: false,
    };
    let policy = RunPolicy::new(kind).with_log(&path, config);
    let report = run_search(&lattice_graph(), &policy, ZeroHeuristic).unwrap();
    assert!(report.log_files.len() > 1);
    path
}

#[test]
fn replay_rebuilds_the_extraction_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = record_lattice(dir.path(), FrontierKind::UniformCost);

    let order = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&order);
    let mut replay = EventReplay::from_log(&path).unwrap();
    replay.subscribe("order", ["Extract"], move |record, _| {
        let state = record.entry["state"].as_str().unwrap_or_default().to_string();
        sink.borrow_mut().push(state);
    });
    replay.run();

    let order = order.borrow();
    assert_eq!(order.first().map(String::as_str), Some("A"));
    assert_eq!(order.last().map(String::as_str), Some("I"));
}

#[test]
fn solved_callback_sees_every_remembered_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let path = record_lattice(dir.path(), FrontierKind::BreadthFirst);

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let mut replay = EventReplay::from_log(&path).unwrap();
    replay.memory_subscribe(["Extract"]);
    replay.subscribe("done", ["Solved", "Exhausted"], move |record, memory| {
        let path_len = record.entry["path"].as_array().map_or(0, Vec::len);
        *sink.borrow_mut() = Some((record.event.clone(), memory.len(), path_len));
    });
    let dispatched = replay.run();
    assert!(dispatched > 0);

    let (event, remembered, path_len) = seen.borrow().clone().unwrap();
    assert_eq!(event, "Solved");
    // BFS on the lattice extracts all nine vertices, the goal last.
    assert_eq!(remembered, 9);
    assert_eq!(path_len, 5);
    assert_eq!(replay.memory().len(), 9);
}

#[test]
fn unsubscribed_callbacks_stop_firing() {
    let dir = tempfile::tempdir().unwrap();
    let path = record_lattice(dir.path(), FrontierKind::DepthFirst);

    let hits = Rc::new(RefCell::new(0_usize));
    let sink = Rc::clone(&hits);
    let mut replay = EventReplay::from_log(&path).unwrap();
    replay.subscribe("count", ["Extract"], move |_, _| *sink.borrow_mut() += 1);
    assert!(replay.step());
    assert!(replay.step());
    replay.unsubscribe("count", ["Extract"]);
    assert!(!replay.is_subscribed("count"));
    replay.run();
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn missing_log_cannot_be_replayed() {
    let dir = tempfile::tempdir().unwrap();
    let err = EventReplay::from_log(&dir.path().join("never.json")).unwrap_err();
    assert!(matches!(err, ReplayError::Missing { .. }));
}

#[test]
fn shorter_rerun_to_the_same_path_reads_back_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rerun.json");
    // Scalar entries take 5 lines; two fit in a 12-line file.
    let config = EventLogConfig {
        max_lines_per_file: 12,
        create_parent: false,
    };

    let mut first = EventLogWriter::open(&path, config.clone()).unwrap();
    for i in 0..5 {
        first.write_event("First", json!(i)).unwrap();
    }
    assert_eq!(first.finish().unwrap().len(), 3);

    let mut second = EventLogWriter::open(&path, config).unwrap();
    for i in 0..4 {
        second.write_event("Second", json!(i)).unwrap();
    }
    assert_eq!(second.finish().unwrap().len(), 2);

    let records = read_event_log(&path).unwrap();
    let seen: Vec<(&str, u64)> = records.iter().map(|r| (r.event.as_str(), r.number)).collect();
    assert_eq!(seen, [("Second", 1), ("Second", 2), ("Second", 3), ("Second", 4)]);
}
