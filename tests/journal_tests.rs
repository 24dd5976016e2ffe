mod common;

use common::{CounterAction, CounterState, TaggedAction, counter_reducer, todo_reducer};
use statefold::{Journal, JournalError, Store, replay};
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_record_and_len() {
    let mut journal = Journal::new();
    assert!(journal.is_empty());

    journal.record(CounterAction::Increment);
    journal.record(CounterAction::Decrement);

    assert_eq!(journal.len(), 2);
    assert!(!journal.is_empty());
}

#[test]
fn test_replay_matches_live_store() {
    let actions = vec![
        CounterAction::Increment,
        CounterAction::Increment,
        CounterAction::Annotate {
            note: "halfway".to_string(),
        },
        CounterAction::Decrement,
        CounterAction::Increment,
    ];

    let store = Store::new(counter_reducer);
    let mut journal = Journal::new();
    for action in &actions {
        journal.record(action.clone());
        store.dispatch(action.clone()).unwrap();
    }

    let replayed = journal.replay(counter_reducer, CounterState::default());
    assert_eq!(replayed, store.state());
}

#[test]
fn test_replay_free_function() {
    let actions = [
        CounterAction::Increment,
        CounterAction::Increment,
        CounterAction::Decrement,
    ];
    let state = replay(counter_reducer, CounterState::default(), &actions);
    assert_eq!(state.counter, 1);
}

#[test]
fn test_replay_from_non_default_initial() {
    let actions = [CounterAction::Decrement, CounterAction::Decrement];
    let initial = CounterState {
        counter: 10,
        paused: true,
    };
    let state = replay(counter_reducer, initial, &actions);
    assert_eq!(state.counter, 8);
    assert!(state.paused);
}

#[test]
fn test_jsonl_round_trip_in_memory() {
    let mut journal = Journal::new();
    journal.record(CounterAction::Increment);
    journal.record(CounterAction::Annotate {
        note: "note".to_string(),
    });
    journal.record(CounterAction::Decrement);

    let mut buf = Vec::new();
    journal.to_writer(&mut buf).unwrap();

    let decoded: Journal<CounterAction> = Journal::from_reader(buf.as_slice()).unwrap();
    assert_eq!(decoded, journal);
}

#[test]
fn test_jsonl_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.jsonl");

    let mut journal = Journal::new();
    journal.record(TaggedAction::new(
        "todo_added",
        serde_json::json!({"text": "buy milk"}),
    ));
    journal.record(TaggedAction::new(
        "todo_completed",
        serde_json::json!({"id": 0}),
    ));

    journal.to_writer(File::create(&path).unwrap()).unwrap();

    let decoded: Journal<TaggedAction> = Journal::from_reader(File::open(&path).unwrap()).unwrap();
    assert_eq!(decoded, journal);

    let state = decoded.replay(todo_reducer, Default::default());
    assert_eq!(state.items.len(), 1);
    assert!(state.items[0].done);
}

#[test]
fn test_tag_serializes_as_type_field() {
    let mut journal = Journal::new();
    journal.record(TaggedAction::new("ping", serde_json::json!({"n": 1})));

    let mut buf = Vec::new();
    journal.to_writer(&mut buf).unwrap();

    let line = String::from_utf8(buf).unwrap();
    assert!(line.contains(r#""type":"ping""#));
}

#[test]
fn test_empty_lines_are_skipped() {
    let mut journal = Journal::new();
    journal.record(CounterAction::Increment);
    journal.record(CounterAction::Decrement);
    let mut buf = Vec::new();
    journal.to_writer(&mut buf).unwrap();

    // Inject a blank line between the two records.
    let mut lines: Vec<&str> = std::str::from_utf8(&buf).unwrap().lines().collect();
    lines.insert(1, "");
    let rebuilt = format!("{}\n", lines.join("\n"));

    let decoded: Journal<CounterAction> = Journal::from_reader(rebuilt.as_bytes()).unwrap();
    assert_eq!(decoded, journal);
}

#[test]
fn test_malformed_line_is_a_decode_error() {
    let mut buf = Vec::new();
    writeln!(buf, "not json at all").unwrap();

    let result: Result<Journal<CounterAction>, _> = Journal::from_reader(buf.as_slice());
    assert!(matches!(result, Err(JournalError::Decode(_))));
}

#[test]
fn test_journal_iteration_order() {
    let mut journal = Journal::new();
    journal.record(CounterAction::Increment);
    journal.record(CounterAction::Decrement);

    let kinds: Vec<&CounterAction> = journal.iter().collect();
    assert_eq!(
        kinds,
        vec![&CounterAction::Increment, &CounterAction::Decrement]
    );
}
