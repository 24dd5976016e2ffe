//! Journaling a session and replaying it, in full and up to a point.
//!
//! Actions are serialized one JSON object per line, so a recorded session
//! can be stored anywhere, inspected with standard tools, and folded back
//! into state later.

use serde::{Deserialize, Serialize};
use statefold::{Journal, Store, replay};

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Action {
    Increment,
    Decrement,
}

fn counter(state: i64, action: &Action) -> i64 {
    match action {
        Action::Increment => state.saturating_add(1),
        Action::Decrement => state.saturating_sub(1),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::new(counter);
    let mut journal = Journal::new();

    // Record while dispatching.
    let session = [
        Action::Increment,
        Action::Increment,
        Action::Increment,
        Action::Decrement,
        Action::Increment,
    ];
    for action in session {
        journal.record(action.clone());
        store.dispatch(action)?;
    }
    println!("live state after {} actions: {}", journal.len(), store.state());

    // Serialize the session as JSON lines and read it back.
    let mut encoded = Vec::new();
    journal.to_writer(&mut encoded)?;
    print!("\nencoded session:\n{}", String::from_utf8(encoded.clone())?);

    let decoded: Journal<Action> = Journal::from_reader(encoded.as_slice())?;
    println!("\nreplayed state: {}", decoded.replay(counter, 0));

    // Replay only a prefix to inspect intermediate state.
    for limit in [2, 4] {
        let partial = replay(counter, 0, decoded.iter().take(limit));
        println!("state after {limit} actions: {partial}");
    }

    Ok(())
}
