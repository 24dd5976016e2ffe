//! Minimal counter — the "hello world" of statefold.
//!
//! One store, one reducer, a subscriber printing the state, and three
//! dispatched actions.

use statefold::Store;
use std::rc::Rc;

#[derive(Debug, Default, Clone)]
struct AppState {
    counter: i64,
    paused: bool,
}

#[derive(Debug)]
enum Action {
    Increment,
    Decrement,
}

fn reduce(mut state: AppState, action: &Action) -> AppState {
    match action {
        Action::Increment => state.counter = state.counter.saturating_add(1),
        Action::Decrement => state.counter = state.counter.saturating_sub(1),
    }
    state
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = Rc::new(Store::new(reduce));

    // Subscribers take no arguments; they read back into the store.
    let printer = Rc::clone(&store);
    store.subscribe(move || println!("{:?}", printer.state()));

    // The only way to change the state is to dispatch an action.
    store.dispatch(Action::Increment)?;
    // AppState { counter: 1, paused: false }
    store.dispatch(Action::Increment)?;
    // AppState { counter: 2, paused: false }
    store.dispatch(Action::Decrement)?;
    // AppState { counter: 1, paused: false }

    Ok(())
}
