//! Todo list driven through a store with an open tag-plus-payload action.
//!
//! The store treats actions opaquely; only the reducer gives the tag
//! meaning, and unknown tags fall through as identity transitions.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use statefold::Store;
use std::rc::Rc;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Action {
    #[serde(rename = "type")]
    kind: String,
    data: Value,
}

impl Action {
    fn new(kind: &str, data: Value) -> Self {
        Action {
            kind: kind.to_string(),
            data,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct TodoState {
    items: Vec<TodoItem>,
    next_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoItem {
    id: u64,
    text: String,
    done: bool,
}

fn todo_reducer(mut state: TodoState, action: &Action) -> TodoState {
    match action.kind.as_str() {
        "todo_added" => {
            let text = action.data["text"].as_str().unwrap_or("").to_string();
            state.items.push(TodoItem {
                id: state.next_id,
                text,
                done: false,
            });
            state.next_id += 1;
        }
        "todo_completed" => {
            let id = action.data["id"].as_u64().unwrap_or(0);
            if let Some(item) = state.items.iter_mut().find(|i| i.id == id) {
                item.done = true;
            }
        }
        _ => {}
    }
    state
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = Rc::new(Store::new(todo_reducer));

    let watcher = Rc::clone(&store);
    store.subscribe(move || {
        let state = watcher.state();
        let open = state.items.iter().filter(|i| !i.done).count();
        println!("{} open item(s)", open);
    });

    store.dispatch(Action::new("todo_added", json!({"text": "buy milk"})))?;
    store.dispatch(Action::new("todo_added", json!({"text": "write docs"})))?;
    store.dispatch(Action::new("todo_completed", json!({"id": 0})))?;

    // Tags the reducer does not recognize leave the state untouched.
    store.dispatch(Action::new("telemetry_ping", json!({})))?;

    println!("\nTodos:");
    for item in &store.state().items {
        let check = if item.done { "x" } else { " " };
        println!("  [{}] {}", check, item.text);
    }

    Ok(())
}
