#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterState {
    pub counter: i64,
    pub paused: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CounterAction {
    Increment,
    Decrement,
    Annotate { note: String },
}

pub fn counter_reducer(mut state: CounterState, action: &CounterAction) -> CounterState {
    match action {
        CounterAction::Increment => state.counter = state.counter.saturating_add(1),
        CounterAction::Decrement => state.counter = state.counter.saturating_sub(1),
        _ => {}
    }
    state
}

/// Open tag-plus-payload action for tests exercising an extensible action
/// set. Only the reducer gives the tag meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
}

impl TaggedAction {
    pub fn new(kind: &str, data: Value) -> Self {
        TaggedAction {
            kind: kind.to_string(),
            data,
        }
    }
}

pub fn tagged(kind: &str) -> TaggedAction {
    TaggedAction::new(kind, json!({}))
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoState {
    pub items: Vec<TodoItem>,
    pub next_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

pub fn todo_reducer(mut state: TodoState, action: &TaggedAction) -> TodoState {
    match action.kind.as_str() {
        "todo_added" => {
            state.items.push(TodoItem {
                id: state.next_id,
                text: action.data["text"].as_str().unwrap_or("").to_string(),
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
        "todo_deleted" => {
            let id = action.data["id"].as_u64().unwrap_or(0);
            state.items.retain(|i| i.id != id);
        }
        _ => {}
    }
    state
}
