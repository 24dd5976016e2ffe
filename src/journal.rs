//! Recording dispatched actions and replaying them into state.
//!
//! A reducer is deterministic, so a recorded action sequence is a complete
//! substitute for a recorded state sequence: fold the actions through the
//! same reducer from the same initial state and you get the same final
//! state. [`Journal`] is the in-memory record; [`replay`] is the fold.
//!
//! Durable storage stays with the caller — the codec methods write to and
//! read from any `io::Write` / `io::Read`, one JSON object per line.

use crate::error::JournalError;
use crate::store::ReduceFn;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{BufRead, BufReader, Read, Write};

/// Fold an action sequence through a reducer.
///
/// # Examples
///
/// ```
/// fn counter(state: i64, action: &&str) -> i64 {
///     match *action {
///         "increment" => state.saturating_add(1),
///         "decrement" => state.saturating_sub(1),
///         _ => state,
///     }
/// }
///
/// let actions = ["increment", "increment", "decrement"];
/// assert_eq!(statefold::replay(counter, 0, &actions), 1);
/// ```
pub fn replay<'a, S, A: 'a>(
    reducer: ReduceFn<S, A>,
    initial: S,
    actions: impl IntoIterator<Item = &'a A>,
) -> S {
    actions
        .into_iter()
        .fold(initial, |state, action| reducer(state, action))
}

/// An append-only, in-memory record of actions.
///
/// # Examples
///
/// ```
/// use statefold::Journal;
///
/// let mut journal = Journal::new();
/// journal.record("increment");
/// journal.record("decrement");
/// assert_eq!(journal.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Journal<A> {
    actions: Vec<A>,
}

impl<A> Journal<A> {
    /// Create an empty journal.
    pub fn new() -> Self {
        Journal {
            actions: Vec::new(),
        }
    }

    /// Append an action to the record.
    pub fn record(&mut self, action: A) {
        self.actions.push(action);
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the journal holds no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate over the recorded actions in record order.
    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.actions.iter()
    }

    /// Fold the recorded actions through `reducer` starting from `initial`.
    ///
    /// Equivalent to driving a fresh store through the same actions.
    pub fn replay<S>(&self, reducer: ReduceFn<S, A>, initial: S) -> S {
        replay(reducer, initial, self.iter())
    }
}

impl<A> Default for Journal<A> {
    fn default() -> Self {
        Journal::new()
    }
}

impl<A: Serialize> Journal<A> {
    /// Write the journal to `writer`, one action per JSON line.
    ///
    /// # Errors
    ///
    /// Returns an error if an action fails to serialize or the writer fails.
    pub fn to_writer(&self, mut writer: impl Write) -> Result<(), JournalError> {
        for action in &self.actions {
            let json = serde_json::to_string(action).map_err(JournalError::Encode)?;
            writeln!(writer, "{json}").map_err(JournalError::Io)?;
        }
        Ok(())
    }
}

impl<A: DeserializeOwned> Journal<A> {
    /// Read a journal from `reader`: one action per JSON line, empty lines
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or a non-empty line is not a valid
    /// serialized action.
    pub fn from_reader(reader: impl Read) -> Result<Self, JournalError> {
        let mut actions = Vec::new();
        for line in BufReader::new(reader).lines() {
            let line = line.map_err(JournalError::Io)?;
            if line.is_empty() {
                continue;
            }
            let action = serde_json::from_str(&line).map_err(JournalError::Decode)?;
            actions.push(action);
        }
        Ok(Journal { actions })
    }
}

impl<'a, A> IntoIterator for &'a Journal<A> {
    type Item = &'a A;
    type IntoIter = std::slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
