use thiserror::Error;

/// Errors returned by [`Store`](crate::Store) operations.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// `dispatch` was called from inside a subscriber notification (or any
    /// other context where a dispatch on the same store is still running).
    ///
    /// The store rejects nested dispatch instead of queueing it, so every
    /// successful dispatch runs to completion before the next one starts.
    /// The action is discarded and the stored state is untouched.
    #[error("dispatch called while another dispatch is in progress")]
    ReentrantDispatch,
}

/// Errors produced while encoding or decoding a [`Journal`](crate::Journal).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JournalError {
    /// Reading from or writing to the caller-supplied sink failed.
    #[error("journal I/O failed")]
    Io(#[source] std::io::Error),

    /// An action could not be serialized as a JSON line.
    #[error("failed to encode action as JSON")]
    Encode(#[source] serde_json::Error),

    /// A line in the input was not a valid serialized action.
    #[error("failed to decode action from JSON line")]
    Decode(#[source] serde_json::Error),
}
