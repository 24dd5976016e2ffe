mod error;
mod journal;
mod store;
mod subscription;

pub use error::{JournalError, StoreError};
pub use journal::{Journal, replay};
pub use store::{ReduceFn, Store};
pub use subscription::Subscription;
