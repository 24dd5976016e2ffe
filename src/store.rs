use crate::error::StoreError;
use crate::subscription::{Registry, Subscription};
use log::{debug, error, trace};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

/// A pure function that folds an action into state.
///
/// Reducers receive owned state and return owned state. They should be pure
/// (no I/O, no side effects) and return the input state unchanged for any
/// action they do not recognize — a `_ => {}` arm, never an error.
///
/// The type is a plain function pointer rather than a closure bound, so a
/// reducer cannot capture environment. Same `(state, action)` in, same state
/// out — which is what makes a recorded action sequence a faithful substitute
/// for a recorded state sequence (see [`replay`](crate::replay)).
///
/// # Examples
///
/// ```
/// use statefold::ReduceFn;
///
/// #[derive(Debug)]
/// enum Action {
///     Increment,
///     Decrement,
/// }
///
/// fn counter(state: i64, action: &Action) -> i64 {
///     match action {
///         Action::Increment => state.saturating_add(1),
///         Action::Decrement => state.saturating_sub(1),
///     }
/// }
///
/// let reducer: ReduceFn<i64, Action> = counter;
/// assert_eq!(reducer(0, &Action::Increment), 1);
/// ```
pub type ReduceFn<S, A> = fn(S, &A) -> S;

/// A unidirectional state container.
///
/// Holds one state value, a reducer, and a set of subscribers. The only way
/// to change the state is [`dispatch`](Store::dispatch): the reducer computes
/// a replacement value from the current state and the action, the store swaps
/// it in, and every subscriber is notified in registration order.
///
/// The store is single-threaded: it uses interior mutability so that
/// subscribers can read back into it, and is neither `Send` nor `Sync`.
/// A multi-threaded host must serialize access externally.
///
/// # Examples
///
/// ```
/// use statefold::Store;
///
/// #[derive(Debug, Default, Clone, PartialEq)]
/// struct AppState {
///     counter: i64,
///     paused: bool,
/// }
///
/// #[derive(Debug)]
/// enum Action {
///     Increment,
///     Decrement,
/// }
///
/// fn reduce(mut state: AppState, action: &Action) -> AppState {
///     match action {
///         Action::Increment => state.counter = state.counter.saturating_add(1),
///         Action::Decrement => state.counter = state.counter.saturating_sub(1),
///     }
///     state
/// }
///
/// let store = Store::new(reduce);
/// store.dispatch(Action::Increment).unwrap();
/// store.dispatch(Action::Increment).unwrap();
/// store.dispatch(Action::Decrement).unwrap();
/// assert_eq!(store.state().counter, 1);
/// ```
pub struct Store<S, A> {
    reducer: ReduceFn<S, A>,
    state: RefCell<S>,
    subscribers: Rc<RefCell<Registry>>,
    dispatching: Cell<bool>,
}

impl<S, A> Store<S, A>
where
    S: Clone,
    A: fmt::Debug,
{
    /// Create a store with an explicit initial state.
    ///
    /// The reducer is not called at construction; the first transition
    /// happens on the first [`dispatch`](Store::dispatch).
    pub fn with_initial(reducer: ReduceFn<S, A>, initial: S) -> Self {
        Store {
            reducer,
            state: RefCell::new(initial),
            subscribers: Rc::new(RefCell::new(Registry::new())),
            dispatching: Cell::new(false),
        }
    }

    /// Return a snapshot of the current state.
    ///
    /// Side-effect free. Returns a clone, so the caller observes a value the
    /// store will never mutate. Callable from inside a subscriber, where it
    /// returns the post-transition state of the dispatch being notified.
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Apply an action: fold it into the current state via the reducer,
    /// replace the stored state, then notify every subscriber in
    /// registration order.
    ///
    /// The reducer runs on a clone of the current state, so a panicking
    /// reducer propagates to the caller with the stored state untouched and
    /// no subscriber notified. A panicking subscriber is caught, reported
    /// via `log::error!`, and does not prevent later subscribers from
    /// running.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ReentrantDispatch`] if a dispatch is already in
    /// progress on this store (e.g. a subscriber dispatching from inside its
    /// notification). The action is discarded and the state is unchanged.
    pub fn dispatch(&self, action: A) -> Result<(), StoreError> {
        if self.dispatching.get() {
            return Err(StoreError::ReentrantDispatch);
        }
        self.dispatching.set(true);
        let _guard = DispatchGuard(&self.dispatching);

        debug!("dispatching {action:?}");

        let next = {
            let current = self.state.borrow().clone();
            (self.reducer)(current, &action)
        };
        *self.state.borrow_mut() = next;

        // Snapshot the subscriber list: subscribe/cancel calls made by a
        // callback take effect from the next dispatch only.
        let callbacks = self.subscribers.borrow().snapshot();
        for callback in callbacks {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| (*callback)())) {
                error!("subscriber panicked: {}", panic_message(&panic));
            }
        }

        Ok(())
    }

    /// Register a callback invoked after every future dispatch.
    ///
    /// Callbacks take no arguments; read the new state by calling back into
    /// the store with [`state`](Store::state). Returns a [`Subscription`]
    /// whose `cancel()` removes the callback.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let id = self.subscribers.borrow_mut().add(Rc::new(callback));
        trace!("subscriber {id} registered");
        Subscription::new(id, Rc::downgrade(&self.subscribers))
    }
}

impl<S, A> Store<S, A>
where
    S: Clone + Default,
    A: fmt::Debug,
{
    /// Create a store whose initial state is `S::default()`.
    pub fn new(reducer: ReduceFn<S, A>) -> Self {
        Self::with_initial(reducer, S::default())
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state.borrow())
            .field("subscribers", &self.subscribers.borrow().len())
            .field("dispatching", &self.dispatching.get())
            .finish()
    }
}

/// Clears the in-progress flag even if the reducer or a subscriber panics,
/// so the store stays usable after a caught panic.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}
