//! Observer capability traits and the subscription cancellation handle.
//!
//! # Design
//! Terminal-signal discipline lives in [`Disposable`] rather than in each
//! adapter: the handle is a tri-state atom (active, disposed, terminated)
//! and delivering a terminal signal means winning the single
//! `try_terminate` transition. A `dispose` that lands first suppresses the
//! signal; a signal that lands first makes later `dispose` calls no-ops.
//! This encodes "exactly one of {completion, error}, never after
//! cancellation" as a state machine instead of relying on call-site care.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::error::CallError;

const ACTIVE: u8 = 0;
const DISPOSED: u8 = 1;
const TERMINATED: u8 = 2;

/// Clonable handle to one subscription's lifecycle.
///
/// Handed to the observer in `on_subscribe`. Cloning shares the same
/// underlying state; disposing any clone cancels the subscription.
#[derive(Debug, Clone)]
pub struct Disposable {
    state: Arc<AtomicU8>,
}

impl Disposable {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(ACTIVE)),
        }
    }

    /// Request cancellation. No terminal signal is delivered after a
    /// `dispose` that precedes it; an in-flight round trip is not
    /// interrupted, only its outcome is discarded.
    pub fn dispose(&self) {
        let _ = self
            .state
            .compare_exchange(ACTIVE, DISPOSED, Ordering::AcqRel, Ordering::Acquire);
    }

    /// True once the subscription is disposed or has delivered its
    /// terminal signal.
    pub fn is_disposed(&self) -> bool {
        self.state.load(Ordering::Acquire) != ACTIVE
    }

    /// Claim the right to deliver the terminal signal. Succeeds at most
    /// once per subscription, and never after `dispose`.
    pub(crate) fn try_terminate(&self) -> bool {
        self.state
            .compare_exchange(ACTIVE, TERMINATED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Consumer of a completion adapter's terminal signal.
///
/// Receives `on_subscribe` exactly once, then at most one of `on_complete`
/// and `on_error`, never both.
pub trait CompletableObserver {
    fn on_subscribe(&mut self, disposable: Disposable);
    fn on_complete(&mut self);
    fn on_error(&mut self, error: CallError);
}

/// Consumer of a value-carrying single's terminal signal.
///
/// Same discipline as [`CompletableObserver`], with `on_success(value)` in
/// place of `on_complete`.
pub trait SingleObserver<T> {
    fn on_subscribe(&mut self, disposable: Disposable);
    fn on_success(&mut self, value: T);
    fn on_error(&mut self, error: CallError);
}
