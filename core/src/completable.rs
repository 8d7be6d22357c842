//! The completion adapter: one HTTP round trip, one terminal signal.
//!
//! # Design
//! `Completable` wraps a [`Call`] and executes it once per subscription.
//! The outcome is classified by a pure function: a success-range status
//! completes (the body is discarded), any other status becomes
//! [`CallError::HttpStatus`], and a transport failure is passed through
//! unwrapped. Subscriptions are independent; the adapter holds no state
//! between them beyond the shared, immutable call definition.

use std::io;
use std::sync::Arc;

use log::debug;

use crate::error::CallError;
use crate::exec::ExecutionMode;
use crate::http::{Call, Response};
use crate::observer::{CompletableObserver, Disposable};

/// A reactive completion primitive over one HTTP call.
///
/// Subscribing triggers exactly one execution of the wrapped call and
/// delivers exactly one terminal signal. Subscribing again re-executes the
/// call; outcomes never leak between subscriptions.
#[derive(Debug)]
pub struct Completable<C> {
    call: Arc<C>,
    mode: ExecutionMode,
}

impl<C> Completable<C>
where
    C: Call + Send + Sync + 'static,
{
    /// Adapter executing on the subscribing thread.
    pub fn new(call: C) -> Self {
        Self::with_mode(call, ExecutionMode::Synchronous)
    }

    /// Adapter with an explicit execution mode.
    pub fn with_mode(call: C, mode: ExecutionMode) -> Self {
        Self {
            call: Arc::new(call),
            mode,
        }
    }

    /// Subscribe `observer`, triggering one independent execution of the
    /// wrapped call.
    ///
    /// The observer receives `on_subscribe` first, then exactly one of
    /// `on_complete` / `on_error` — unless the returned [`Disposable`] (or
    /// the one handed to `on_subscribe`) is disposed first, in which case
    /// the terminal signal is suppressed. Disposing during `on_subscribe`
    /// skips execution entirely.
    pub fn subscribe<O>(&self, mut observer: O) -> Disposable
    where
        O: CompletableObserver + Send + 'static,
    {
        let disposable = Disposable::new();
        observer.on_subscribe(disposable.clone());
        if disposable.is_disposed() {
            return disposable;
        }

        let call = Arc::clone(&self.call);
        let handle = disposable.clone();
        self.mode.dispatch(move || {
            let request = call.request();
            debug!("executing {} {}", request.method, request.url);
            match classify(call.execute()) {
                Ok(()) => {
                    if handle.try_terminate() {
                        observer.on_complete();
                    }
                }
                Err(error) => {
                    debug!("call failed: {error}");
                    if handle.try_terminate() {
                        observer.on_error(error);
                    }
                }
            }
        });
        disposable
    }
}

/// Stateless mapping from one execution outcome to a terminal signal.
fn classify(outcome: Result<Response, io::Error>) -> Result<(), CallError> {
    match outcome {
        Ok(response) if response.is_success() => Ok(()),
        Ok(response) => Err(CallError::http_status(response.status)),
        Err(e) => Err(CallError::Transport(e)),
    }
}
