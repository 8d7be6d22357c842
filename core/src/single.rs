//! Value-carrying adapters: the response, or a typed body.
//!
//! Two flavors, same terminal discipline as [`Completable`](crate::Completable):
//!
//! - [`ResponseSingle`] treats every HTTP status as data and succeeds with
//!   the full [`Response`]; only transport failures reach `on_error`.
//! - [`Single<T>`] succeeds with the body deserialized into `T` for
//!   success-range statuses, and classifies everything else as an error.

use std::io;
use std::marker::PhantomData;
use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;

use crate::error::CallError;
use crate::exec::ExecutionMode;
use crate::http::{Call, Response};
use crate::observer::{Disposable, SingleObserver};

/// A reactive single yielding the raw [`Response`] of one HTTP call.
///
/// The status code is not interpreted: a 404 arrives through `on_success`
/// like any other response. Only a failed round trip errors.
#[derive(Debug)]
pub struct ResponseSingle<C> {
    call: Arc<C>,
    mode: ExecutionMode,
}

impl<C> ResponseSingle<C>
where
    C: Call + Send + Sync + 'static,
{
    pub fn new(call: C) -> Self {
        Self::with_mode(call, ExecutionMode::Synchronous)
    }

    pub fn with_mode(call: C, mode: ExecutionMode) -> Self {
        Self {
            call: Arc::new(call),
            mode,
        }
    }

    /// Subscribe `observer`, triggering one independent execution of the
    /// wrapped call. Same cancellation and exactly-once rules as
    /// [`Completable::subscribe`](crate::Completable::subscribe).
    pub fn subscribe<O>(&self, mut observer: O) -> Disposable
    where
        O: SingleObserver<Response> + Send + 'static,
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
            match call.execute() {
                Ok(response) => {
                    if handle.try_terminate() {
                        observer.on_success(response);
                    }
                }
                Err(e) => {
                    if handle.try_terminate() {
                        observer.on_error(CallError::Transport(e));
                    }
                }
            }
        });
        disposable
    }
}

/// A reactive single yielding the response body deserialized into `T`.
///
/// Mirrors the status classification of the completion adapter: non-2xx
/// statuses error with [`CallError::HttpStatus`], and a body that fails to
/// parse errors with [`CallError::Deserialization`].
#[derive(Debug)]
pub struct Single<T, C> {
    call: Arc<C>,
    mode: ExecutionMode,
    _value: PhantomData<fn() -> T>,
}

impl<T, C> Single<T, C>
where
    T: DeserializeOwned + Send + 'static,
    C: Call + Send + Sync + 'static,
{
    pub fn new(call: C) -> Self {
        Self::with_mode(call, ExecutionMode::Synchronous)
    }

    pub fn with_mode(call: C, mode: ExecutionMode) -> Self {
        Self {
            call: Arc::new(call),
            mode,
            _value: PhantomData,
        }
    }

    /// Subscribe `observer`, triggering one independent execution of the
    /// wrapped call.
    pub fn subscribe<O>(&self, mut observer: O) -> Disposable
    where
        O: SingleObserver<T> + Send + 'static,
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
            match parse_body::<T>(call.execute()) {
                Ok(value) => {
                    if handle.try_terminate() {
                        observer.on_success(value);
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

/// Classify one execution outcome and parse the body on success.
fn parse_body<T: DeserializeOwned>(
    outcome: Result<Response, io::Error>,
) -> Result<T, CallError> {
    match outcome {
        Ok(response) if response.is_success() => serde_json::from_str(&response.body)
            .map_err(|e| CallError::Deserialization(e.to_string())),
        Ok(response) => Err(CallError::http_status(response.status)),
        Err(e) => Err(CallError::Transport(e)),
    }
}
