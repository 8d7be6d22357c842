//! Reactive adapters bridging one HTTP round trip into terminal signals.
//!
//! # Overview
//! A [`Call`] performs one blocking HTTP round trip. The adapters in this
//! crate wrap a call and, per subscription, execute it exactly once and
//! deliver exactly one terminal signal to the observer:
//!
//! - [`Completable`] — completion or error, body discarded.
//! - [`ResponseSingle`] — the raw [`Response`], any status.
//! - [`Single<T>`](Single) — the body deserialized into `T` on success.
//!
//! # Design
//! - The core is transport-free (host-does-IO): it defines the `Call` seam
//!   and plain-data request/response types; the host executes the I/O.
//! - Subscriptions are independent. Each one re-executes the call; no
//!   result is cached or shared across subscriptions.
//! - Failures travel through the observer's error channel as [`CallError`]
//!   values, never as panics. Transport failures are passed through
//!   unwrapped; non-2xx statuses become a synthesized `HTTP <code>
//!   <reason>` error.
//! - [`Disposable`] cancellation suppresses delivery; it does not
//!   interrupt an in-flight round trip.

pub mod completable;
pub mod error;
pub mod exec;
pub mod http;
pub mod observer;
pub mod single;

pub use completable::Completable;
pub use error::CallError;
pub use exec::ExecutionMode;
pub use http::{Call, Method, Request, Response};
pub use observer::{CompletableObserver, Disposable, SingleObserver};
pub use single::{ResponseSingle, Single};
