//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate never touches the network: a [`Call`] is the seam behind which the
//! host (an application transport, or the ureq executor the integration
//! tests use) performs the actual round trip. This separation keeps the
//! adapter core deterministic and easy to test.
//!
//! All fields use owned types (`String`, `Vec`) so values can move freely
//! across threads when an adapter runs in enqueued mode.

use std::fmt;
use std::io;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// The immutable definition of one prospective HTTP request.
///
/// A `Request` is built once and may be executed any number of times; each
/// execution is an independent round trip.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Request {
    /// A bodyless GET request for `url`.
    pub fn get(url: &str) -> Self {
        Self {
            method: Method::Get,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// The result of executing a [`Request`] once.
///
/// Ephemeral: produced per execution, consumed by outcome classification,
/// never retained across subscriptions.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    /// True iff the status code is in the success range `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One executable HTTP call.
///
/// `execute` performs a single blocking round trip and returns the response,
/// or the transport failure that prevented one. Implementations must be
/// re-entrant: every `execute` is an independent round trip, with no result
/// shared between invocations. The adapters in this crate call `execute`
/// exactly once per subscription.
pub trait Call {
    /// The request definition this call executes.
    fn request(&self) -> Request;

    /// Perform one round trip.
    fn execute(&self) -> Result<Response, io::Error>;
}
