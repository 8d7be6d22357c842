//! Error types delivered through the observer error channel.
//!
//! # Design
//! `Transport` wraps the executor's `io::Error` verbatim — the adapter never
//! translates transport failures. `HttpStatus` is synthesized by the adapter
//! itself when a response lands outside the success range; callers match on
//! it to distinguish "the server answered badly" from "the network broke".
//! `Deserialization` only occurs for typed singles, whose body must parse.

use std::fmt;
use std::io;

/// Errors delivered to an observer's `on_error`.
#[derive(Debug)]
pub enum CallError {
    /// The round trip could not complete (connection dropped, reset, ...).
    /// Carries the executor's error unwrapped.
    Transport(io::Error),

    /// The server responded with a status outside `[200, 300)`.
    HttpStatus { status: u16 },

    /// A typed single could not parse the response body.
    Deserialization(String),
}

impl CallError {
    /// The synthesized error for a non-success `status`.
    pub fn http_status(status: u16) -> Self {
        CallError::HttpStatus { status }
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Transport(e) => write!(f, "{e}"),
            CallError::HttpStatus { status } => {
                write!(f, "HTTP {status} {}", reason_phrase(*status))
            }
            CallError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for CallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CallError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

/// Reason phrase for a status code, derived from its class.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        100..=199 => "Informational",
        200..=299 => "OK",
        300..=399 => "Redirection",
        400..=499 => "Client Error",
        500..=599 => "Server Error",
        _ => "Unknown Status",
    }
}
