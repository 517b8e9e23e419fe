//! Error types for batch dispatch.
//!
//! # Design
//! Two layers, matching how failures propagate. `RequestError` is the
//! per-request transport failure — in collect mode it is captured inside the
//! failing request's envelope and never aborts siblings. `SessionError` is
//! fatal to a whole call: construction problems, bridge misuse, and the
//! single propagated failure of a fail-fast batch. Fail-fast gets a
//! dedicated variant carrying the index, method, and URL of the request
//! that failed, because callers need to know which one it was.

use std::fmt;
use std::io;

use serde::Serialize;

use crate::http::HttpMethod;

/// A transport-level failure of one HTTP call.
///
/// Captured per-request in collect mode; wrapped in
/// [`SessionError::Request`] in fail-fast mode. Status codes are not
/// errors — a 4xx/5xx response lands in the success slot with its real
/// status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RequestError {
    /// The connection could not be established (refused, reset, DNS).
    Connect(String),

    /// The transport's configured timeout elapsed.
    Timeout(String),

    /// Any other failure of the HTTP exchange (protocol error, body read).
    Transport(String),
}

impl RequestError {
    /// Short machine-matchable name for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::Connect(_) => "connect",
            RequestError::Timeout(_) => "timeout",
            RequestError::Transport(_) => "transport",
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Connect(msg) => write!(f, "connection failed: {msg}"),
            RequestError::Timeout(msg) => write!(f, "request timed out: {msg}"),
            RequestError::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for RequestError {}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        let msg = e.to_string();
        if e.is_timeout() {
            RequestError::Timeout(msg)
        } else if e.is_connect() {
            RequestError::Connect(msg)
        } else {
            RequestError::Transport(msg)
        }
    }
}

/// Errors fatal to a whole batch call.
#[derive(Debug)]
pub enum SessionError {
    /// A `RequestMap` was constructed with an empty URL.
    EmptyUrl,

    /// A method name outside the supported set was parsed.
    UnsupportedMethod(String),

    /// `send_requests` was called from inside an already-running async
    /// runtime. The bridge must own its runtime; re-entrant use is a
    /// caller bug, reported distinctly from request failures.
    NestedRuntime,

    /// The runtime could not be constructed.
    Runtime(io::Error),

    /// Fail-fast mode: the first request to fail, identified by its
    /// position in the submitted batch.
    Request {
        index: usize,
        method: HttpMethod,
        url: String,
        source: RequestError,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyUrl => write!(f, "request URL must not be empty"),
            SessionError::UnsupportedMethod(m) => {
                write!(f, "unsupported HTTP method: {m}")
            }
            SessionError::NestedRuntime => {
                write!(f, "send_requests called from inside an async runtime")
            }
            SessionError::Runtime(e) => write!(f, "failed to build runtime: {e}"),
            SessionError::Request {
                index,
                method,
                url,
                source,
            } => {
                write!(f, "request {index} ({method} {url}) failed: {source}")
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Runtime(e) => Some(e),
            SessionError::Request { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_kinds() {
        assert_eq!(RequestError::Connect(String::new()).kind(), "connect");
        assert_eq!(RequestError::Timeout(String::new()).kind(), "timeout");
        assert_eq!(RequestError::Transport(String::new()).kind(), "transport");
    }

    #[test]
    fn fail_fast_error_names_the_request() {
        let err = SessionError::Request {
            index: 3,
            method: HttpMethod::Post,
            url: "http://localhost:1/foo".to_string(),
            source: RequestError::Connect("refused".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("request 3"));
        assert!(msg.contains("POST"));
        assert!(msg.contains("http://localhost:1/foo"));
        assert!(msg.contains("refused"));
    }

    #[test]
    fn fail_fast_error_exposes_source() {
        use std::error::Error;

        let err = SessionError::Request {
            index: 0,
            method: HttpMethod::Get,
            url: "http://localhost:1/".to_string(),
            source: RequestError::Timeout("deadline".to_string()),
        };
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "request timed out: deadline");
    }
}
