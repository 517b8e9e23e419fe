//! Concurrent HTTP batching for blocking code.
//!
//! # Overview
//! Submit an ordered batch of independent HTTP requests from ordinary
//! sequential code and have them executed concurrently, blocking only
//! until the whole batch settles. The caller never touches an async
//! runtime: each call builds one, drives it, and tears it down.
//!
//! # Design
//! - `RequestMap` is an immutable descriptor, validated at construction.
//! - `RequestResult` pairs each descriptor with exactly one of a response
//!   or a captured transport failure; output order is submission order.
//! - `Session::send_requests(collect_errors)` selects the failure policy:
//!   collect every outcome, or abort the batch on the first failure.
//! - The library logs through `tracing` and installs no subscriber;
//!   it is silent unless the consuming application wires one up.
//!
//! ```no_run
//! use volley_core::{HttpMethod, RequestMap, Session};
//!
//! # fn main() -> Result<(), volley_core::SessionError> {
//! let requests = vec![
//!     RequestMap::new(HttpMethod::Get, "http://localhost:3000/")?,
//!     RequestMap::new(HttpMethod::Get, "http://localhost:3000/echo")?,
//! ];
//! for result in Session::new(requests).send_requests(true)? {
//!     println!("{} -> {:?}", result.request().url(), result.status());
//! }
//! # Ok(())
//! # }
//! ```

pub mod envelope;
pub mod error;
pub mod http;
pub mod runtime;
pub mod session;

pub use envelope::RequestResult;
pub use error::{RequestError, SessionError};
pub use http::{HttpMethod, HttpResponse, RequestMap};
pub use runtime::RuntimeFlavor;
pub use session::Session;
