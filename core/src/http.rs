//! Plain-data HTTP types: the request descriptor and the response payload.
//!
//! # Design
//! A `RequestMap` describes one HTTP call as immutable data. It is validated
//! when constructed — an empty URL or an unknown method name is rejected
//! before a batch ever runs, never deferred into the dispatch. The session
//! owns the batch for the duration of a call and hands each descriptor back,
//! untouched, inside its `RequestResult`.
//!
//! All fields use owned types (`String`, `Vec`) so descriptors can move into
//! request futures without lifetime concerns.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SessionError;

/// HTTP method for a request. Closed set — anything else is a
/// construction-time error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Options,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET requests never carry a body; every other method does.
    pub(crate) fn carries_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "OPTIONS" => Ok(HttpMethod::Options),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(SessionError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// An immutable description of a single HTTP call.
///
/// Built with [`RequestMap::new`] plus the consuming `with_*` methods; once
/// a batch is submitted the session never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestMap {
    url: String,
    method: HttpMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query_params: Option<Vec<(String, String)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<Vec<(String, String)>>,
}

impl RequestMap {
    /// Create a descriptor for `method` against `url`.
    ///
    /// Returns `SessionError::EmptyUrl` if the URL is empty.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Result<Self, SessionError> {
        let url = url.into();
        if url.is_empty() {
            return Err(SessionError::EmptyUrl);
        }
        Ok(Self {
            url,
            method,
            body: None,
            query_params: None,
            headers: None,
        })
    }

    /// Attach a JSON object payload. Sent for every method except GET,
    /// which ignores it.
    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach query parameters, appended to the URL by the transport.
    pub fn with_query_params(mut self, params: Vec<(String, String)>) -> Self {
        self.query_params = Some(params);
        self
    }

    /// Attach request headers.
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }

    pub fn query_params(&self) -> Option<&[(String, String)]> {
        self.query_params.as_deref()
    }

    pub fn headers(&self) -> Option<&[(String, String)]> {
        self.headers.as_deref()
    }
}

/// The response side of a completed request.
///
/// The status code is passed through uninspected — a 500 still lands here,
/// not in the error slot. `body` holds parsed JSON when the payload parses;
/// a non-JSON payload is wrapped as `{"text": "<raw>"}` and an empty payload
/// is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}
