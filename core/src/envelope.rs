//! The per-request result envelope.

use serde::Serialize;
use serde_json::Value;

use crate::error::RequestError;
use crate::http::{HttpResponse, RequestMap};

/// The outcome of executing one descriptor: the originating request paired
/// with exactly one of a response or a captured transport failure.
///
/// In collect mode the session returns one of these per submitted request,
/// at the same index the request was submitted at. Serializes for
/// reporting; `Result` renders as an `Ok`/`Err`-tagged object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestResult {
    request: RequestMap,
    outcome: Result<HttpResponse, RequestError>,
}

impl RequestResult {
    pub(crate) fn new(request: RequestMap, outcome: Result<HttpResponse, RequestError>) -> Self {
        Self { request, outcome }
    }

    /// The descriptor this result answers.
    pub fn request(&self) -> &RequestMap {
        &self.request
    }

    pub fn outcome(&self) -> &Result<HttpResponse, RequestError> {
        &self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Status code of the response, if the request completed.
    pub fn status(&self) -> Option<u16> {
        self.outcome.as_ref().ok().map(|r| r.status)
    }

    /// Parsed response body, if the request completed and had one.
    pub fn body(&self) -> Option<&Value> {
        self.outcome.as_ref().ok().and_then(|r| r.body.as_ref())
    }

    /// The captured failure, if the request did not complete.
    pub fn error(&self) -> Option<&RequestError> {
        self.outcome.as_ref().err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use serde_json::json;

    fn request() -> RequestMap {
        RequestMap::new(HttpMethod::Get, "http://localhost:3000/").unwrap()
    }

    #[test]
    fn success_accessors() {
        let result = RequestResult::new(
            request(),
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: Some(json!({"message": "ok"})),
            }),
        );
        assert!(result.is_success());
        assert_eq!(result.status(), Some(200));
        assert_eq!(result.body(), Some(&json!({"message": "ok"})));
        assert!(result.error().is_none());
        assert_eq!(result.request().url(), "http://localhost:3000/");
    }

    #[test]
    fn failure_accessors() {
        let result = RequestResult::new(
            request(),
            Err(RequestError::Connect("refused".to_string())),
        );
        assert!(!result.is_success());
        assert_eq!(result.status(), None);
        assert!(result.body().is_none());
        assert_eq!(result.error().map(RequestError::kind), Some("connect"));
    }

    #[test]
    fn envelope_serializes_for_reporting() {
        let success = RequestResult::new(
            request(),
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: None,
            }),
        );
        let v = serde_json::to_value(&success).unwrap();
        assert_eq!(v["request"]["method"], "GET");
        assert_eq!(v["outcome"]["Ok"]["status"], 200);

        let failure = RequestResult::new(
            request(),
            Err(RequestError::Connect("refused".to_string())),
        );
        let v = serde_json::to_value(&failure).unwrap();
        assert_eq!(v["outcome"]["Err"]["Connect"], "refused");
    }
}
