//! The batch dispatcher: fans a batch of requests out over one runtime.
//!
//! # Design
//! `Session` bridges a blocking caller into async execution. Each call to
//! `send_requests` builds a fresh tokio runtime, runs every request
//! concurrently against a single `reqwest::Client`, and drops the runtime
//! before returning — the runtime is a local, so teardown happens on every
//! exit path. Futures are joined with `futures-concurrency`, which resolves
//! them concurrently and returns outputs in submission order regardless of
//! completion order. In fail-fast mode `try_join` drops the in-flight
//! siblings as soon as one request fails.

use futures_concurrency::future::{Join, TryJoin};
use reqwest::Client;
use serde_json::json;

use crate::envelope::RequestResult;
use crate::error::{RequestError, SessionError};
use crate::http::{HttpMethod, HttpResponse, RequestMap};
use crate::runtime::{self, RuntimeFlavor};

/// A batch of HTTP requests to send concurrently from blocking code.
///
/// The session owns its batch; `send_requests` consumes the session and
/// hands each descriptor back inside its [`RequestResult`].
#[derive(Debug)]
pub struct Session {
    requests: Vec<RequestMap>,
    flavor: RuntimeFlavor,
}

impl Session {
    pub fn new(requests: Vec<RequestMap>) -> Self {
        tracing::debug!(count = requests.len(), "session created");
        Self {
            requests,
            flavor: RuntimeFlavor::default(),
        }
    }

    /// Select the runtime flavor to drive this batch with. Purely a
    /// performance knob; results are identical across flavors.
    pub fn with_flavor(mut self, flavor: RuntimeFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Send every request in the batch concurrently and block until done.
    ///
    /// With `collect_errors = true`, every request runs to completion and
    /// transport failures are captured in their envelopes; the returned
    /// vector is 1:1 with the batch, in submission order. With
    /// `collect_errors = false`, the first failure aborts the batch:
    /// in-flight requests are dropped, settled successes are discarded,
    /// and a [`SessionError::Request`] naming the failed request is
    /// returned instead.
    ///
    /// Must be called from outside any async runtime; re-entrant use
    /// returns [`SessionError::NestedRuntime`]. An empty batch returns
    /// an empty vector without building a runtime.
    pub fn send_requests(self, collect_errors: bool) -> Result<Vec<RequestResult>, SessionError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(SessionError::NestedRuntime);
        }
        if self.requests.is_empty() {
            return Ok(Vec::new());
        }
        tracing::info!(
            count = self.requests.len(),
            collect_errors,
            "dispatching batch"
        );
        let rt = runtime::build(self.flavor).map_err(SessionError::Runtime)?;
        let results = rt.block_on(dispatch(self.requests, collect_errors));
        if let Ok(results) = &results {
            tracing::info!(count = results.len(), "batch complete");
        }
        results
    }
}

/// Fan the batch out on the current runtime and collect per the policy.
///
/// One `Client` serves the whole batch, the aiohttp-session analogue; it
/// is dropped with the runtime when the call returns.
async fn dispatch(
    requests: Vec<RequestMap>,
    collect_errors: bool,
) -> Result<Vec<RequestResult>, SessionError> {
    let client = Client::new();
    if collect_errors {
        let futures: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let client = client.clone();
                async move {
                    let outcome = execute(&client, &request).await;
                    if let Err(e) = &outcome {
                        tracing::error!(url = request.url(), error = %e, "request failed");
                    }
                    RequestResult::new(request, outcome)
                }
            })
            .collect();
        Ok(futures.join().await)
    } else {
        let futures: Vec<_> = requests
            .into_iter()
            .enumerate()
            .map(|(index, request)| {
                let client = client.clone();
                async move {
                    match execute(&client, &request).await {
                        Ok(response) => Ok(RequestResult::new(request, Ok(response))),
                        Err(source) => Err(SessionError::Request {
                            index,
                            method: request.method(),
                            url: request.url().to_string(),
                            source,
                        }),
                    }
                }
            })
            .collect();
        futures.try_join().await
    }
}

/// Execute one descriptor through the transport.
async fn execute(client: &Client, request: &RequestMap) -> Result<HttpResponse, RequestError> {
    tracing::debug!(method = %request.method(), url = request.url(), "sending request");
    let mut builder = match request.method() {
        HttpMethod::Get => client.get(request.url()),
        HttpMethod::Post => client.post(request.url()),
        HttpMethod::Put => client.put(request.url()),
        HttpMethod::Patch => client.patch(request.url()),
        HttpMethod::Options => client.request(reqwest::Method::OPTIONS, request.url()),
        HttpMethod::Delete => client.delete(request.url()),
    };
    if let Some(params) = request.query_params() {
        builder = builder.query(&params);
    }
    if let Some(headers) = request.headers() {
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
    }
    if request.method().carries_body() {
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let text = response.text().await?;
    tracing::debug!(url = request.url(), status, "received response");

    let body = if text.is_empty() {
        None
    } else {
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            // Non-JSON payloads are preserved rather than rejected.
            Err(_) => Some(json!({ "text": text })),
        }
    };

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_is_a_no_op() {
        let results = Session::new(Vec::new()).send_requests(true).unwrap();
        assert!(results.is_empty());

        let results = Session::new(Vec::new()).send_requests(false).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn rejects_call_from_inside_a_runtime() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = rt.block_on(async {
            let requests =
                vec![RequestMap::new(HttpMethod::Get, "http://localhost:3000/").unwrap()];
            Session::new(requests).send_requests(true).unwrap_err()
        });
        assert!(matches!(err, SessionError::NestedRuntime));
    }

    #[test]
    fn nested_check_runs_before_empty_check() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = rt.block_on(async { Session::new(Vec::new()).send_requests(true).unwrap_err() });
        assert!(matches!(err, SessionError::NestedRuntime));
    }
}
