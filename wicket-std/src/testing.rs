//! Testing utilities for Wicket.
//!
//! # Features
//!
//! - [`TestResponse`]: A [`ResponseSink`] that records what was written
//! - [`get`], [`post`], [`post_json`], [`request`]: Request constructors
//! - [`run_app`]: Serve one request and return the recorded response
//! - [`CountingMiddleware`]: A pass-through middleware that counts invocations

use crate::app::{App, ResponseSink};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use wicket_core::{
    Body, BoxError, Chunk, Context, Extension, Headers, Middleware, MiddlewareResult, Outcome,
    Request,
};

// ============================================================================
// Test Response
// ============================================================================

/// A response sink that records status, headers and a string body.
///
/// Byte chunks are accepted only if they are valid UTF-8.
#[derive(Debug, Default, Clone)]
pub struct TestResponse {
    status: Option<u16>,
    headers: Option<Headers>,
    body: Option<String>,
    writes: usize,
    ended: bool,
}

impl TestResponse {
    /// The recorded status, if `write_head` was called.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// The recorded headers, if `write_head` was called.
    pub fn headers(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }

    /// The concatenated body, if anything was written.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// The body parsed as JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(self.body()?).ok()
    }

    /// Number of `write` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Returns true once `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl ResponseSink for TestResponse {
    async fn write_head(&mut self, status: u16, headers: &Headers) -> Result<(), BoxError> {
        self.status = Some(status);
        self.headers = Some(headers.clone());
        Ok(())
    }

    async fn write(&mut self, chunk: Chunk) -> Result<(), BoxError> {
        let text = match chunk {
            Chunk::Text(text) => text,
            Chunk::Bytes(bytes) => String::from_utf8(bytes.to_vec())?,
        };
        self.body.get_or_insert_with(String::new).push_str(&text);
        self.writes += 1;
        Ok(())
    }

    async fn end(&mut self) -> Result<(), BoxError> {
        self.ended = true;
        Ok(())
    }
}

// ============================================================================
// Requests
// ============================================================================

/// A request with the given method, url, body and headers.
pub fn request(method: &str, url: &str, body: impl Into<Body>, headers: Headers) -> Request {
    Request::new(method, url).with_headers(headers).with_body(body)
}

/// A `GET` request with no body.
pub fn get(url: &str) -> Request {
    request("GET", url, "", Headers::new())
}

/// A `POST` request with a string body.
pub fn post(url: &str, body: impl Into<Body>) -> Request {
    request("POST", url, body, Headers::new())
}

/// A `POST` request whose body is `value` serialized as JSON.
pub fn post_json(url: &str, value: serde_json::Value) -> Request {
    post(url, value.to_string())
}

/// Serves `request` through `app` and returns what was written.
pub async fn run_app(app: &App, request: Request) -> TestResponse {
    let mut out = TestResponse::default();
    app.serve(request, &mut out).await;
    out
}

// ============================================================================
// Counting Middleware
// ============================================================================

/// A middleware that counts invocations and contributes nothing.
///
/// # Example
///
/// ```rust
/// use wicket_std::testing::CountingMiddleware;
///
/// let counter = CountingMiddleware::new();
/// let probe = counter.clone();
/// // Use `counter` in a pipeline...
/// assert_eq!(probe.count(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CountingMiddleware {
    count: Arc<AtomicUsize>,
}

impl CountingMiddleware {
    /// Create a new counting middleware.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Middleware for CountingMiddleware {
    async fn call(&self, _cx: Context) -> MiddlewareResult {
        self.count.fetch_add(1, Ordering::SeqCst);
        Outcome::Success(Extension::default())
    }
}
