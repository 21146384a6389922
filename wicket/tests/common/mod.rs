#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use wicket::{
    Builder, Context, Extension, Headers, Middleware, MiddlewareResult, Outcome, Resource, Status,
};

// ============================================================================
// Test Payloads
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Payload {
    pub foo: String,
    pub bar: bool,
    pub baz: serde_json::Number,
}

// ============================================================================
// Test Middleware
// ============================================================================

/// Records its id into a shared log, then passes through.
pub struct OrderRecordingMiddleware {
    pub id: usize,
    pub order: Arc<Mutex<Vec<usize>>>,
}

impl Middleware for OrderRecordingMiddleware {
    async fn call(&self, _cx: Context) -> MiddlewareResult {
        self.order.lock().unwrap().push(self.id);
        Outcome::Success(Extension::default())
    }
}

/// Always fails with the given status and one marker header.
pub struct FailingMiddleware {
    pub status: Status,
}

impl Middleware for FailingMiddleware {
    async fn call(&self, _cx: Context) -> MiddlewareResult {
        Outcome::Failure(self.status.response().header("x-failed-by", "FailingMiddleware"))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// A resource whose `GET` runs `cx` to completion with a plain 200 handler.
pub fn ok_resource(cx: Builder) -> Resource {
    Resource::new().get(move || async move { cx.handle(|_: Context| async { Status::Ok }).await })
}

pub fn headers<const N: usize>(entries: [(&str, &str); N]) -> Headers {
    Headers::from(entries)
}
