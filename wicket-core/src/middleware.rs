//! # Middleware
//!
//! A middleware inspects the current [`Context`] and either
//!
//! - fails with a terminal [`Response`], which short-circuits the rest of
//!   the pipeline, or
//! - succeeds with an [`Extension`]: new properties and headers to merge
//!   into the successor context.
//!
//! # Usage Patterns
//!
//! 1. **Async closure**: `|cx: Context| async move { ... }`
//! 2. **Sync closure**: [`sync(|cx: Context| ...)`](sync)
//! 3. **Struct implementation**: `impl Middleware for MyMiddleware`

use crate::{
    context::{Context, PropKey, Props},
    headers::{HeaderValue, Headers},
    outcome::Outcome,
    response::Response,
};
use std::future::Future;

/// What a middleware contributes on success.
#[derive(Clone, Debug, Default)]
pub struct Extension {
    props: Props,
    headers: Headers,
}

impl Extension {
    /// Contribute both properties and headers.
    pub fn new(props: Props, headers: Headers) -> Self {
        Self { props, headers }
    }

    /// Contribute properties only.
    pub fn props(props: Props) -> Self {
        Self::new(props, Headers::new())
    }

    /// Contribute headers only.
    pub fn headers(headers: Headers) -> Self {
        Self::new(Props::new(), headers)
    }

    /// Adds one property to the contribution.
    pub fn with_prop<T: Send + Sync + 'static>(mut self, key: &PropKey<T>, value: T) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Adds one header to the contribution.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Splits into properties and headers.
    pub fn into_parts(self) -> (Props, Headers) {
        (self.props, self.headers)
    }
}

/// The result of one middleware step.
pub type MiddlewareResult = Outcome<Response, Extension>;

/// A step of a context-building pipeline.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Middleware`",
    label = "missing `Middleware` implementation",
    note = "Middleware must take a `Context` and produce a `MiddlewareResult`; wrap synchronous closures with `middleware::sync`."
)]
pub trait Middleware: Send + Sync + 'static {
    /// Runs the step against the current context.
    fn call(&self, cx: Context) -> impl Future<Output = MiddlewareResult> + Send;
}

impl<F, Fut> Middleware for F
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MiddlewareResult> + Send,
{
    fn call(&self, cx: Context) -> impl Future<Output = MiddlewareResult> + Send {
        (self)(cx)
    }
}

/// A middleware backed by a synchronous function.
///
/// Created by [`sync`].
#[derive(Clone, Copy, Debug)]
pub struct SyncMiddleware<F> {
    func: F,
}

/// Wraps a synchronous function as a [`Middleware`].
pub fn sync<F>(func: F) -> SyncMiddleware<F>
where
    F: Fn(Context) -> MiddlewareResult + Send + Sync + 'static,
{
    SyncMiddleware { func }
}

impl<F> Middleware for SyncMiddleware<F>
where
    F: Fn(Context) -> MiddlewareResult + Send + Sync + 'static,
{
    async fn call(&self, cx: Context) -> MiddlewareResult {
        (self.func)(cx)
    }
}
