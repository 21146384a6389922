//! # Application Boundary
//!
//! [`App`] joins a boot pipeline and a route table into a request handler,
//! and [`send_response`] writes the result to a host [`ResponseSink`].
//!
//! This is the only layer that tolerates unexpected failures. A malformed
//! host request or a panic anywhere in boot, routing, middleware or handlers
//! is answered with 500 Internal Server Error, and logged when the `tracing`
//! feature is enabled.

use crate::routing::Router;
use futures::{
    StreamExt,
    future::{BoxFuture, FutureExt},
};
use std::{future::Future, panic::AssertUnwindSafe};
use wicket_core::{
    Body, BoxError, Builder, Chunk, Context, HeaderValue, Headers, Request, Response, SendError,
    Status,
};

/// The host side of a response: where status, headers and body go.
///
/// [`send_response`] calls `write_head` once, `write` zero or more times,
/// then `end`.
pub trait ResponseSink: Send {
    /// Writes the status line and headers.
    fn write_head(
        &mut self,
        status: u16,
        headers: &Headers,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;

    /// Writes one body chunk.
    fn write(&mut self, chunk: Chunk) -> impl Future<Output = Result<(), BoxError>> + Send;

    /// Finishes the response.
    fn end(&mut self) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Serializes `response` into `sink`.
///
/// A string body is written in one call (an empty string is not written at
/// all); a stream body is written chunk by chunk.
pub async fn send_response<K: ResponseSink>(response: Response, sink: &mut K) -> Result<(), SendError> {
    let (status, headers, body) = response.into_parts();
    sink.write_head(status, &headers).await.map_err(SendError::Sink)?;

    match body {
        Some(Body::Text(text)) if !text.is_empty() => {
            sink.write(Chunk::Text(text)).await.map_err(SendError::Sink)?;
        }
        Some(Body::Stream(mut chunks)) => {
            while let Some(chunk) = chunks.next().await {
                sink.write(chunk?).await.map_err(SendError::Sink)?;
            }
        }
        _ => {}
    }

    sink.end().await.map_err(SendError::Sink)
}

/// Per-application settings.
#[derive(Clone, Debug)]
pub struct AppOptions {
    base_headers: Headers,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            base_headers: Headers::from([("Connection", "keep-alive")]),
        }
    }
}

impl AppOptions {
    /// Replaces the headers every request's pipeline starts with.
    pub fn base_headers(self, base_headers: Headers) -> Self {
        Self { base_headers }
    }

    /// Adds or replaces one base header.
    pub fn base_header(mut self, name: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.base_headers.insert(name, value);
        self
    }

    /// The headers every request's pipeline starts with.
    pub fn headers(&self) -> &Headers {
        &self.base_headers
    }
}

type Boot = Box<dyn Fn(Builder) -> BoxFuture<'static, Builder> + Send + Sync>;

/// A complete request handler: boot middleware plus a route table.
///
/// For every request the app seeds a base context with the request and the
/// configured base headers, runs `boot` on a fresh [`Builder`], then
/// dispatches through the route table with the booted builder as state.
///
/// # Example
///
/// ```rust
/// use wicket_core::{Builder, Context, Status};
/// use wicket_std::{App, middleware::inject_header, routing::{Resource, Router}};
///
/// let app = App::new(
///     |cx: Builder| async move { cx.with(inject_header("x-powered-by", "wicket")) },
///     Router::new().at("/", |cx: Builder, _| async move {
///         Some(Resource::new().get(move || async move {
///             cx.handle(|_: Context| async { Status::Ok }).await
///         }))
///     }),
/// );
/// # let _ = app;
/// ```
pub struct App {
    boot: Boot,
    routes: Router<Builder>,
    options: AppOptions,
}

impl App {
    /// Create an app from an async boot step and a route table.
    pub fn new<B, Fut>(boot: B, routes: Router<Builder>) -> Self
    where
        B: Fn(Builder) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Builder> + Send + 'static,
    {
        Self {
            boot: Box::new(move |cx| boot(cx).boxed()),
            routes,
            options: AppOptions::default(),
        }
    }

    /// Create an app whose boot step adds nothing.
    pub fn with_routes(routes: Router<Builder>) -> Self {
        Self::new(|cx: Builder| async move { cx }, routes)
    }

    /// Replaces the options.
    pub fn options(self, options: AppOptions) -> Self {
        Self { options, ..self }
    }

    /// Produces the response for `request`, converting a panic into 500.
    pub async fn respond(&self, request: Request) -> Response {
        match AssertUnwindSafe(self.dispatch(request)).catch_unwind().await {
            Ok(response) => response,
            Err(panic) => {
                #[cfg(feature = "tracing")]
                tracing::error!(panic = panic_message(panic.as_ref()), "request pipeline panicked");
                #[cfg(not(feature = "tracing"))]
                let _ = panic;
                Status::InternalServerError.response()
            }
        }
    }

    /// Handles `request` and writes the response into `sink`.
    ///
    /// Sink and body stream failures are logged; there is no one left to
    /// answer at that point.
    pub async fn serve<K: ResponseSink>(&self, request: Request, sink: &mut K) {
        let response = self.respond(request).await;
        report_send(send_response(response, sink).await);
    }

    /// Like [`serve`](Self::serve), for raw host request parts.
    ///
    /// A missing url or method is answered with 500.
    pub async fn serve_parts<K: ResponseSink>(
        &self,
        method: Option<String>,
        url: Option<String>,
        headers: Headers,
        body: Body,
        sink: &mut K,
    ) {
        match Request::from_parts(method, url, headers, body) {
            Ok(request) => self.serve(request, sink).await,
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::error!(%error, "rejected malformed request");
                #[cfg(not(feature = "tracing"))]
                let _ = error;
                report_send(send_response(Status::InternalServerError.response(), sink).await);
            }
        }
    }

    async fn dispatch(&self, request: Request) -> Response {
        let method = request.method().to_string();
        let url = request.url().to_string();

        let base = Context::new(request).with_headers(self.options.base_headers.clone());
        let booted = (self.boot)(Builder::new(base)).await;
        self.routes.route_with(booted, &method, &url).await
    }
}

fn report_send(result: Result<(), SendError>) {
    if let Err(error) = result {
        #[cfg(feature = "tracing")]
        tracing::error!(%error, "failed to send response");
        #[cfg(not(feature = "tracing"))]
        let _ = error;
    }
}

#[cfg(feature = "tracing")]
fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic>"
    }
}
