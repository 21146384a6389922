//! # Context Builder
//!
//! A [`Builder`] represents "the pipeline so far": a single deferred
//! [`FutureOutcome`] that yields either a terminal failure [`Response`] or the
//! current [`Context`].
//!
//! - [`with`](Builder::with) appends a [`Middleware`] step.
//! - [`handle`](Builder::handle) terminates the pipeline with a [`Handler`]
//!   and folds everything into one [`Response`].
//!
//! # Short-Circuiting
//!
//! Steps are chained with [`FutureOutcome::chain`], so once any step fails no
//! later middleware or handler body is executed. Headers accumulated before
//! the failure are still applied to the failure response, as defaults only:
//! the failure's own headers always take precedence.
//!
//! # Example
//!
//! ```rust
//! use wicket_core::{Builder, Context, Extension, Outcome, Request, Status, middleware};
//!
//! # futures::executor::block_on(async {
//! let response = Builder::new(Context::new(Request::new("GET", "/")))
//!     .with(middleware::sync(|_: Context| {
//!         Outcome::Success(Extension::default().with_header("x-step", "1"))
//!     }))
//!     .handle(|_: Context| async { Status::Ok })
//!     .await;
//!
//! assert_eq!(response.status(), 200);
//! assert!(response.headers().contains("x-step"));
//! # });
//! ```

use crate::{
    context::Context, future::FutureOutcome, handler::Handler, middleware::Middleware,
    outcome::Outcome, response::Response,
};
use std::{convert::identity, sync::Arc};

/// An immutable, reusable middleware pipeline.
///
/// Cloning is cheap. Appending a step never alters the builder it was
/// appended to, so one booted builder can be shared by every route.
#[derive(Clone, Debug)]
pub struct Builder {
    pipeline: FutureOutcome<Response, Context>,
}

impl Builder {
    /// Starts a pipeline from a base context.
    pub fn new(cx: Context) -> Self {
        Self {
            pipeline: FutureOutcome::success(cx),
        }
    }

    /// Appends a middleware step.
    ///
    /// If the pipeline has already failed, `middleware` is never invoked and
    /// the failure passes through unchanged. Otherwise the middleware runs
    /// against the current context:
    ///
    /// - on success, properties are merged with existing ones winning and
    ///   headers are merged with the contributed ones winning;
    /// - on failure, the accumulated headers are applied to the failure
    ///   response as defaults.
    pub fn with<M: Middleware>(&self, middleware: M) -> Builder {
        let middleware = Arc::new(middleware);
        let pipeline = self.pipeline.chain(move |cx: Context| {
            let accumulated = cx.headers().clone();
            let step = {
                let middleware = Arc::clone(&middleware);
                let cx = cx.clone();
                FutureOutcome::of(move || {
                    let middleware = Arc::clone(&middleware);
                    let cx = cx.clone();
                    async move { middleware.call(cx).await }
                })
            };

            step.map(move |extension| cx.extend(extension))
                .map_failure(move |failure: Response| {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(
                        status = failure.status(),
                        "middleware short-circuited the pipeline"
                    );
                    failure.default_headers(accumulated.clone())
                })
        });
        Builder { pipeline }
    }

    /// Runs the pipeline and terminates it with `handler`.
    ///
    /// A failed pipeline yields its failure response as-is and `handler` is
    /// never invoked. Otherwise the handler's response gets the accumulated
    /// headers as defaults: headers the handler set itself are kept.
    pub async fn handle<H: Handler>(&self, handler: H) -> Response {
        let handler = Arc::new(handler);
        self.pipeline
            .chain(move |cx: Context| {
                let accumulated = cx.headers().clone();
                let handler = Arc::clone(&handler);
                FutureOutcome::<Response, Response>::of(move || {
                    let handler = Arc::clone(&handler);
                    let cx = cx.clone();
                    async move { Outcome::Success(handler.call(cx).await) }
                })
                .map(move |response: Response| response.default_headers(accumulated.clone()))
            })
            .fold(identity, identity)
            .await
    }

    /// Runs the pipeline without a handler, yielding the failure response or
    /// the final context.
    pub async fn resolve(&self) -> Outcome<Response, Context> {
        self.pipeline.run().await
    }
}
