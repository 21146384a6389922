//! # wicket - A Functional Request Pipeline
//!
//! `wicket` handles HTTP-like requests as values. Failures travel through an
//! explicit [`Outcome`] rather than panics, middleware grows a per-request
//! [`Context`] and may stop the pipeline with a terminal [`Response`], and a
//! declarative [`Router`] dispatches a method and url to a [`Resource`].
//!
//! ## Quick Start
//!
//! ```rust
//! use wicket::prelude::*;
//! use wicket::testing::{get, run_app};
//!
//! let app = App::new(
//!     |cx: Builder| async move { cx.with(inject_header("x-app", "demo")) },
//!     Router::new().at("/hello/{name}", |cx: Builder, args| async move {
//!         let name = args.get("name").cloned().unwrap_or_default();
//!         Some(Resource::new().get(move || async move {
//!             cx.handle(move |_: Context| {
//!                 let greeting = format!("hello, {name}");
//!                 async move { Status::Ok.response().json(&greeting) }
//!             })
//!             .await
//!         }))
//!     }),
//! );
//!
//! # futures::executor::block_on(async {
//! let res = run_app(&app, get("/hello/world")).await;
//! assert_eq!(res.status(), Some(200));
//! assert_eq!(res.body(), Some("\"hello, world\""));
//! # });
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use wicket_core::{
    // Body
    Body,
    BodyError,
    // Errors
    BoxError,
    // Pipeline
    Builder,
    Chunk,
    ChunkStream,
    Context,
    Extension,
    // Outcome algebra
    FutureOutcome,
    Handler,
    HeaderValue,
    // Values
    Headers,
    IntoResponse,
    Middleware,
    MiddlewareResult,
    Outcome,
    PropError,
    PropKey,
    Props,
    Request,
    RequestError,
    Response,
    SendError,
    Status,
    StreamError,
    SyncHandler,
    SyncMiddleware,
    client_ip,
    read_body,
};

pub use wicket_std::{App, AppOptions, ResponseSink, send_response};

// Routing
pub use wicket_std::routing::{
    DEFAULT_CONTENT_TYPE, MethodHandler, Pattern, Resource, RouteArgs, Router, Segment, match_path,
};

/// Handler adapters.
pub mod handler {
    pub use wicket_core::handler::{Handler, SyncHandler, sync};
}

/// Middleware: the trait, adapters and stock implementations.
pub mod middleware {
    pub use wicket_core::middleware::{
        Extension, Middleware, MiddlewareResult, SyncMiddleware, sync,
    };
    pub use wicket_std::middleware::{
        RequestLogging, decode_body, inject, inject_header, inject_headers, inject_props,
        log_requests, set_header, set_headers, set_prop, set_props, validate, validate_body,
    };
}

/// Testing utilities.
pub mod testing {
    pub use wicket_std::testing::{
        CountingMiddleware, TestResponse, get, post, post_json, request, run_app,
    };
}

/// Prelude module - common imports for Wicket.
///
/// # Usage
///
/// ```rust
/// use wicket::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        App, Builder, Context, Extension, FutureOutcome, Handler, Headers, IntoResponse,
        Middleware, MiddlewareResult, Outcome, PropKey, Props, Request, Resource, Response,
        RouteArgs, Router, Status,
        middleware::{
            inject, inject_header, inject_headers, inject_props, set_header, set_headers,
            set_prop, set_props, validate, validate_body,
        },
    };
}
