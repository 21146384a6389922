//! # wicket-core
//!
//! Core primitives for the Wicket request pipeline.
//!
//! This crate has no knowledge of routing or of any host server. It is the
//! part plugins and custom middleware depend on.
//!
//! # Layers
//!
//! ## Outcome Algebra ([`Outcome`], [`FutureOutcome`])
//!
//! Every step of a pipeline either fails with a value or succeeds with a
//! value. [`FutureOutcome`] is the deferred, re-runnable form used to build
//! pipelines before any request is processed.
//!
//! ## Values ([`Request`], [`Response`], [`Headers`], [`Body`])
//!
//! Immutable request and response values. Response builder methods consume
//! and return; headers have explicit override and default semantics.
//!
//! ## Pipeline ([`Middleware`], [`Handler`], [`Builder`])
//!
//! A [`Builder`] accumulates a [`Context`] through middleware steps, stops at
//! the first failure, and ends with a handler producing the response.
//!
//! # Error Types
//!
//! - [`BodyError`] - Reading a request body
//! - [`StreamError`] - A chunk source failing
//! - [`RequestError`] - Converting raw request parts
//! - [`SendError`] - Writing a response to a host sink
//! - [`PropError`] - Reading a typed context property

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod body;
mod builder;
mod context;
mod error;
mod future;
pub mod handler;
mod headers;
pub mod middleware;
mod outcome;
mod request;
mod response;

// Re-exports
pub use body::{Body, Chunk, ChunkStream};
pub use builder::Builder;
pub use context::{Context, PropKey, Props};
pub use error::{BodyError, BoxError, PropError, RequestError, SendError, StreamError};
pub use future::FutureOutcome;
pub use handler::{Handler, SyncHandler};
pub use headers::{HeaderValue, Headers};
pub use middleware::{Extension, Middleware, MiddlewareResult, SyncMiddleware};
pub use outcome::Outcome;
pub use request::{Request, client_ip, read_body};
pub use response::{IntoResponse, Response, Status};
