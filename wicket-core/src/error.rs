//! Error types for Wicket.
//!
//! Domain failures (validation, routing) are never errors: they travel as
//! [`Response`](crate::Response) values through the failure side of an
//! [`Outcome`](crate::Outcome). The types here cover the infrastructure
//! around the pipeline:
//!
//! - [`BodyError`] - Reading an inbound request body
//! - [`StreamError`] - A chunk source failing mid-sequence
//! - [`RequestError`] - Converting raw host request parts
//! - [`SendError`] - Serializing a response to the host
//! - [`PropError`] - Reading a typed context property

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure raised by a body chunk source while it is being consumed.
///
/// This is kept distinct from handler and validation failures: it means the
/// underlying byte source broke, not that its content was rejected.
#[derive(Error, Debug)]
#[error("body stream failed: {0}")]
pub struct StreamError(#[source] pub BoxError);

impl StreamError {
    /// Wraps any error as a stream failure.
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self(error.into())
    }
}

/// Errors that can occur while reading a request body.
#[derive(Error, Debug)]
pub enum BodyError {
    /// The body is a one-shot stream that was already consumed.
    #[error("request body has already been consumed")]
    Consumed,

    /// The chunk source failed before the end of the body.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Errors that can occur while converting a host request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The host request carried no URL.
    #[error("no url")]
    MissingUrl,

    /// The host request carried no method.
    #[error("no method")]
    MissingMethod,
}

/// Errors that can occur while writing a response to the host.
#[derive(Error, Debug)]
pub enum SendError {
    /// The sink rejected a write.
    #[error("response sink error: {0}")]
    Sink(#[source] BoxError),

    /// The response body failed mid-sequence.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Errors that can occur while reading a typed context property.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropError {
    /// No property was registered under this name.
    #[error("no context property named `{0}`")]
    Missing(String),

    /// A property exists under this name but holds another type.
    #[error("context property `{name}` is not a `{expected}`")]
    TypeMismatch {
        /// The property name.
        name: String,
        /// The type the caller asked for.
        expected: &'static str,
    },
}
