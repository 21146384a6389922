//! Responses and the status vocabulary.
//!
//! A [`Response`] is an immutable value. Every builder method consumes the
//! response and returns a new one; nothing is changed in place. The four
//! header operators have distinct contracts:
//!
//! | Operator | On collision |
//! |----------|--------------|
//! | [`header`](Response::header) | the new value wins |
//! | [`default_header`](Response::default_header) | the existing value wins |
//! | [`merge_headers`](Response::merge_headers) | the given map wins |
//! | [`default_headers`](Response::default_headers) | the existing headers win |

use crate::{
    body::{Body, Chunk},
    error::StreamError,
    headers::{HeaderValue, Headers},
};
use futures::Stream;
use serde::Serialize;
use std::borrow::Cow;

/// The status codes this crate knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// 200
    Ok,
    /// 201
    Created,
    /// 202
    Accepted,
    /// 204
    NoContent,
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 405
    MethodNotAllowed,
    /// 418
    ImATeapot,
    /// 500
    InternalServerError,
    /// 503
    ServiceUnavailable,
}

impl Status {
    /// The numeric status code.
    pub const fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::Accepted => 202,
            Status::NoContent => 204,
            Status::BadRequest => 400,
            Status::Unauthorized => 401,
            Status::Forbidden => 403,
            Status::NotFound => 404,
            Status::MethodNotAllowed => 405,
            Status::ImATeapot => 418,
            Status::InternalServerError => 500,
            Status::ServiceUnavailable => 503,
        }
    }

    /// The fixed status text.
    pub const fn message(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Created => "Created",
            Status::Accepted => "Accepted",
            Status::NoContent => "No Content",
            Status::BadRequest => "Bad Request",
            Status::Unauthorized => "Unauthorized",
            Status::Forbidden => "Forbidden",
            Status::NotFound => "Not Found",
            Status::MethodNotAllowed => "Method Not Allowed",
            Status::ImATeapot => "I'm a teapot",
            Status::InternalServerError => "Internal Server Error",
            Status::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// A fresh response with this status and no headers or body.
    pub fn response(self) -> Response {
        Response::of(self.code(), self.message())
    }
}

/// An HTTP response value.
#[derive(Debug)]
pub struct Response {
    status: u16,
    message: Cow<'static, str>,
    headers: Headers,
    body: Option<Body>,
}

impl Response {
    /// A response with the given status and no headers or body.
    pub fn new(status: Status) -> Self {
        status.response()
    }

    /// A response with an arbitrary code and status text.
    pub fn of(status: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            message: message.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// The status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The status text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The body, if any.
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Takes the body out of the response.
    pub fn into_body(self) -> Option<Body> {
        self.body
    }

    /// Splits the response into status, headers and body.
    pub fn into_parts(self) -> (u16, Headers, Option<Body>) {
        (self.status, self.headers, self.body)
    }

    /// Replaces the body.
    pub fn with_body(self, body: impl Into<Body>) -> Self {
        Self {
            body: Some(body.into()),
            ..self
        }
    }

    /// Replaces the body with a complete string.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.with_body(Body::text(text))
    }

    /// Replaces the body with a one-shot chunk stream.
    pub fn stream<S>(self, source: S) -> Self
    where
        S: Stream<Item = Result<Chunk, StreamError>> + Send + 'static,
    {
        self.with_body(Body::stream(source))
    }

    /// Replaces the body with `value` serialized as JSON.
    ///
    /// Headers are untouched. If serialization fails the failure is logged
    /// (with the `tracing` feature) and a 500 response is returned in its place.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Self {
        match self.try_json(value) {
            Ok(response) => response,
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::error!(%error, "failed to serialize response body");
                #[cfg(not(feature = "tracing"))]
                let _ = error;
                Status::InternalServerError.response()
            }
        }
    }

    /// Replaces the body with `value` serialized as JSON.
    pub fn try_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(value)?;
        Ok(self.with_body(body))
    }

    /// Sets `name`, overwriting any existing value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets `name` only if it is absent. Never overwrites.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert_default(name, value);
        self
    }

    /// Lays `headers` over the current set: the given entries win.
    pub fn merge_headers(self, headers: Headers) -> Self {
        Self {
            headers: self.headers.overlay(headers),
            ..self
        }
    }

    /// Lays `headers` under the current set: they apply only where a key is missing.
    pub fn default_headers(self, headers: Headers) -> Self {
        Self {
            headers: self.headers.underlay(headers),
            ..self
        }
    }
}

impl From<Status> for Response {
    fn from(status: Status) -> Self {
        status.response()
    }
}

/// Conversion into a [`Response`].
///
/// Implemented for [`Response`] and [`Status`], so handlers may return either.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoResponse`",
    label = "missing `IntoResponse` implementation",
    note = "Handlers must produce a `Response` or a `Status`."
)]
pub trait IntoResponse {
    /// Convert into a response.
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for Status {
    fn into_response(self) -> Response {
        self.response()
    }
}
