//! Fallible property injection and request body validation.
//!
//! [`inject`] runs a factory against the context. A success is stored under a
//! property key; a failure `e` becomes a terminal response with the chosen
//! status and the JSON body `{"error": e}`. [`validate`] is the same with
//! 400 Bad Request, and [`validate_body`] decodes the JSON request body.

use futures::future::{BoxFuture, FutureExt};
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use wicket_core::{Context, Middleware, Outcome, PropKey, Status, read_body};

use super::props::set_prop;

#[derive(Serialize)]
struct ErrorBody<E> {
    error: E,
}

/// A middleware storing the factory's success under `key`, or failing with
/// `status` and `{"error": e}` on failure.
pub fn inject<T, E, F, Fut>(key: PropKey<T>, status: Status, factory: F) -> impl Middleware
where
    T: Send + Sync + 'static,
    E: Serialize,
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Outcome<E, T>> + Send,
{
    move |cx: Context| {
        let produced = factory(cx);
        async move {
            match produced.await {
                Outcome::Success(value) => set_prop(&key, value),
                Outcome::Failure(error) => {
                    Outcome::Failure(status.response().json(&ErrorBody { error }))
                }
            }
        }
    }
}

/// [`inject`] answering failures with 400 Bad Request.
pub fn validate<T, E, F, Fut>(key: PropKey<T>, factory: F) -> impl Middleware
where
    T: Send + Sync + 'static,
    E: Serialize,
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Outcome<E, T>> + Send,
{
    inject(key, Status::BadRequest, factory)
}

/// A factory reading the request body and decoding it as JSON into `T`.
///
/// The failure value describes the problem: an unreadable body, malformed
/// JSON, or a shape mismatch.
pub fn decode_body<T>() -> impl Fn(Context) -> BoxFuture<'static, Outcome<String, T>> + Send + Sync
where
    T: DeserializeOwned + Send + 'static,
{
    |cx: Context| {
        async move {
            let body = match read_body(cx.request()).await {
                Ok(body) => body,
                Err(error) => return Outcome::Failure(error.to_string()),
            };
            match serde_json::from_str::<T>(&body) {
                Ok(value) => Outcome::Success(value),
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(%error, "request body rejected");
                    Outcome::Failure(error.to_string())
                }
            }
        }
        .boxed()
    }
}

/// A middleware decoding the JSON request body into `T` and storing it under
/// `key`, or failing with 400 Bad Request.
pub fn validate_body<T>(key: PropKey<T>) -> impl Middleware
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    validate(key, decode_body::<T>())
}
