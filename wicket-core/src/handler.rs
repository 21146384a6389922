//! Terminal handlers.
//!
//! A [`Handler`] runs at the end of a pipeline with the final [`Context`] and
//! produces the [`Response`]. Async closures returning anything that is
//! [`IntoResponse`] are handlers; synchronous closures go through [`sync`].

use crate::{
    context::Context,
    response::{IntoResponse, Response},
};
use std::future::Future;

/// The terminal step of a pipeline.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Handler`",
    label = "missing `Handler` implementation",
    note = "Handlers must take a `Context` and produce something `IntoResponse`; wrap synchronous closures with `handler::sync`."
)]
pub trait Handler: Send + Sync + 'static {
    /// Produces the response for the final context.
    fn call(&self, cx: Context) -> impl Future<Output = Response> + Send;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send,
    R: IntoResponse,
{
    async fn call(&self, cx: Context) -> Response {
        (self)(cx).await.into_response()
    }
}

/// A handler backed by a synchronous function.
///
/// Created by [`sync`].
#[derive(Clone, Copy, Debug)]
pub struct SyncHandler<F> {
    func: F,
}

/// Wraps a synchronous function as a [`Handler`].
pub fn sync<F, R>(func: F) -> SyncHandler<F>
where
    F: Fn(Context) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
    SyncHandler { func }
}

impl<F, R> Handler for SyncHandler<F>
where
    F: Fn(Context) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
    async fn call(&self, cx: Context) -> Response {
        (self.func)(cx).into_response()
    }
}
