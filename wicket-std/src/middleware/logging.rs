//! Request logging middleware.

use wicket_core::{Context, Extension, Middleware, MiddlewareResult, Outcome};

/// A middleware that logs each request at `info` level.
///
/// Contributes nothing to the context and never fails. Without the
/// `tracing` feature it is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLogging;

impl Middleware for RequestLogging {
    async fn call(&self, cx: Context) -> MiddlewareResult {
        #[cfg(feature = "tracing")]
        {
            let request = cx.request();
            tracing::info!(
                method = request.method(),
                url = request.url(),
                "Processing request"
            );
        }
        #[cfg(not(feature = "tracing"))]
        let _ = cx;
        Outcome::Success(Extension::default())
    }
}

/// Shorthand for [`RequestLogging`].
pub fn log_requests() -> RequestLogging {
    RequestLogging
}
