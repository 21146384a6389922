//! Per-path bundles of method handlers.

use futures::future::{BoxFuture, FutureExt};
use std::{borrow::Cow, collections::HashMap, fmt, future::Future};
use wicket_core::{IntoResponse, Response};

/// The content type applied to responses that do not set one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// A deferred, one-shot method handler.
pub type MethodHandler = Box<dyn FnOnce() -> BoxFuture<'static, Response> + Send>;

/// The handlers available at one path, keyed by lowercase method name, plus
/// the content type given to their responses by default.
///
/// # Example
///
/// ```rust
/// use wicket_std::routing::Resource;
/// use wicket_core::Status;
///
/// let resource = Resource::new()
///     .content_type("text/plain")
///     .get(|| async { Status::Ok })
///     .post(|| async { Status::Created });
///
/// assert!(resource.allows("GET"));
/// assert!(!resource.allows("DELETE"));
/// ```
pub struct Resource {
    content_type: Cow<'static, str>,
    methods: HashMap<String, MethodHandler>,
}

impl Default for Resource {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource {
    /// An empty resource with the default content type.
    pub fn new() -> Self {
        Self {
            content_type: Cow::Borrowed(DEFAULT_CONTENT_TYPE),
            methods: HashMap::new(),
        }
    }

    /// Overrides the default content type.
    pub fn content_type(mut self, content_type: impl Into<Cow<'static, str>>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Registers a handler for `method`. Method names are case-insensitive.
    pub fn method<F, Fut>(mut self, method: &str, handler: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: IntoResponse,
    {
        let handler: MethodHandler =
            Box::new(move || async move { handler().await.into_response() }.boxed());
        self.methods.insert(method.to_ascii_lowercase(), handler);
        self
    }

    /// Registers a `GET` handler.
    pub fn get<F, Fut>(self, handler: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: IntoResponse,
    {
        self.method("get", handler)
    }

    /// Registers a `POST` handler.
    pub fn post<F, Fut>(self, handler: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: IntoResponse,
    {
        self.method("post", handler)
    }

    /// Registers a `PUT` handler.
    pub fn put<F, Fut>(self, handler: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: IntoResponse,
    {
        self.method("put", handler)
    }

    /// Registers a `PATCH` handler.
    pub fn patch<F, Fut>(self, handler: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: IntoResponse,
    {
        self.method("patch", handler)
    }

    /// Registers a `DELETE` handler.
    pub fn delete<F, Fut>(self, handler: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: IntoResponse,
    {
        self.method("delete", handler)
    }

    /// The default content type.
    pub fn default_content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns true if a handler is registered for `method`.
    pub fn allows(&self, method: &str) -> bool {
        self.methods.contains_key(&method.to_ascii_lowercase())
    }

    /// Removes the handler for `method`, together with the content type.
    pub fn into_handler(mut self, method: &str) -> Option<(Cow<'static, str>, MethodHandler)> {
        let handler = self.methods.remove(&method.to_ascii_lowercase())?;
        Some((self.content_type, handler))
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().collect();
        methods.sort_unstable();
        f.debug_struct("Resource")
            .field("content_type", &self.content_type)
            .field("methods", &methods)
            .finish()
    }
}
