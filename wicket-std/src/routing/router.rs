//! Ordered route table and method dispatch.

use super::{
    pattern::{Pattern, RouteArgs},
    resource::Resource,
};
use futures::future::{BoxFuture, FutureExt};
use std::{fmt, future::Future};
use wicket_core::{Response, Status};

type RouteFactory<S> = Box<dyn Fn(S, RouteArgs) -> BoxFuture<'static, Option<Resource>> + Send + Sync>;

struct Route<S> {
    pattern: Pattern,
    factory: RouteFactory<S>,
}

/// An ordered table of route patterns.
///
/// Each pattern maps to a factory that receives the caller's state and the
/// captured path variables and yields a [`Resource`], or `None` when nothing
/// exists at that path.
///
/// # Dispatch
///
/// Patterns are tried in the order they were added. The **first** pattern
/// that structurally matches the url decides the outcome, even if its factory
/// yields nothing:
///
/// | Situation | Response |
/// |-----------|----------|
/// | no pattern matches | 404 |
/// | factory yields `None` | 404 |
/// | resource lacks the method | 405 |
/// | otherwise | the handler's response, `Content-Type` defaulted |
///
/// # Example
///
/// ```rust
/// use wicket_std::routing::{Resource, Router};
/// use wicket_core::Status;
///
/// # futures::executor::block_on(async {
/// let router: Router = Router::new().at("/hello/{name}", |_, args| async move {
///     let name = args.get("name").cloned().unwrap_or_default();
///     Some(Resource::new().get(move || async move { Status::Ok.response().text(name) }))
/// });
///
/// assert_eq!(router.route("GET", "/hello/world").await.status(), 200);
/// assert_eq!(router.route("POST", "/hello/world").await.status(), 405);
/// assert_eq!(router.route("GET", "/bye").await.status(), 404);
/// # });
/// ```
pub struct Router<S = ()> {
    routes: Vec<Route<S>>,
}

impl<S> Default for Router<S> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<S: Send + 'static> Router<S> {
    /// Create an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route. The pattern is compiled immediately.
    pub fn at<F, Fut>(mut self, pattern: &str, factory: F) -> Self
    where
        F: Fn(S, RouteArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<Resource>> + Send + 'static,
    {
        self.routes.push(Route {
            pattern: Pattern::parse(pattern),
            factory: Box::new(move |state, args| factory(state, args).boxed()),
        });
        self
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The compiled patterns, in dispatch order.
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.routes.iter().map(|route| &route.pattern)
    }

    /// Dispatches `method` and `url`, handing `state` to the matching factory.
    pub async fn route_with(&self, state: S, method: &str, url: &str) -> Response {
        let matched = self
            .routes
            .iter()
            .find_map(|route| route.pattern.matches(url).map(|args| (route, args)));

        let Some((route, args)) = matched else {
            #[cfg(feature = "tracing")]
            tracing::debug!(method, url, "no route matched");
            return Status::NotFound.response();
        };

        #[cfg(feature = "tracing")]
        let pattern = route.pattern.as_str();
        #[cfg(feature = "tracing")]
        tracing::debug!(method, url, pattern, "route matched");

        let Some(resource) = (route.factory)(state, args).await else {
            #[cfg(feature = "tracing")]
            tracing::debug!(method, url, pattern, "route has no resource");
            return Status::NotFound.response();
        };

        let Some((content_type, handler)) = resource.into_handler(method) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(method, url, pattern, "method not allowed");
            return Status::MethodNotAllowed.response();
        };

        handler()
            .await
            .default_header("Content-Type", String::from(content_type))
    }
}

impl Router<()> {
    /// Dispatches `method` and `url` on a stateless table.
    pub async fn route(&self, method: &str, url: &str) -> Response {
        self.route_with((), method, url).await
    }
}

impl<S> fmt::Debug for Router<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.routes.iter().map(|route| route.pattern.as_str()))
            .finish()
    }
}
