//! Constant contributions: properties and headers.
//!
//! The `set_*` functions build a successful [`MiddlewareResult`] for use
//! inside a middleware body. The `inject_*` functions build a middleware that
//! always contributes the same values.

use wicket_core::{
    Context, Extension, HeaderValue, Headers, Middleware, MiddlewareResult, Outcome, PropKey,
    Props, middleware,
};

/// Succeeds, contributing `props`.
pub fn set_props(props: Props) -> MiddlewareResult {
    Outcome::Success(Extension::props(props))
}

/// Succeeds, contributing a single property.
pub fn set_prop<T: Send + Sync + 'static>(key: &PropKey<T>, value: T) -> MiddlewareResult {
    set_props(Props::new().with(key, value))
}

/// Succeeds, contributing `headers` and no properties.
pub fn set_headers(headers: Headers) -> MiddlewareResult {
    Outcome::Success(Extension::headers(headers))
}

/// Succeeds, contributing a single header.
pub fn set_header(name: impl Into<String>, value: impl Into<HeaderValue>) -> MiddlewareResult {
    set_headers(Headers::from_iter([(name.into(), value.into())]))
}

/// A middleware that always contributes `props`.
pub fn inject_props(props: Props) -> impl Middleware {
    middleware::sync(move |_: Context| set_props(props.clone()))
}

/// A middleware that always contributes one header.
pub fn inject_header(name: impl Into<String>, value: impl Into<HeaderValue>) -> impl Middleware {
    let (name, value) = (name.into(), value.into());
    middleware::sync(move |_: Context| set_header(name.clone(), value.clone()))
}

/// A middleware that always contributes `headers`.
pub fn inject_headers(headers: Headers) -> impl Middleware {
    middleware::sync(move |_: Context| set_headers(headers.clone()))
}
