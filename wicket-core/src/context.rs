//! # Request Context
//!
//! A [`Context`] is the per-request state threaded through a middleware
//! pipeline. It holds the immutable inbound [`Request`], the headers
//! accumulated so far, and an open-ended bag of named properties ([`Props`])
//! that grows as middleware runs.
//!
//! Each pipeline step produces a *successor* context; a context is never
//! changed after it has been superseded.
//!
//! # Property Collisions
//!
//! When a step contributes a property whose name is already present, the
//! **already present** value wins. Headers behave the other way around on
//! success: newly contributed headers replace accumulated ones.
//!
//! # Typed Keys
//!
//! Properties are stored by name and read back through a [`PropKey`], which
//! pairs the name with the expected type:
//!
//! ```rust
//! use wicket_core::{PropKey, Props};
//!
//! const USER_ID: PropKey<u64> = PropKey::new("user_id");
//!
//! let props = Props::new().with(&USER_ID, 42);
//! assert_eq!(props.get(&USER_ID), Ok(&42));
//! ```

use crate::{error::PropError, headers::Headers, middleware::Extension, request::Request};
use std::{
    any::{Any, type_name},
    collections::HashMap,
    fmt,
    marker::PhantomData,
    sync::Arc,
};

/// A typed name for a context property.
pub struct PropKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PropKey<T> {
    /// Create a key. Usually declared as a `const`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The property name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for PropKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PropKey<T> {}

impl<T> fmt::Debug for PropKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropKey<{}>({:?})", type_name::<T>(), self.name)
    }
}

/// A bag of named, type-erased properties.
#[derive(Clone, Default)]
pub struct Props {
    entries: HashMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

impl Props {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bag with `value` stored under `key`.
    pub fn with<T: Send + Sync + 'static>(mut self, key: &PropKey<T>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    /// Stores `value` under `key`, replacing any previous value in this bag.
    pub fn insert<T: Send + Sync + 'static>(&mut self, key: &PropKey<T>, value: T) {
        self.entries.insert(key.name, Arc::new(value));
    }

    /// Reads the property stored under `key`.
    pub fn get<T: 'static>(&self, key: &PropKey<T>) -> Result<&T, PropError> {
        let entry = self
            .entries
            .get(key.name)
            .ok_or_else(|| PropError::Missing(key.name.to_string()))?;
        let value: &(dyn Any + Send + Sync) = entry.as_ref();
        value.downcast_ref::<T>().ok_or_else(|| PropError::TypeMismatch {
            name: key.name.to_string(),
            expected: type_name::<T>(),
        })
    }

    /// Returns true if a property named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Property names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Lays `newer` under this bag: names already present here are kept.
    pub fn underlay(mut self, newer: Props) -> Props {
        for (name, value) in newer.entries {
            self.entries.entry(name).or_insert(value);
        }
        self
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_set().entries(names).finish()
    }
}

/// The per-request state seen by middleware and handlers.
#[derive(Clone, Debug)]
pub struct Context {
    request: Arc<Request>,
    headers: Headers,
    props: Props,
}

impl Context {
    /// A base context: the request, no accumulated headers, no properties.
    pub fn new(request: Request) -> Self {
        Self {
            request: Arc::new(request),
            headers: Headers::new(),
            props: Props::new(),
        }
    }

    /// Seeds the accumulated header set.
    pub fn with_headers(self, headers: Headers) -> Self {
        Self { headers, ..self }
    }

    /// Seeds the property bag.
    pub fn with_props(self, props: Props) -> Self {
        Self { props, ..self }
    }

    /// The inbound request.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Headers accumulated by the pipeline so far.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// All properties.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Reads one property.
    pub fn get<T: 'static>(&self, key: &PropKey<T>) -> Result<&T, PropError> {
        self.props.get(key)
    }

    /// Builds the successor context after a successful middleware step.
    ///
    /// Existing properties win over contributed ones; contributed headers win
    /// over accumulated ones.
    pub(crate) fn extend(&self, extension: Extension) -> Context {
        let (props, headers) = extension.into_parts();
        Context {
            request: Arc::clone(&self.request),
            headers: self.headers.clone().overlay(headers),
            props: self.props.clone().underlay(props),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: PropKey<String> = PropKey::new("name");
    const COUNT: PropKey<u32> = PropKey::new("count");

    #[test]
    fn test_get_typed_property() {
        let props = Props::new().with(&NAME, "alice".to_string()).with(&COUNT, 3);

        assert_eq!(props.get(&NAME).map(String::as_str), Ok("alice"));
        assert_eq!(props.get(&COUNT), Ok(&3));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_get_missing_and_mismatched() {
        let props = Props::new().with(&COUNT, 3);

        assert_eq!(props.get(&NAME), Err(PropError::Missing("name".to_string())));

        const WRONG: PropKey<String> = PropKey::new("count");
        assert!(matches!(
            props.get(&WRONG),
            Err(PropError::TypeMismatch { name, .. }) if name == "count"
        ));
    }

    #[test]
    fn test_underlay_keeps_existing() {
        let older = Props::new().with(&COUNT, 1);
        let newer = Props::new().with(&COUNT, 2).with(&NAME, "bob".to_string());

        let merged = older.underlay(newer);
        assert_eq!(merged.get(&COUNT), Ok(&1));
        assert_eq!(merged.get(&NAME).map(String::as_str), Ok("bob"));
    }

    #[test]
    fn test_extend_collision_directions() {
        let base = Context::new(Request::new("GET", "/"))
            .with_headers(Headers::from([("x-a", "old"), ("x-b", "old")]))
            .with_props(Props::new().with(&COUNT, 1));

        let next = base.extend(Extension::new(
            Props::new().with(&COUNT, 2).with(&NAME, "carol".to_string()),
            Headers::from([("x-b", "new"), ("x-c", "new")]),
        ));

        assert_eq!(next.get(&COUNT), Ok(&1));
        assert_eq!(next.get(&NAME).map(String::as_str), Ok("carol"));
        assert_eq!(
            next.headers(),
            &Headers::from([("x-a", "old"), ("x-b", "new"), ("x-c", "new")])
        );

        // The superseded context is untouched.
        assert_eq!(base.get(&NAME), Err(PropError::Missing("name".to_string())));
        assert_eq!(base.headers().len(), 2);
    }
}
