//! Header values and header maps.
//!
//! A [`Headers`] map offers two merge policies that must not be confused:
//!
//! - [`overlay`](Headers::overlay): entries of the other map win on collision.
//! - [`underlay`](Headers::underlay): entries of the other map only fill keys
//!   that are missing here.

use std::collections::{BTreeMap, btree_map};

/// A header value: a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeaderValue {
    /// A single value.
    Single(String),
    /// A repeated header.
    Multi(Vec<String>),
}

impl HeaderValue {
    /// Returns the value if this is a single string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::Single(value) => Some(value),
            HeaderValue::Multi(_) => None,
        }
    }

    /// Iterates over every value, one for `Single`.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            HeaderValue::Single(value) => std::slice::from_ref(value),
            HeaderValue::Multi(values) => values,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Single(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Single(value)
    }
}

impl From<Vec<String>> for HeaderValue {
    fn from(values: Vec<String>) -> Self {
        HeaderValue::Multi(values)
    }
}

impl From<Vec<&str>> for HeaderValue {
    fn from(values: Vec<&str>) -> Self {
        HeaderValue::Multi(values.into_iter().map(str::to_string).collect())
    }
}

impl PartialEq<str> for HeaderValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for HeaderValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// A map from header name to [`HeaderValue`].
///
/// Names are compared exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: BTreeMap<String, HeaderValue>,
}

impl Headers {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a header.
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries.get(name)
    }

    /// Returns true if `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> btree_map::Iter<'_, String, HeaderValue> {
        self.entries.iter()
    }

    /// Sets `name`, replacing any existing value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<HeaderValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Sets `name` only if it is absent.
    pub fn insert_default(&mut self, name: impl Into<String>, value: impl Into<HeaderValue>) {
        self.entries.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Returns these headers with `other` laid on top: `other` wins on collision.
    pub fn overlay(mut self, other: Headers) -> Headers {
        self.entries.extend(other.entries);
        self
    }

    /// Returns these headers with `other` laid underneath: existing keys win,
    /// `other` only fills the gaps.
    pub fn underlay(mut self, other: Headers) -> Headers {
        for (name, value) in other.entries {
            self.entries.entry(name).or_insert(value);
        }
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<HeaderValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        headers.extend(iter);
        headers
    }
}

impl<K, V> Extend<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<HeaderValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Headers
where
    K: Into<String>,
    V: Into<HeaderValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Headers {
    type Item = (String, HeaderValue);
    type IntoIter = btree_map::IntoIter<String, HeaderValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a String, &'a HeaderValue);
    type IntoIter = btree_map::Iter<'a, String, HeaderValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
