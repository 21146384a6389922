//! Route patterns and path matching.

use std::collections::HashMap;

/// Path variables captured by a successful match, keyed by variable name.
pub type RouteArgs = HashMap<String, String>;

/// One `/`-separated component of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Literal(String),
    /// Matches any path segment and captures it under this name.
    Var(String),
}

impl Segment {
    fn parse(token: &str) -> Self {
        match token.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
            Some(name) => Segment::Var(name.to_string()),
            None => Segment::Literal(token.to_string()),
        }
    }
}

/// A compiled route pattern such as `/users/{id}/posts`.
///
/// Patterns are compiled once, when the route table is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a pattern. Tokens written as `{name}` become variables; every
    /// other token is a literal.
    pub fn parse(source: &str) -> Self {
        Self {
            source: source.to_string(),
            segments: source.split('/').map(Segment::parse).collect(),
        }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match `path` against this pattern.
    ///
    /// Returns `None` when segment counts differ or a literal differs.
    /// When a variable name repeats, the later capture wins.
    pub fn matches(&self, path: &str) -> Option<RouteArgs> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut args = RouteArgs::new();
        for (part, segment) in parts.into_iter().zip(&self.segments) {
            match segment {
                Segment::Literal(literal) if literal != part => return None,
                Segment::Literal(_) => {}
                Segment::Var(name) => {
                    args.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(args)
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Pattern::parse(source)
    }
}

/// Match `path` against an uncompiled `pattern`.
pub fn match_path(path: &str, pattern: &str) -> Option<RouteArgs> {
    Pattern::parse(pattern).matches(path)
}
