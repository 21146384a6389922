//! # Routing
//!
//! A declarative path router. Patterns are `/`-separated; a segment written
//! as `{name}` captures that path segment, any other segment must match
//! literally.
//!
//! - [`Pattern`] - a compiled route pattern
//! - [`Resource`] - the method handlers available at one path
//! - [`Router`] - an ordered route table with method dispatch

mod pattern;
mod resource;
mod router;

pub use pattern::{Pattern, RouteArgs, Segment, match_path};
pub use resource::{DEFAULT_CONTENT_TYPE, MethodHandler, Resource};
pub use router::Router;
