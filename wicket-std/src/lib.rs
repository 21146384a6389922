//! # wicket-std
//!
//! Standard implementations for the Wicket request pipeline.
//!
//! This crate provides:
//! - **Routing**: [`Router`](routing::Router), [`Resource`](routing::Resource), path patterns
//! - **Stock middleware**: property/header injection, body validation, request logging
//! - **Application boundary**: [`App`], [`ResponseSink`], [`send_response`]
//! - **Testing utilities**: recording sink, request constructors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core
pub use wicket_core;

// Modules
mod app;
pub mod middleware;
pub mod routing;
pub mod testing;

pub use app::{App, AppOptions, ResponseSink, send_response};
