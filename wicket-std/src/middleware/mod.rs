//! # Stock Middleware
//!
//! - **Constant contributions**: [`set_prop`], [`set_header`], [`inject_header`], ...
//! - **Validation**: [`inject`], [`validate`], [`validate_body`]
//! - **Observation**: [`log_requests`]

mod logging;
mod props;
mod validate;

pub use logging::{RequestLogging, log_requests};
pub use props::{
    inject_header, inject_headers, inject_props, set_header, set_headers, set_prop, set_props,
};
pub use validate::{decode_body, inject, validate, validate_body};
