//! Transport Module
//!
//! Delivers a serialized document to the registration endpoint.
//! The gate only depends on the [`Transport`] trait so tests and callers can
//! plug in their own delivery; [`HttpTransport`] is the reqwest-backed default.

pub mod http;
pub mod traits;

pub use http::HttpTransport;
pub use traits::Transport;
