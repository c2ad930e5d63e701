//! Client Module
//!
//! Backend seam and the HTTP transport to the generative service.

pub mod backend;
pub mod http;

pub use backend::{GenerativeBackend, ServiceFailure};
pub use http::HttpBackend;
