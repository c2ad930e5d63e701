//! Configuration Module
//!
//! Handles service endpoint configuration loading and validation.

pub mod loader;
pub mod service;

pub use loader::ConfigLoader;
pub use service::{ServiceConfig, ServiceOverrides};
