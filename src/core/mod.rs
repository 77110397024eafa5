//! Core utilities shared by every loader
//!
//! - `config`: upstream locations, timeout and user agent
//! - `http`: the fetch client for remote and local sources

pub mod config;
pub mod http;

pub use config::SourceConfig;
pub use http::SourceClient;
