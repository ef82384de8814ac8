//! AI Gateway - control-plane front-end for an LLM inference router.
//!
//! Features:
//! - Health check and model listing over a small REST surface
//! - Verbatim relay of the upstream router's model list
//! - Pluggable authorization stage (allow-all by default)
//! - Embedded browser catalog and a Rust catalog client

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod upstream;
