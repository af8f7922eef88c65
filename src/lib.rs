//! Static file HTTP server
//!
//! Serves files under a configured root directory over HTTP/1.1 with
//! conditional caching, single byte-range requests, and gzip/deflate
//! transit compression.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
