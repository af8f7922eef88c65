//! Request handler module
//!
//! Runs the request pipeline: path resolution, metadata inspection,
//! conditional evaluation, range selection, and payload delivery.

pub mod metadata;
pub mod resolve;
pub mod serve;

// Re-export main entry point
pub use serve::handle_request;
