//! Deployment options model
//!
//! Each concern lives in its own module and is re-exported here.

mod cluster;
mod network;
mod service;
mod tags;

// Re-exports
pub use cluster::*;
pub use network::*;
pub use service::*;
pub use tags::*;
