//! DevHub Redis Data Layer
//!
//! Async Redis persistence for dashboard state blobs.

pub mod client;
pub mod queries;

pub use client::{init_pool, RedisError, RedisPool, RedisResult};
pub use queries::blobs;
