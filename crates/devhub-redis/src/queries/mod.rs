//! Query modules for DevHub state stored in Redis.

pub mod blobs;
