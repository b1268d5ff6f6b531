//! DevHub Core Library
//!
//! Client-side state for the DevHub dashboard: notifications, widget
//! layout, feed loading and the project boards, plus the REST client for
//! the external backend.

pub mod api;
pub mod auth;
pub mod board;
pub mod config;
pub mod error;
pub mod feed;
pub mod notification;
pub mod widget;

pub use error::{DevhubError, DevhubResult};
