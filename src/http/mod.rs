//! HTTP layer — validated request construction and transport.
//!
//! [`builder::RequestBuilder`] turns an operation descriptor plus bound
//! parameters into a [`builder::PreparedRequest`]; [`client::Transport`]
//! performs the actual I/O in either the suspending or the blocking style.

pub mod builder;
pub mod client;

pub use builder::{PreparedRequest, RequestBuilder};
pub use client::Transport;
