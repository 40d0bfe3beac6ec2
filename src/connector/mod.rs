//! # Connector Layer
//!
//! External integrations:
//! - Upstream chat-completion client (SiliconFlow over HTTPS)
//! - HTTP API served to the front-end (axum)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::{build_router, serve, Container, ContainerConfig};
