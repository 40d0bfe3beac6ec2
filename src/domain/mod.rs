//! # Domain Layer
//!
//! Request and payload models, the error taxonomy, and the pure prompt and
//! reply-shaping services. Nothing here touches the network.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
