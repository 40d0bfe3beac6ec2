//! # Application Layer
//!
//! Use cases wiring prompt builders, the upstream client and reply extractors
//! together, one per relay operation.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
