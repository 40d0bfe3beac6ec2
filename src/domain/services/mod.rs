//! Pure prompt assembly and reply shaping.

mod prompt_builder;
mod reply_extractor;

pub use prompt_builder::*;
pub use reply_extractor::*;
