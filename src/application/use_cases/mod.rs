mod audit_params;
mod chat_assist;
mod recommend_params;

pub use audit_params::*;
pub use chat_assist::*;
pub use recommend_params::*;
