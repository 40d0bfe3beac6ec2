mod chat_message;
mod completion;
mod recommendation;
mod requests;

pub use chat_message::*;
pub use completion::*;
pub use recommendation::*;
pub use requests::*;
