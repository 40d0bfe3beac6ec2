mod mock_chat_client;
mod siliconflow_client;

pub use mock_chat_client::*;
pub use siliconflow_client::*;
