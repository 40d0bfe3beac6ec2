pub mod audit_controller;
pub mod chat_controller;
pub mod health_controller;
pub mod recommend_controller;

pub use audit_controller::AuditController;
pub use chat_controller::{ChatController, ChatReply};
pub use health_controller::{HealthController, HealthStatus, BANNER};
pub use recommend_controller::RecommendController;
