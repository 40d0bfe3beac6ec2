pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{AuditParamsUseCase, ChatAssistUseCase, ChatClient, RecommendParamsUseCase};

pub use connector::{
    build_router, serve, Container, ContainerConfig, MockChatClient, SiliconFlowClient,
};

pub use domain::{
    AuditRequest, ChatMessage, ChatRequest, CompletionRequest, DomainError, HistoryEntry,
    Operation, RecommendRequest, Recommendation, Role,
};
