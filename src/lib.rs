pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod tvdb;
pub mod viewlog;

pub use error::{Result, WatchLogError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::WatchLogConfig;
    pub use crate::conversation::{ConversationState, TurnOutcome, WatchLogAssistant};
    pub use crate::error::{Result, WatchLogError};
    pub use crate::llm::gateways::OpenAIGateway;
    pub use crate::llm::tools::{LlmTool, ShowInfoTool};
    pub use crate::llm::{CompletionConfig, LlmGateway, LlmMessage, MessageRole};
    pub use crate::tvdb::{ShowInfo, ShowInfoResolver};
    pub use crate::viewlog::{CsvSink, ViewLogEntry};
}
