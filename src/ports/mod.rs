//! Ports - Interfaces between the application core and the outside world.
//!
//! - `ai_provider` - text generation backend
//! - `session_store` - per-user conversation sessions
//! - `archive_sink` - append-only record of delivered scripts

mod ai_provider;
mod archive_sink;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use archive_sink::{ArchiveError, ArchiveRecord, ArchiveSink};
pub use session_store::{SessionStore, SessionStoreError};
