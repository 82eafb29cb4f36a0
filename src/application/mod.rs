//! Application layer - Handlers that orchestrate domain operations over the ports.

pub mod handlers;

pub use handlers::{
    GenerateScriptCommand, GenerateScriptHandler, GenerationOutcome, GenerationSettings,
    HandleReplyError, HandleReplyHandler, ReplyOutcome, RetryPolicy,
};
