//! Application handlers.
//!
//! - `generate_script` - bounded generate→validate loop
//! - `handle_reply` - conversation controller driving the intake session

pub mod generate_script;
pub mod handle_reply;

pub use generate_script::{
    GenerateScriptCommand, GenerateScriptHandler, GenerationOutcome, GenerationSettings,
    RetryPolicy, DEFAULT_MAX_ATTEMPTS,
};
pub use handle_reply::{
    HandleReplyError, HandleReplyHandler, ReplyOutcome, EXHAUSTED_NOTICE, INACTIVE_NOTICE,
};
