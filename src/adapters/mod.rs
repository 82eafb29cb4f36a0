//! Adapters - Implementations of the ports.
//!
//! - `ai` - OpenAI and mock generation backends
//! - `storage` - session stores
//! - `archive` - archive sinks

pub mod ai;
pub mod archive;
pub mod storage;
