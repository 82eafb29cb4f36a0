//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, gender, errors)
//! - `intake` - Question sequence, option sets and the session aggregate
//! - `script` - Card text contract, validator, prompt assembly and retry state

pub mod foundation;
pub mod intake;
pub mod script;
