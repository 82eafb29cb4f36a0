//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the grammatical gender enum,
//! the step state-machine trait and the validation error type used by
//! the intake and script modules.

mod errors;
mod gender;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use gender::Gender;
pub use ids::{DraftId, SessionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
