//! State machine trait for step enums.
//!
//! The intake flow is a fixed sequence of steps. Each step enum declares
//! its legal successors once and every advance goes through
//! [`StateMachine::transition_to`], so an out-of-order write is an error
//! rather than a silently corrupted session.

use super::ValidationError;

/// Trait for enums that represent a finite state machine.
///
/// ```ignore
/// impl StateMachine for IntakeStep {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Welcome => vec![Project],
///             Format => vec![Generating],
///             Delivered => vec![],
///             // ...
///         }
///     }
/// }
///
/// let next = IntakeStep::Welcome.transition_to(IntakeStep::Project)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if moving from self to target is allowed.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs the transition, returning an error if it is not allowed.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_transition(self, target))
        }
    }

    /// Checks if the current state has no outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
