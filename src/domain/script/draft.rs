//! Generated candidates and the bounded retry state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DraftId;

use super::{ValidationReport, Violation};

/// One generated candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub id: DraftId,
    /// 1-based attempt index that produced this draft.
    pub attempt: u32,
    /// Normalized text as returned by the backend.
    pub text: String,
    pub violations: Vec<Violation>,
}

impl Draft {
    pub fn new(attempt: u32, text: impl Into<String>, report: ValidationReport) -> Self {
        Self {
            id: DraftId::new(),
            attempt,
            text: text.into(),
            violations: report.violations,
        }
    }

    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Result of one generate→validate attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome<E> {
    Accepted(Draft),
    Rejected(Draft),
    BackendFailed(E),
}

impl<E> AttemptOutcome<E> {
    /// Classifies a validated draft.
    pub fn from_draft(draft: Draft) -> Self {
        if draft.passed() {
            Self::Accepted(draft)
        } else {
            Self::Rejected(draft)
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Position of the retry loop.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryState<E> {
    /// Waiting for the outcome of the given 1-based attempt.
    Attempting(u32),
    Passed(Draft),
    Exhausted {
        attempts: u32,
        /// Violations of the most recent rejected draft, if any was produced.
        last_violations: Vec<Violation>,
        /// Error of the final attempt when the backend failed on it.
        last_error: Option<E>,
    },
}

impl<E> RetryState<E> {
    pub fn start() -> Self {
        Self::Attempting(1)
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Attempting(_))
    }

    /// Folds one attempt outcome into the state.
    ///
    /// `last_violations` carries the violations seen so far so that a
    /// backend failure on the final attempt does not erase them.
    pub fn advance(
        self,
        outcome: AttemptOutcome<E>,
        max_attempts: u32,
        last_violations: &mut Vec<Violation>,
    ) -> Self {
        let attempt = match self {
            Self::Attempting(attempt) => attempt,
            finished => return finished,
        };

        let last_error = match outcome {
            AttemptOutcome::Accepted(draft) => return Self::Passed(draft),
            AttemptOutcome::Rejected(draft) => {
                *last_violations = draft.violations;
                None
            }
            AttemptOutcome::BackendFailed(error) => Some(error),
        };

        if attempt >= max_attempts {
            Self::Exhausted {
                attempts: attempt,
                last_violations: std::mem::take(last_violations),
                last_error,
            }
        } else {
            Self::Attempting(attempt + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::script::ViolationKind;

    fn draft(attempt: u32, violations: Vec<Violation>) -> Draft {
        Draft {
            id: DraftId::new(),
            attempt,
            text: "text".to_string(),
            violations,
        }
    }

    fn greeting_violation() -> Violation {
        Violation::new(ViolationKind::Greeting, "missing greeting")
    }

    #[test]
    fn draft_without_violations_is_accepted() {
        let outcome: AttemptOutcome<String> = AttemptOutcome::from_draft(draft(1, vec![]));
        assert!(outcome.is_accepted());
    }

    #[test]
    fn draft_with_violations_is_rejected() {
        let outcome: AttemptOutcome<String> =
            AttemptOutcome::from_draft(draft(1, vec![greeting_violation()]));
        assert!(matches!(outcome, AttemptOutcome::Rejected(_)));
    }

    #[test]
    fn accepted_attempt_passes_immediately() {
        let mut seen = Vec::new();
        let state = RetryState::<String>::start().advance(
            AttemptOutcome::Accepted(draft(1, vec![])),
            6,
            &mut seen,
        );
        assert!(matches!(state, RetryState::Passed(ref d) if d.attempt == 1));
    }

    #[test]
    fn failures_advance_until_limit_then_exhaust() {
        let mut seen = Vec::new();
        let mut state = RetryState::<String>::start();
        for attempt in 1..=3 {
            assert_eq!(state, RetryState::Attempting(attempt));
            state = state.advance(
                AttemptOutcome::Rejected(draft(attempt, vec![greeting_violation()])),
                3,
                &mut seen,
            );
        }
        match state {
            RetryState::Exhausted {
                attempts,
                last_violations,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_violations, vec![greeting_violation()]);
                assert_eq!(last_error, None);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn backend_failure_consumes_an_attempt_and_keeps_prior_violations() {
        let mut seen = Vec::new();
        let state = RetryState::<String>::start()
            .advance(
                AttemptOutcome::Rejected(draft(1, vec![greeting_violation()])),
                2,
                &mut seen,
            )
            .advance(AttemptOutcome::BackendFailed("timeout".to_string()), 2, &mut seen);

        assert_eq!(
            state,
            RetryState::Exhausted {
                attempts: 2,
                last_violations: vec![greeting_violation()],
                last_error: Some("timeout".to_string()),
            }
        );
    }

    #[test]
    fn finished_state_ignores_further_outcomes() {
        let mut seen = Vec::new();
        let passed = RetryState::<String>::Passed(draft(1, vec![]));
        let next = passed
            .clone()
            .advance(AttemptOutcome::BackendFailed("late".to_string()), 6, &mut seen);
        assert_eq!(next, passed);
        assert!(next.is_finished());
    }
}
