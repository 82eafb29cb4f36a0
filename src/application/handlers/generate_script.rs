//! GenerateScriptHandler - bounded generate→validate loop.
//!
//! One instruction is built per run and sent unchanged on every attempt.
//! Attempts are strictly sequential. A backend failure and a rejected
//! draft both consume one attempt.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::foundation::SessionId;
use crate::domain::intake::CompleteAnswers;
use crate::domain::script::{
    normalize, AttemptOutcome, Draft, PromptBuilder, RetryState, ScriptSubject, ScriptValidator,
    Violation,
};
use crate::ports::{AIError, AIProvider, CompletionRequest, RequestMetadata};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;

/// How many attempts to make and how long each may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Pause between attempts; zero means none.
    pub retry_delay: Duration,
    /// Hard wall-clock limit for one backend call.
    pub call_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::ZERO,
            call_timeout: Duration::from_secs(60),
        }
    }
}

/// Sampling parameters passed to the backend on every attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateScriptCommand {
    pub session_id: SessionId,
    pub answers: CompleteAnswers,
}

/// Final result of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Passed(Draft),
    Exhausted {
        attempts: u32,
        last_violations: Vec<Violation>,
        last_error: Option<AIError>,
    },
}

pub struct GenerateScriptHandler {
    provider: Arc<dyn AIProvider>,
    validator: Arc<ScriptValidator>,
    prompt_builder: PromptBuilder,
    policy: RetryPolicy,
    settings: GenerationSettings,
}

impl GenerateScriptHandler {
    pub fn new(provider: Arc<dyn AIProvider>, validator: Arc<ScriptValidator>) -> Self {
        Self {
            provider,
            validator,
            prompt_builder: PromptBuilder::new(),
            policy: RetryPolicy::default(),
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn handle(&self, cmd: GenerateScriptCommand) -> GenerationOutcome {
        let instruction = self.prompt_builder.build(&cmd.answers, cmd.answers.format);
        let subject = ScriptSubject::new(&cmd.answers.name, cmd.answers.gender);
        let trace_id = Uuid::new_v4().to_string();
        let max_attempts = self.policy.max_attempts.max(1);

        let mut state = RetryState::start();
        let mut last_violations = Vec::new();
        loop {
            let attempt = match state {
                RetryState::Attempting(attempt) => attempt,
                RetryState::Passed(draft) => {
                    info!(
                        session_id = %cmd.session_id,
                        trace_id = %trace_id,
                        attempts = draft.attempt,
                        "script accepted"
                    );
                    return GenerationOutcome::Passed(draft);
                }
                RetryState::Exhausted {
                    attempts,
                    last_violations,
                    last_error,
                } => {
                    warn!(
                        session_id = %cmd.session_id,
                        trace_id = %trace_id,
                        attempts,
                        "retry budget exhausted"
                    );
                    return GenerationOutcome::Exhausted {
                        attempts,
                        last_violations,
                        last_error,
                    };
                }
            };

            if attempt > 1 && !self.policy.retry_delay.is_zero() {
                sleep(self.policy.retry_delay).await;
            }

            let outcome = self
                .attempt(&cmd.session_id, &trace_id, attempt, &instruction, &subject)
                .await;
            state = state.advance(outcome, max_attempts, &mut last_violations);
        }
    }

    /// Runs one backend call and validates its text.
    pub async fn attempt(
        &self,
        session_id: &SessionId,
        trace_id: &str,
        attempt: u32,
        instruction: &str,
        subject: &ScriptSubject,
    ) -> AttemptOutcome<AIError> {
        let mut request = CompletionRequest::new(RequestMetadata::new(
            session_id.clone(),
            trace_id,
            attempt,
        ))
        .with_system_prompt(instruction)
        .with_temperature(self.settings.temperature);
        if let Some(model) = &self.settings.model {
            request = request.with_model(model.clone());
        }
        if let Some(max_tokens) = self.settings.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let response = match timeout(self.policy.call_timeout, self.provider.complete(request)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(error)) => {
                warn!(
                    session_id = %session_id,
                    trace_id = %trace_id,
                    attempt,
                    error_kind = error.kind(),
                    error = %error,
                    "backend call failed"
                );
                return AttemptOutcome::BackendFailed(error);
            }
            Err(_) => {
                let error = AIError::timeout(self.policy.call_timeout.as_secs());
                warn!(
                    session_id = %session_id,
                    trace_id = %trace_id,
                    attempt,
                    timeout_ms = self.policy.call_timeout.as_millis() as u64,
                    "backend call timed out"
                );
                return AttemptOutcome::BackendFailed(error);
            }
        };

        let report = self.validator.validate(&response.content, subject);
        if !report.passed {
            warn!(
                session_id = %session_id,
                trace_id = %trace_id,
                attempt,
                violations = ?report.kinds(),
                "draft rejected"
            );
        }

        AttemptOutcome::from_draft(Draft::new(attempt, normalize(&response.content), report))
    }
}
