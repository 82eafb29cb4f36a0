//! HandleReplyHandler - the conversation controller.
//!
//! Loads the session for a chat, applies one reply, and on the last
//! answer runs the generation pipeline before the turn ends.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::foundation::{SessionId, ValidationError};
use crate::domain::intake::{InputError, Session, SessionError, StepAdvance, StepPrompt};
use crate::ports::{ArchiveRecord, ArchiveSink, SessionStore, SessionStoreError};

use super::generate_script::{GenerateScriptCommand, GenerateScriptHandler, GenerationOutcome};

/// Shown when a reply arrives for no session or a finished one.
pub const INACTIVE_NOTICE: &str = "Чтобы начать, отправьте /start.";

/// Shown when generation ran out of attempts.
pub const EXHAUSTED_NOTICE: &str =
    "Не удалось собрать текст, который проходит все проверки. Отправьте /start и попробуйте ещё раз.";

/// What the transport should show after a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyOutcome {
    /// Ask the question of the (new) current step.
    Prompt(StepPrompt),
    /// The reply did not fit; ask the same question again.
    Reprompt { prompt: StepPrompt, error: InputError },
    /// The accepted script, verbatim.
    ScriptReady { script: String, attempts: u32 },
    GenerationFailed { notice: &'static str },
    /// Nothing to continue; the user has to send /start.
    Inactive { notice: &'static str },
}

#[derive(Debug, Error)]
pub enum HandleReplyError {
    #[error("session store failed: {0}")]
    Store(#[from] SessionStoreError),

    #[error("session state is inconsistent: {0}")]
    Session(#[from] ValidationError),
}

pub struct HandleReplyHandler {
    sessions: Arc<dyn SessionStore>,
    archive: Arc<dyn ArchiveSink>,
    generator: Arc<GenerateScriptHandler>,
}

impl HandleReplyHandler {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        archive: Arc<dyn ArchiveSink>,
        generator: Arc<GenerateScriptHandler>,
    ) -> Self {
        Self {
            sessions,
            archive,
            generator,
        }
    }

    /// Opens the session at the welcome step, resetting any earlier one.
    pub async fn start(&self, session_id: &SessionId) -> Result<ReplyOutcome, HandleReplyError> {
        let session = match self.sessions.load(session_id).await? {
            Some(mut session) => {
                session.restart();
                session
            }
            None => Session::new(session_id.clone()),
        };
        self.sessions.save(&session).await?;

        info!(session_id = %session_id, "session started");
        Ok(ReplyOutcome::Prompt(session.prompt()))
    }

    /// Resets an existing session. Unknown sessions get the start notice.
    pub async fn restart(&self, session_id: &SessionId) -> Result<ReplyOutcome, HandleReplyError> {
        let Some(mut session) = self.sessions.load(session_id).await? else {
            return Ok(Self::inactive());
        };
        session.restart();
        self.sessions.save(&session).await?;

        info!(session_id = %session_id, archived = session.archive().len(), "session restarted");
        Ok(ReplyOutcome::Prompt(session.prompt()))
    }

    /// Applies one user reply to the session.
    pub async fn handle_reply(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<ReplyOutcome, HandleReplyError> {
        let Some(mut session) = self.sessions.load(session_id).await? else {
            debug!(session_id = %session_id, "reply without session");
            return Ok(Self::inactive());
        };

        let advance = match session.apply_reply(text) {
            Ok(advance) => advance,
            Err(SessionError::Input(error)) => {
                debug!(session_id = %session_id, step = ?error.step(), error = %error, "reply rejected");
                return Ok(ReplyOutcome::Reprompt {
                    prompt: session.prompt(),
                    error,
                });
            }
            Err(SessionError::NotAccepting { step }) => {
                debug!(session_id = %session_id, step = ?step, "reply to inactive session");
                return Ok(Self::inactive());
            }
            Err(SessionError::Invalid(error)) => return Err(error.into()),
        };
        self.sessions.save(&session).await?;

        match advance {
            StepAdvance::Next(step) => {
                debug!(session_id = %session_id, step = ?step, "advanced");
                Ok(ReplyOutcome::Prompt(session.prompt()))
            }
            StepAdvance::ReadyToGenerate(answers) => {
                let outcome = self
                    .generator
                    .handle(GenerateScriptCommand {
                        session_id: session_id.clone(),
                        answers: answers.clone(),
                    })
                    .await;

                match outcome {
                    GenerationOutcome::Passed(draft) => {
                        let record =
                            ArchiveRecord::from_delivery(session_id.clone(), &answers, &draft);
                        let script = draft.text.clone();
                        let attempts = draft.attempt;

                        session.deliver(draft)?;
                        self.sessions.save(&session).await?;

                        if let Err(error) = self.archive.append(record).await {
                            warn!(session_id = %session_id, error = %error, "archive append failed");
                        }
                        Ok(ReplyOutcome::ScriptReady { script, attempts })
                    }
                    GenerationOutcome::Exhausted { attempts, .. } => {
                        session.exhaust()?;
                        self.sessions.save(&session).await?;

                        info!(session_id = %session_id, attempts, "generation exhausted");
                        Ok(ReplyOutcome::GenerationFailed {
                            notice: EXHAUSTED_NOTICE,
                        })
                    }
                }
            }
        }
    }

    fn inactive() -> ReplyOutcome {
        ReplyOutcome::Inactive {
            notice: INACTIVE_NOTICE,
        }
    }
}
