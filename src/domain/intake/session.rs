//! Session aggregate: one conversation with one user.
//!
//! A reply is applied to a copy of the answer set and committed only
//! after the step transition succeeds, so a rejected reply leaves the
//! session exactly as it was.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{
    DraftId, Gender, SessionId, StateMachine, Timestamp, ValidationError,
};
use crate::domain::script::{closings, ClosingPhrase, Draft};

use super::answers::{AnswerSet, CompleteAnswers};
use super::filters::{screen_education, screen_name, RejectReason};
use super::options::{
    Behavior, Choice, FormatMode, FrameAction, Presence, ProjectType, Purpose, ScriptLength,
    Tone, START_LABEL,
};
use super::step::{IntakeStep, StepInput};

/// A reply that does not fit the current step. The step is re-prompted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("reply is not one of the options offered at {step:?}")]
    NotAnOption { step: IntakeStep },

    #[error("reply rejected at {step:?}: {reason:?}")]
    Rejected {
        step: IntakeStep,
        reason: RejectReason,
    },
}

impl InputError {
    pub fn step(&self) -> IntakeStep {
        match self {
            Self::NotAnOption { step } | Self::Rejected { step, .. } => *step,
        }
    }

    /// Short correction shown above the repeated question.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::NotAnOption { .. } => "Выберите один из вариантов на кнопках.",
            Self::Rejected { reason, .. } => reason.hint(),
        }
    }
}

/// Errors from applying a reply to a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("step {step:?} does not accept replies")]
    NotAccepting { step: IntakeStep },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// What a successful reply led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAdvance {
    /// Moved to the next question.
    Next(IntakeStep),
    /// The last question was answered; generation should run now.
    ReadyToGenerate(CompleteAnswers),
}

/// Question text plus the buttons offered with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPrompt {
    pub step: IntakeStep,
    pub text: String,
    pub options: Vec<String>,
}

/// A script delivered earlier in this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedScript {
    pub draft_id: DraftId,
    pub delivered_at: Timestamp,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    step: IntakeStep,
    answers: AnswerSet,
    archive: Vec<ArchivedScript>,
    accepted: Option<Draft>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

fn pick<C: Choice>(step: IntakeStep, reply: &str) -> Result<C, InputError> {
    C::from_label(reply).ok_or(InputError::NotAnOption { step })
}

fn pick_closing(step: IntakeStep, reply: &str, gender: Gender) -> Result<ClosingPhrase, InputError> {
    let wanted = reply.trim().to_lowercase();
    ClosingPhrase::ALL
        .iter()
        .copied()
        .find(|closing| closing.text(gender).to_lowercase() == wanted)
        .ok_or(InputError::NotAnOption { step })
}

fn screened(
    step: IntakeStep,
    result: Result<String, RejectReason>,
) -> Result<String, InputError> {
    result.map_err(|reason| InputError::Rejected { step, reason })
}

fn labels<C: Choice>() -> Vec<String> {
    C::labels().into_iter().map(str::to_string).collect()
}

impl Session {
    /// Creates a session at the welcome step.
    pub fn new(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            step: IntakeStep::Welcome,
            answers: AnswerSet::new(),
            archive: Vec::new(),
            accepted: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn archive(&self) -> &[ArchivedScript] {
        &self.archive
    }

    pub fn accepted(&self) -> Option<&Draft> {
        self.accepted.as_ref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Applies one reply to the current step.
    pub fn apply_reply(&mut self, reply: &str) -> Result<StepAdvance, SessionError> {
        let step = self.step;
        let next = match step.following() {
            Some(next) if step.accepts_input() => next,
            _ => return Err(SessionError::NotAccepting { step }),
        };

        let mut answers = self.answers.clone();
        match step {
            IntakeStep::Welcome => {
                if reply.trim().to_lowercase() != START_LABEL.to_lowercase() {
                    return Err(InputError::NotAnOption { step }.into());
                }
            }
            IntakeStep::Project => answers.project = Some(pick::<ProjectType>(step, reply)?),
            IntakeStep::Purpose => answers.purpose = Some(pick::<Purpose>(step, reply)?),
            IntakeStep::Name => answers.name = Some(screened(step, screen_name(reply))?),
            IntakeStep::Gender => answers.gender = Some(pick::<Gender>(step, reply)?),
            IntakeStep::Education => {
                answers.education = Some(screened(step, screen_education(reply))?)
            }
            IntakeStep::Action => answers.action = Some(pick::<FrameAction>(step, reply)?),
            IntakeStep::Presence => answers.presence = Some(pick::<Presence>(step, reply)?),
            IntakeStep::Behavior => answers.behavior = Some(pick::<Behavior>(step, reply)?),
            IntakeStep::Length => answers.length = Some(pick::<ScriptLength>(step, reply)?),
            IntakeStep::Tone => answers.tone = Some(pick::<Tone>(step, reply)?),
            IntakeStep::Closing => {
                let gender = answers
                    .gender
                    .ok_or_else(|| ValidationError::empty_field("gender"))?;
                answers.closing = Some(pick_closing(step, reply, gender)?);
            }
            IntakeStep::Format => answers.format = Some(pick::<FormatMode>(step, reply)?),
            IntakeStep::Generating | IntakeStep::Delivered | IntakeStep::Exhausted => {
                return Err(SessionError::NotAccepting { step });
            }
        }

        let next = step.transition_to(next)?;
        let advance = if next == IntakeStep::Generating {
            StepAdvance::ReadyToGenerate(answers.complete()?)
        } else {
            StepAdvance::Next(next)
        };

        self.answers = answers;
        self.step = next;
        self.updated_at = Timestamp::now();
        Ok(advance)
    }

    /// Prompt for the current step.
    pub fn prompt(&self) -> StepPrompt {
        let options = match self.step {
            IntakeStep::Welcome => vec![START_LABEL.to_string()],
            IntakeStep::Project => labels::<ProjectType>(),
            IntakeStep::Purpose => labels::<Purpose>(),
            IntakeStep::Gender => labels::<Gender>(),
            IntakeStep::Action => labels::<FrameAction>(),
            IntakeStep::Presence => labels::<Presence>(),
            IntakeStep::Behavior => labels::<Behavior>(),
            IntakeStep::Length => labels::<ScriptLength>(),
            IntakeStep::Tone => labels::<Tone>(),
            IntakeStep::Closing => self
                .answers
                .gender
                .map(|gender| closings(gender).into_iter().map(str::to_string).collect())
                .unwrap_or_default(),
            IntakeStep::Format => labels::<FormatMode>(),
            _ => Vec::new(),
        };
        debug_assert!(options.is_empty() || self.step.input() == StepInput::Options);

        StepPrompt {
            step: self.step,
            text: self.step.question().to_string(),
            options,
        }
    }

    /// Resets step and answers. Earlier delivered scripts stay in the archive.
    pub fn restart(&mut self) {
        self.step = IntakeStep::Welcome;
        self.answers = AnswerSet::new();
        self.accepted = None;
        self.updated_at = Timestamp::now();
    }

    /// Records the accepted draft and closes the session.
    pub fn deliver(&mut self, draft: Draft) -> Result<(), ValidationError> {
        self.step = self.step.transition_to(IntakeStep::Delivered)?;
        let now = Timestamp::now();
        self.archive.push(ArchivedScript {
            draft_id: draft.id,
            delivered_at: now,
            text: draft.text.clone(),
        });
        self.accepted = Some(draft);
        self.updated_at = now;
        Ok(())
    }

    /// Closes the session after the retry budget ran out.
    pub fn exhaust(&mut self) -> Result<(), ValidationError> {
        self.step = self.step.transition_to(IntakeStep::Exhausted)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::script::ValidationReport;

    const MALE_REPLIES: [&str; 13] = [
        "Начать",
        "Современная драма",
        "Познакомить кастинг со мной",
        "Иван Петров",
        "Мужской",
        "Щукинское училище, курс Владимира Иванова",
        "Удерживаю внимание",
        "Спокойный центр",
        "Спокойно удерживает контакт",
        "Короткий — три фразы",
        "Сдержанный",
        "Спасибо за внимание.",
        "Строго под этот проект",
    ];

    fn session() -> Session {
        Session::new(SessionId::new("chat-1").unwrap())
    }

    fn answered(replies: &[&str]) -> Session {
        let mut session = session();
        for reply in replies {
            session.apply_reply(reply).unwrap();
        }
        session
    }

    fn passing_draft() -> Draft {
        Draft::new(
            1,
            "text",
            ValidationReport {
                passed: true,
                violations: vec![],
            },
        )
    }

    #[test]
    fn new_session_waits_for_start() {
        let session = session();
        assert_eq!(session.step(), IntakeStep::Welcome);
        assert_eq!(session.prompt().options, vec!["Начать".to_string()]);
    }

    #[test]
    fn invalid_option_leaves_session_untouched() {
        let mut session = answered(&MALE_REPLIES[..2]);
        let before = session.clone();

        let err = session.apply_reply("Мюзикл").unwrap_err();

        assert_eq!(
            err,
            SessionError::Input(InputError::NotAnOption {
                step: IntakeStep::Purpose
            })
        );
        assert_eq!(session, before);
        assert_eq!(session.prompt(), before.prompt());
    }

    #[test]
    fn rejected_name_reprompts_with_reason() {
        let mut session = answered(&MALE_REPLIES[..3]);
        let err = session.apply_reply("Иван 2").unwrap_err();
        assert_eq!(
            err,
            SessionError::Input(InputError::Rejected {
                step: IntakeStep::Name,
                reason: RejectReason::NotAName,
            })
        );
        assert_eq!(session.step(), IntakeStep::Name);
        assert_eq!(session.answers().name, None);
    }

    #[test]
    fn option_reply_writes_canonical_value() {
        let session = answered(&["начать", "  комедия "]);
        assert_eq!(session.answers().project, Some(ProjectType::Comedy));
        assert_eq!(session.step(), IntakeStep::Purpose);
    }

    #[test]
    fn closing_options_follow_gender() {
        let mut replies = MALE_REPLIES[..11].to_vec();
        replies[4] = "Женский";
        let session = answered(&replies);
        assert_eq!(session.step(), IntakeStep::Closing);
        assert!(session
            .prompt()
            .options
            .contains(&"Буду рада работать вместе.".to_string()));
    }

    #[test]
    fn male_closing_is_not_offered_to_female_session() {
        let mut replies = MALE_REPLIES[..11].to_vec();
        replies[4] = "Женский";
        let mut session = answered(&replies);
        assert!(session.apply_reply("Буду рад работать вместе.").is_err());
    }

    #[test]
    fn final_answer_yields_complete_answers() {
        let mut session = answered(&MALE_REPLIES[..12]);
        let advance = session.apply_reply(MALE_REPLIES[12]).unwrap();

        match advance {
            StepAdvance::ReadyToGenerate(answers) => {
                assert_eq!(answers.name, "Иван Петров");
                assert_eq!(answers.format, FormatMode::ProjectSpecific);
            }
            other => panic!("expected generation, got {:?}", other),
        }
        assert_eq!(session.step(), IntakeStep::Generating);
    }

    #[test]
    fn generating_session_rejects_replies() {
        let mut session = answered(&MALE_REPLIES);
        assert_eq!(
            session.apply_reply("ещё").unwrap_err(),
            SessionError::NotAccepting {
                step: IntakeStep::Generating
            }
        );
    }

    #[test]
    fn delivery_archives_and_closes() {
        let mut session = answered(&MALE_REPLIES);
        session.deliver(passing_draft()).unwrap();

        assert_eq!(session.step(), IntakeStep::Delivered);
        assert_eq!(session.archive().len(), 1);
        assert!(session.accepted().is_some());
        assert!(session.apply_reply("Начать").is_err());
    }

    #[test]
    fn delivery_requires_generating_step() {
        let mut session = session();
        assert!(session.deliver(passing_draft()).is_err());
        assert!(session.archive().is_empty());
    }

    #[test]
    fn restart_resets_answers_but_keeps_archive() {
        let mut session = answered(&MALE_REPLIES);
        session.deliver(passing_draft()).unwrap();

        session.restart();

        assert_eq!(session.step(), IntakeStep::Welcome);
        assert_eq!(session.answers(), &AnswerSet::new());
        assert!(session.accepted().is_none());
        assert_eq!(session.archive().len(), 1);
    }

    #[test]
    fn exhaustion_closes_session() {
        let mut session = answered(&MALE_REPLIES);
        session.exhaust().unwrap();
        assert_eq!(session.step(), IntakeStep::Exhausted);
        assert!(session.step().is_inert());
    }
}
