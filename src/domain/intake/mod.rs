//! Intake module - the question sequence that produces a complete answer set.

mod answers;
mod filters;
mod options;
mod session;
mod step;

pub use answers::{AnswerSet, CompleteAnswers};
pub use filters::{screen_education, screen_name, RejectReason};
pub use options::{
    Behavior, Choice, FormatMode, FrameAction, Presence, ProjectType, Purpose, ScriptLength,
    Tone, START_LABEL,
};
pub use session::{
    ArchivedScript, InputError, Session, SessionError, StepAdvance, StepPrompt,
};
pub use step::{IntakeStep, StepInput};

#[cfg(test)]
pub(crate) use answers::fixtures;
