//! Answer accumulation and the complete-answers gate before generation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Gender, ValidationError};
use crate::domain::script::ClosingPhrase;

use super::options::{
    Behavior, FormatMode, FrameAction, Presence, ProjectType, Purpose, ScriptLength, Tone,
};

/// Answers collected so far. Each field is written once, by its own step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub project: Option<ProjectType>,
    pub purpose: Option<Purpose>,
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub education: Option<String>,
    pub action: Option<FrameAction>,
    pub presence: Option<Presence>,
    pub behavior: Option<Behavior>,
    pub length: Option<ScriptLength>,
    pub tone: Option<Tone>,
    pub closing: Option<ClosingPhrase>,
    pub format: Option<FormatMode>,
}

/// Answer set with every field populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteAnswers {
    pub project: ProjectType,
    pub purpose: Purpose,
    pub name: String,
    pub gender: Gender,
    pub education: String,
    pub action: FrameAction,
    pub presence: Presence,
    pub behavior: Behavior,
    pub length: ScriptLength,
    pub tone: Tone,
    pub closing: ClosingPhrase,
    pub format: FormatMode,
}

fn require<T: Clone>(value: &Option<T>, field: &str) -> Result<T, ValidationError> {
    value
        .clone()
        .ok_or_else(|| ValidationError::empty_field(field))
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts into [`CompleteAnswers`], naming the first missing field.
    pub fn complete(&self) -> Result<CompleteAnswers, ValidationError> {
        Ok(CompleteAnswers {
            project: require(&self.project, "project")?,
            purpose: require(&self.purpose, "purpose")?,
            name: require(&self.name, "name")?,
            gender: require(&self.gender, "gender")?,
            education: require(&self.education, "education")?,
            action: require(&self.action, "action")?,
            presence: require(&self.presence, "presence")?,
            behavior: require(&self.behavior, "behavior")?,
            length: require(&self.length, "length")?,
            tone: require(&self.tone, "tone")?,
            closing: require(&self.closing, "closing")?,
            format: require(&self.format, "format")?,
        })
    }
}
