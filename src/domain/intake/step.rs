//! The fixed step sequence of the intake conversation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// How a step accepts replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepInput {
    /// Reply must match one of the offered buttons.
    Options,
    /// Reply is free text screened by a filter.
    FreeText,
    /// Step takes no replies.
    None,
}

/// Position of a session in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStep {
    Welcome,
    Project,
    Purpose,
    Name,
    Gender,
    Education,
    Action,
    Presence,
    Behavior,
    Length,
    Tone,
    Closing,
    Format,
    Generating,
    Delivered,
    Exhausted,
}

impl IntakeStep {
    /// Steps that collect a reply, in order.
    pub const QUESTIONS: [IntakeStep; 13] = [
        Self::Welcome,
        Self::Project,
        Self::Purpose,
        Self::Name,
        Self::Gender,
        Self::Education,
        Self::Action,
        Self::Presence,
        Self::Behavior,
        Self::Length,
        Self::Tone,
        Self::Closing,
        Self::Format,
    ];

    pub fn input(&self) -> StepInput {
        match self {
            Self::Name | Self::Education => StepInput::FreeText,
            Self::Generating | Self::Delivered | Self::Exhausted => StepInput::None,
            _ => StepInput::Options,
        }
    }

    pub fn accepts_input(&self) -> bool {
        self.input() != StepInput::None
    }

    /// True once the session has left the question sequence for good.
    pub fn is_inert(&self) -> bool {
        matches!(self, Self::Delivered | Self::Exhausted)
    }

    /// The step that follows a successful reply.
    pub fn following(&self) -> Option<IntakeStep> {
        match self {
            Self::Welcome => Some(Self::Project),
            Self::Project => Some(Self::Purpose),
            Self::Purpose => Some(Self::Name),
            Self::Name => Some(Self::Gender),
            Self::Gender => Some(Self::Education),
            Self::Education => Some(Self::Action),
            Self::Action => Some(Self::Presence),
            Self::Presence => Some(Self::Behavior),
            Self::Behavior => Some(Self::Length),
            Self::Length => Some(Self::Tone),
            Self::Tone => Some(Self::Closing),
            Self::Closing => Some(Self::Format),
            Self::Format => Some(Self::Generating),
            Self::Generating | Self::Delivered | Self::Exhausted => None,
        }
    }

    /// Question text shown for the step.
    pub fn question(&self) -> &'static str {
        match self {
            Self::Welcome => {
                "Здесь собирается текст видеовизитки для кастинга.\n\
                 Не резюме и не рассказ о себе, а короткое впечатление о человеке, \
                 которого хочется смотреть дальше.\n\n\
                 Понадобится несколько минут."
            }
            Self::Project => "Для какого проекта нужна визитка?",
            Self::Purpose => "Какую задачу должна решить визитка?",
            Self::Name => "Как вас зовут? Имя и фамилия, как в титрах.",
            Self::Gender => "Ваш пол? Он нужен для правильных окончаний в тексте.",
            Self::Education => {
                "Что вы окончили? Учебное заведение и мастерская, например: \
                 «ГИТИС, мастерская Олега Кудряшова»."
            }
            Self::Action => "Что вы делаете в кадре?",
            Self::Presence => "Какое у вас присутствие в кадре?",
            Self::Behavior => "Как вы ведёте себя со зрителем?",
            Self::Length => "Какой длины нужен текст?",
            Self::Tone => "Какой тон ближе?",
            Self::Closing => "Какой фразой закончить?",
            Self::Format => "Сделать визитку строго под этот проект или более универсальную?",
            Self::Generating => "Собираю текст.",
            Self::Delivered => "Текст готов. Чтобы начать заново, отправьте /start.",
            Self::Exhausted => "Не получилось собрать текст. Отправьте /start, чтобы начать заново.",
        }
    }
}

impl StateMachine for IntakeStep {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Generating => vec![Self::Delivered, Self::Exhausted],
            Self::Delivered | Self::Exhausted => vec![],
            step => step.following().into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_sequence_is_linear() {
        for pair in IntakeStep::QUESTIONS.windows(2) {
            assert_eq!(pair[0].following(), Some(pair[1]));
            assert!(pair[0].can_transition_to(&pair[1]));
        }
        assert_eq!(IntakeStep::Format.following(), Some(IntakeStep::Generating));
    }

    #[test]
    fn steps_cannot_be_skipped() {
        assert!(IntakeStep::Welcome
            .transition_to(IntakeStep::Name)
            .is_err());
        assert!(!IntakeStep::Format.can_transition_to(&IntakeStep::Delivered));
    }

    #[test]
    fn generating_ends_in_delivered_or_exhausted() {
        assert!(IntakeStep::Generating.can_transition_to(&IntakeStep::Delivered));
        assert!(IntakeStep::Generating.can_transition_to(&IntakeStep::Exhausted));
        assert!(IntakeStep::Delivered.is_terminal());
        assert!(IntakeStep::Exhausted.is_terminal());
    }

    #[test]
    fn free_text_steps_are_name_and_education() {
        let free: Vec<_> = IntakeStep::QUESTIONS
            .iter()
            .filter(|step| step.input() == StepInput::FreeText)
            .collect();
        assert_eq!(free, vec![&IntakeStep::Name, &IntakeStep::Education]);
    }

    #[test]
    fn only_outcome_steps_are_inert() {
        assert!(IntakeStep::Delivered.is_inert());
        assert!(IntakeStep::Exhausted.is_inert());
        assert!(!IntakeStep::Generating.is_inert());
        assert!(!IntakeStep::Generating.accepts_input());
    }
}
