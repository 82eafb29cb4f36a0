//! Fixed option sets offered by the gated intake steps.
//!
//! Each set is a closed enum; the label is exactly what the keyboard
//! button sends. [`Choice::from_label`] is the option→value mapping.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Gender;

/// A closed option set whose variants are offered as buttons.
pub trait Choice: Sized + Copy + 'static {
    /// All variants in display order.
    const ALL: &'static [Self];

    /// Button label for the variant.
    fn label(&self) -> &'static str;

    /// Maps a reply to a variant. Matching ignores surrounding whitespace and case.
    fn from_label(input: &str) -> Option<Self> {
        let wanted = input.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.label().to_lowercase() == wanted)
    }

    /// Labels of all variants in display order.
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|choice| choice.label()).collect()
    }
}

/// Label of the single button on the welcome step.
pub const START_LABEL: &str = "Начать";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    ModernDrama,
    Comedy,
    Commercial,
    TeenSeries,
    Historical,
    ThrillerMystery,
}

impl Choice for ProjectType {
    const ALL: &'static [Self] = &[
        Self::ModernDrama,
        Self::Comedy,
        Self::Commercial,
        Self::TeenSeries,
        Self::Historical,
        Self::ThrillerMystery,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::ModernDrama => "Современная драма",
            Self::Comedy => "Комедия",
            Self::Commercial => "Реклама",
            Self::TeenSeries => "Подростковый проект",
            Self::Historical => "Исторический",
            Self::ThrillerMystery => "Триллер / мистика",
        }
    }
}

/// What the card should achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    IntroduceMe,
    FixTypecast,
    RefreshMaterials,
    SelfTape,
}

impl Choice for Purpose {
    const ALL: &'static [Self] = &[
        Self::IntroduceMe,
        Self::FixTypecast,
        Self::RefreshMaterials,
        Self::SelfTape,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::IntroduceMe => "Познакомить кастинг со мной",
            Self::FixTypecast => "Закрепить конкретный типаж",
            Self::RefreshMaterials => "Обновить материалы под кастинги",
            Self::SelfTape => "Подготовить визитку под самопробы",
        }
    }
}

impl Choice for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female];

    fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Мужской",
            Gender::Female => "Женский",
        }
    }
}

/// What the actor primarily does on camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameAction {
    Charm,
    HoldAttention,
    DrawIntoDialogue,
}

impl Choice for FrameAction {
    const ALL: &'static [Self] = &[Self::Charm, Self::HoldAttention, Self::DrawIntoDialogue];

    fn label(&self) -> &'static str {
        match self {
            Self::Charm => "Очаровываю",
            Self::HoldAttention => "Удерживаю внимание",
            Self::DrawIntoDialogue => "Вовлекаю в диалог",
        }
    }
}

/// How the actor is present in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    CalmCenter,
    LivelyCompanion,
    Enigma,
}

impl Choice for Presence {
    const ALL: &'static [Self] = &[Self::CalmCenter, Self::LivelyCompanion, Self::Enigma];

    fn label(&self) -> &'static str {
        match self {
            Self::CalmCenter => "Спокойный центр",
            Self::LivelyCompanion => "Живой собеседник",
            Self::Enigma => "Загадка",
        }
    }
}

/// How the actor behaves toward the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    Unhurried,
    HoldsContact,
    GentlyDraws,
    LooksStraight,
    Understates,
}

impl Choice for Behavior {
    const ALL: &'static [Self] = &[
        Self::Unhurried,
        Self::HoldsContact,
        Self::GentlyDraws,
        Self::LooksStraight,
        Self::Understates,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Unhurried => "Не торопится и даёт себя рассмотреть",
            Self::HoldsContact => "Спокойно удерживает контакт",
            Self::GentlyDraws => "Мягко притягивает внимание",
            Self::LooksStraight => "Смотрит прямо и не объясняется",
            Self::Understates => "Чуть недоговаривает",
        }
    }
}

/// Requested length of the script body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptLength {
    Short,
    Extended,
}

impl ScriptLength {
    /// Number of core lines the model is asked for.
    pub fn core_lines(&self) -> usize {
        match self {
            Self::Short => 3,
            Self::Extended => 4,
        }
    }
}

impl Choice for ScriptLength {
    const ALL: &'static [Self] = &[Self::Short, Self::Extended];

    fn label(&self) -> &'static str {
        match self {
            Self::Short => "Короткий — три фразы",
            Self::Extended => "Развёрнутый — четыре фразы",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Restrained,
    Warm,
    LightIrony,
}

impl Choice for Tone {
    const ALL: &'static [Self] = &[Self::Restrained, Self::Warm, Self::LightIrony];

    fn label(&self) -> &'static str {
        match self {
            Self::Restrained => "Сдержанный",
            Self::Warm => "Тёплый",
            Self::LightIrony => "С лёгкой иронией",
        }
    }
}

/// Whether the card targets one project or stays universal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatMode {
    ProjectSpecific,
    Universal,
}

impl Choice for FormatMode {
    const ALL: &'static [Self] = &[Self::ProjectSpecific, Self::Universal];

    fn label(&self) -> &'static str {
        match self {
            Self::ProjectSpecific => "Строго под этот проект",
            Self::Universal => "Более универсальную",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_labels_unique<C: Choice>() {
        let labels = C::labels();
        for (i, label) in labels.iter().enumerate() {
            assert!(
                !labels[i + 1..].contains(label),
                "duplicate label {:?}",
                label
            );
        }
    }

    #[test]
    fn labels_are_unique_within_each_set() {
        assert_labels_unique::<ProjectType>();
        assert_labels_unique::<Purpose>();
        assert_labels_unique::<Gender>();
        assert_labels_unique::<FrameAction>();
        assert_labels_unique::<Presence>();
        assert_labels_unique::<Behavior>();
        assert_labels_unique::<ScriptLength>();
        assert_labels_unique::<Tone>();
        assert_labels_unique::<FormatMode>();
    }

    #[test]
    fn every_label_maps_back_to_its_variant() {
        for project in ProjectType::ALL {
            assert_eq!(ProjectType::from_label(project.label()), Some(*project));
        }
        for behavior in Behavior::ALL {
            assert_eq!(Behavior::from_label(behavior.label()), Some(*behavior));
        }
    }

    #[test]
    fn matching_ignores_whitespace_and_case() {
        assert_eq!(Tone::from_label("  тёплый "), Some(Tone::Warm));
        assert_eq!(Gender::from_label("ЖЕНСКИЙ"), Some(Gender::Female));
    }

    #[test]
    fn unknown_reply_maps_to_nothing() {
        assert_eq!(ProjectType::from_label("Мюзикл"), None);
        assert_eq!(FormatMode::from_label(""), None);
    }

    #[test]
    fn script_length_sets_core_line_count() {
        assert_eq!(ScriptLength::Short.core_lines(), 3);
        assert_eq!(ScriptLength::Extended.core_lines(), 4);
    }
}
