//! The script contract: closed vocabularies shared by the prompt builder
//! and the validator.
//!
//! Everything the instruction tells the model to do is checked against the
//! same constants here, so the two can never drift apart.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::domain::foundation::Gender;

/// Accepted first lines of a script.
pub const GREETINGS: &[&str] = &[
    "Здравствуйте.",
    "Здравствуйте!",
    "Добрый день.",
    "Добрый день!",
];

/// Self-introduction prefix; the bound name follows it.
pub const IDENTITY_PREFIX: &str = "Меня зовут";

/// Number of fixed lines before the core: greeting, identity, education.
pub const HEADER_LINES: usize = 3;

/// Allowed number of core lines.
pub const CORE_LINES: RangeInclusive<usize> = 3..=4;

/// Allowed word count of a single core line.
pub const CORE_LINE_WORDS: RangeInclusive<usize> = 6..=14;

/// Two adjacent core lines at or below this length read as telegraphic.
pub const TELEGRAPHIC_MAX_WORDS: usize = 7;

/// Smallest script that can hold the header, a minimal core and a closing.
pub const MIN_SCRIPT_LINES: usize = HEADER_LINES + 3 + 1;

/// Subject pronoun that opens the education clause.
const EDUCATION_SUBJECT: &str = "я";

/// Past-tense verb of the education clause, inflected for gender.
pub fn education_verb(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "окончил",
        Gender::Female => "окончила",
    }
}

/// The education clause as it must be written in the script.
pub fn education_clause(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Я окончил",
        Gender::Female => "Я окончила",
    }
}

/// Word pair (lowercase) that identifies the education clause for a gender.
pub fn education_clause_words(gender: Gender) -> [&'static str; 2] {
    [EDUCATION_SUBJECT, education_verb(gender)]
}

/// Courtesy closing chosen by the user; rendered per gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosingPhrase {
    GladToWorkTogether,
    ThankYou,
    SeeYouAtAudition,
}

impl ClosingPhrase {
    pub const ALL: &'static [ClosingPhrase] = &[
        ClosingPhrase::GladToWorkTogether,
        ClosingPhrase::ThankYou,
        ClosingPhrase::SeeYouAtAudition,
    ];

    /// The exact closing line for the given gender.
    pub fn text(&self, gender: Gender) -> &'static str {
        match (self, gender) {
            (Self::GladToWorkTogether, Gender::Male) => "Буду рад работать вместе.",
            (Self::GladToWorkTogether, Gender::Female) => "Буду рада работать вместе.",
            (Self::ThankYou, _) => "Спасибо за внимание.",
            (Self::SeeYouAtAudition, Gender::Male) => "Буду рад встрече на пробах.",
            (Self::SeeYouAtAudition, Gender::Female) => "Буду рада встрече на пробах.",
        }
    }

    /// Finds the closing whose text for `gender` equals `line`.
    pub fn from_text(line: &str, gender: Gender) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|closing| closing.text(gender) == line)
    }
}

/// All closing lines permitted for a gender.
pub fn closings(gender: Gender) -> Vec<&'static str> {
    ClosingPhrase::ALL
        .iter()
        .map(|closing| closing.text(gender))
        .collect()
}

/// Why a phrase is on the denylist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForbiddenKind {
    /// The model talking about the text instead of writing it.
    MetaCommentary,
    /// Résumé or portfolio material that does not belong in a card.
    ScopeLeakage,
    /// Pushing the casting director or closing the dialogue.
    Overreach,
}

/// One denylist entry. Phrases are stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForbiddenPhrase {
    pub phrase: &'static str,
    pub kind: ForbiddenKind,
}

const fn forbidden(phrase: &'static str, kind: ForbiddenKind) -> ForbiddenPhrase {
    ForbiddenPhrase { phrase, kind }
}

/// The closed denylist of constructs a script must not contain.
pub const FORBIDDEN_PHRASES: &[ForbiddenPhrase] = &[
    forbidden("вот текст", ForbiddenKind::MetaCommentary),
    forbidden("вот ваш", ForbiddenKind::MetaCommentary),
    forbidden("вариант 1", ForbiddenKind::MetaCommentary),
    forbidden("версия 1", ForbiddenKind::MetaCommentary),
    forbidden("впечатление:", ForbiddenKind::MetaCommentary),
    forbidden("рекомендации", ForbiddenKind::MetaCommentary),
    forbidden("как языковая модель", ForbiddenKind::MetaCommentary),
    forbidden("as an ai", ForbiddenKind::MetaCommentary),
    forbidden("**", ForbiddenKind::MetaCommentary),
    forbidden("резюме", ForbiddenKind::ScopeLeakage),
    forbidden("портфолио", ForbiddenKind::ScopeLeakage),
    forbidden("мой опыт работы", ForbiddenKind::ScopeLeakage),
    forbidden("мои навыки", ForbiddenKind::ScopeLeakage),
    forbidden("мой рост", ForbiddenKind::ScopeLeakage),
    forbidden("звоните", ForbiddenKind::Overreach),
    forbidden("пишите мне", ForbiddenKind::Overreach),
    forbidden("жду вашего", ForbiddenKind::Overreach),
    forbidden("до встречи", ForbiddenKind::Overreach),
    forbidden("возьмите меня", ForbiddenKind::Overreach),
    forbidden("надеюсь", ForbiddenKind::Overreach),
    forbidden("мечтаю", ForbiddenKind::Overreach),
];
