//! Minimal screening of free-text answers.
//!
//! No language understanding here: length limits, a character check for
//! names and a keyword screen that keeps future plans out of a clause that
//! must state a finished fact.

use serde::{Deserialize, Serialize};

use crate::domain::script::words;

const MAX_NAME_CHARS: usize = 60;
const MAX_NAME_WORDS: usize = 4;
const MAX_EDUCATION_CHARS: usize = 200;

/// Words that turn the education answer into a plan instead of a fact.
const ASPIRATIONAL_WORDS: &[&str] = &[
    "хочу",
    "хотел",
    "хотела",
    "мечтаю",
    "мечтал",
    "мечтала",
    "планирую",
    "собираюсь",
    "поступлю",
    "надеюсь",
    "буду",
];

/// Why a free-text answer was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Empty,
    TooLong,
    NotAName,
    Aspirational,
}

impl RejectReason {
    /// Short correction shown above the repeated question.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Empty => "Ответ пустой. Напишите, пожалуйста, ещё раз.",
            Self::TooLong => "Слишком длинно. Достаточно короткого ответа.",
            Self::NotAName => "Напишите только имя и фамилию, без других слов и знаков.",
            Self::Aspirational => "Нужен уже законченный факт: что вы окончили, а не планы.",
        }
    }
}

fn collapse(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_name_token(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token
            .chars()
            .all(|ch| ch.is_alphabetic() || matches!(ch, '-' | '\'' | '’'))
}

/// Screens the name answer; returns it whitespace-normalized.
pub fn screen_name(input: &str) -> Result<String, RejectReason> {
    let name = collapse(input);
    if name.is_empty() {
        return Err(RejectReason::Empty);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(RejectReason::TooLong);
    }

    let tokens: Vec<&str> = name.split(' ').collect();
    if tokens.len() > MAX_NAME_WORDS || !tokens.iter().all(|token| is_name_token(token)) {
        return Err(RejectReason::NotAName);
    }

    Ok(name)
}

/// Screens the education answer; returns it whitespace-normalized without a trailing period.
pub fn screen_education(input: &str) -> Result<String, RejectReason> {
    let education = collapse(input);
    let education = education.trim_end_matches('.').trim_end().to_string();
    if education.is_empty() {
        return Err(RejectReason::Empty);
    }
    if education.chars().count() > MAX_EDUCATION_CHARS {
        return Err(RejectReason::TooLong);
    }

    let lowered = education.to_lowercase();
    if words(&lowered)
        .iter()
        .any(|word| ASPIRATIONAL_WORDS.contains(word))
    {
        return Err(RejectReason::Aspirational);
    }

    Ok(education)
}
