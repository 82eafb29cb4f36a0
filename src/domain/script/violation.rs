//! Violations reported by the script validator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of deviation from the script contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    EmptyText,
    ForbiddenPhrase,
    Greeting,
    Identity,
    GenderAgreement,
    Closing,
    BareNameLine,
    LineCount,
    CoreLength,
    WordCount,
    TelegraphicRhythm,
}

impl ViolationKind {
    /// Stable identifier used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyText => "empty_text",
            Self::ForbiddenPhrase => "forbidden_phrase",
            Self::Greeting => "greeting",
            Self::Identity => "identity",
            Self::GenderAgreement => "gender_agreement",
            Self::Closing => "closing",
            Self::BareNameLine => "bare_name_line",
            Self::LineCount => "line_count",
            Self::CoreLength => "core_length",
            Self::WordCount => "word_count",
            Self::TelegraphicRhythm => "telegraphic_rhythm",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected deviation. Diagnostic only; never shown to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub detail: String,
    /// 1-based index among the non-empty lines, when the deviation is line-bound.
    pub line: Option<usize>,
}

impl Violation {
    /// Creates a violation that is not tied to one line.
    pub fn new(kind: ViolationKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            line: None,
        }
    }

    /// Creates a violation for a line given by its 0-based index.
    pub fn at_line(kind: ViolationKind, index: usize, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            line: Some(index + 1),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "[{}] line {}: {}", self.kind, line, self.detail),
            None => write!(f, "[{}] {}", self.kind, self.detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_line() {
        let violation = Violation::at_line(ViolationKind::WordCount, 3, "5 words");
        assert_eq!(violation.to_string(), "[word_count] line 4: 5 words");
    }

    #[test]
    fn kind_serializes_to_snake_case() {
        let json = serde_json::to_string(&ViolationKind::TelegraphicRhythm).unwrap();
        assert_eq!(json, "\"telegraphic_rhythm\"");
    }
}
