//! Independent validation rules over a normalized script.
//!
//! Each rule looks at the whole [`Script`] and reports its own
//! violations; rules never depend on each other's results, so they can be
//! tested one at a time and new rules slot in without touching old ones.

use super::contract::{
    self, closings, education_clause, education_clause_words, FORBIDDEN_PHRASES, GREETINGS,
    IDENTITY_PREFIX,
};
use super::normalize::{continues_word, word_count, words, Script};
use super::violation::{Violation, ViolationKind};
use crate::domain::foundation::Gender;

/// Who the script speaks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSubject {
    name: String,
    gender: Gender,
}

impl ScriptSubject {
    /// Creates a subject; the name is whitespace-normalized to match normalized text.
    pub fn new(name: impl AsRef<str>, gender: Gender) -> Self {
        Self {
            name: name.as_ref().split_whitespace().collect::<Vec<_>>().join(" "),
            gender,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }
}

/// A single check over a normalized, non-empty script.
pub trait ScriptRule: Send + Sync {
    /// Short rule name for logs.
    fn name(&self) -> &'static str;

    /// Returns every violation this rule finds; empty when satisfied.
    fn check(&self, script: &Script, subject: &ScriptSubject) -> Vec<Violation>;
}

/// Rules in the order their violations are reported.
pub fn default_rules() -> Vec<Box<dyn ScriptRule>> {
    vec![
        Box::new(ForbiddenPhraseRule),
        Box::new(GreetingRule),
        Box::new(IdentityRule),
        Box::new(GenderAgreementRule),
        Box::new(ClosingRule),
        Box::new(BareNameLineRule),
        Box::new(CoreRhythmRule),
    ]
}

/// Case-insensitive scan against the denylist; one violation per entry found.
pub struct ForbiddenPhraseRule;

impl ScriptRule for ForbiddenPhraseRule {
    fn name(&self) -> &'static str {
        "forbidden_phrase"
    }

    fn check(&self, script: &Script, _subject: &ScriptSubject) -> Vec<Violation> {
        let lowered = script.text().to_lowercase();
        FORBIDDEN_PHRASES
            .iter()
            .filter(|entry| lowered.contains(entry.phrase))
            .map(|entry| {
                Violation::new(
                    ViolationKind::ForbiddenPhrase,
                    format!("contains {:?} ({:?})", entry.phrase, entry.kind),
                )
            })
            .collect()
    }
}

/// First non-empty line must be one of the fixed greetings.
pub struct GreetingRule;

impl ScriptRule for GreetingRule {
    fn name(&self) -> &'static str {
        "greeting"
    }

    fn check(&self, script: &Script, _subject: &ScriptSubject) -> Vec<Violation> {
        match script.first_line() {
            Some(line) if GREETINGS.contains(&line) => Vec::new(),
            line => vec![Violation::at_line(
                ViolationKind::Greeting,
                0,
                format!("opening line {:?} is not a greeting", line.unwrap_or("")),
            )],
        }
    }
}

/// Some line must introduce the subject by name.
pub struct IdentityRule;

impl IdentityRule {
    fn introduces(line: &str, name: &str) -> bool {
        let Some(rest) = line.strip_prefix(IDENTITY_PREFIX) else {
            return false;
        };
        let Some(after_name) = rest.strip_prefix(' ').and_then(|r| r.strip_prefix(name)) else {
            return false;
        };
        !continues_word(after_name)
    }
}

impl ScriptRule for IdentityRule {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn check(&self, script: &Script, subject: &ScriptSubject) -> Vec<Violation> {
        let found = script
            .lines()
            .iter()
            .any(|line| Self::introduces(line, subject.name()));
        if found {
            Vec::new()
        } else {
            vec![Violation::new(
                ViolationKind::Identity,
                format!("no line starts with \"{} {}\"", IDENTITY_PREFIX, subject.name()),
            )]
        }
    }
}

/// The education clause must use the verb form of the subject's gender.
pub struct GenderAgreementRule;

impl GenderAgreementRule {
    fn has_clause(script: &Script, gender: Gender) -> bool {
        let [subject, verb] = education_clause_words(gender);
        script.lines().iter().any(|line| {
            let lowered = line.to_lowercase();
            words(&lowered)
                .windows(2)
                .any(|pair| pair[0] == subject && pair[1] == verb)
        })
    }
}

impl ScriptRule for GenderAgreementRule {
    fn name(&self) -> &'static str {
        "gender_agreement"
    }

    fn check(&self, script: &Script, subject: &ScriptSubject) -> Vec<Violation> {
        let gender = subject.gender();
        let expected = Self::has_clause(script, gender);
        let wrong = Self::has_clause(script, gender.opposite());

        if expected && !wrong {
            return Vec::new();
        }

        let detail = if wrong {
            format!(
                "uses {:?} instead of {:?}",
                education_clause(gender.opposite()),
                education_clause(gender)
            )
        } else {
            format!("missing {:?}", education_clause(gender))
        };
        vec![Violation::new(ViolationKind::GenderAgreement, detail)]
    }
}

/// Last non-empty line must be a courtesy closing for the subject's gender.
pub struct ClosingRule;

impl ScriptRule for ClosingRule {
    fn name(&self) -> &'static str {
        "closing"
    }

    fn check(&self, script: &Script, subject: &ScriptSubject) -> Vec<Violation> {
        let allowed = closings(subject.gender());
        match script.last_line() {
            Some(line) if allowed.contains(&line) => Vec::new(),
            line => vec![Violation::at_line(
                ViolationKind::Closing,
                script.lines().len().saturating_sub(1),
                format!("closing line {:?} is not permitted", line.unwrap_or("")),
            )],
        }
    }
}

/// Flags stray "Имя Фамилия." lines outside the identity statement.
pub struct BareNameLineRule;

impl BareNameLineRule {
    fn is_capitalized_token(token: &str) -> bool {
        let mut chars = token.chars();
        match chars.next() {
            Some(first) if first.is_uppercase() => {
                chars.all(|ch| ch.is_alphabetic() || contract_joiner(ch))
            }
            _ => false,
        }
    }

    fn is_bare_name(line: &str) -> bool {
        let Some(body) = line.strip_suffix('.') else {
            return false;
        };
        let tokens: Vec<&str> = body.split(' ').collect();
        tokens.len() == 2 && tokens.iter().all(|token| Self::is_capitalized_token(token))
    }
}

fn contract_joiner(ch: char) -> bool {
    matches!(ch, '-' | '\'' | '’')
}

impl ScriptRule for BareNameLineRule {
    fn name(&self) -> &'static str {
        "bare_name_line"
    }

    fn check(&self, script: &Script, _subject: &ScriptSubject) -> Vec<Violation> {
        script
            .lines()
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.starts_with(IDENTITY_PREFIX))
            .filter(|(_, line)| Self::is_bare_name(line))
            .map(|(index, line)| {
                Violation::at_line(
                    ViolationKind::BareNameLine,
                    index,
                    format!("{:?} looks like a bare name", line),
                )
            })
            .collect()
    }
}

/// Line budget and word rhythm of the core lines.
pub struct CoreRhythmRule;

impl ScriptRule for CoreRhythmRule {
    fn name(&self) -> &'static str {
        "core_rhythm"
    }

    fn check(&self, script: &Script, _subject: &ScriptSubject) -> Vec<Violation> {
        let lines = script.lines();
        if lines.len() < contract::MIN_SCRIPT_LINES {
            return vec![Violation::new(
                ViolationKind::LineCount,
                format!(
                    "{} non-empty lines, at least {} required",
                    lines.len(),
                    contract::MIN_SCRIPT_LINES
                ),
            )];
        }

        let mut violations = Vec::new();
        let core_start = contract::HEADER_LINES;
        let core = &lines[core_start..lines.len() - 1];

        if !contract::CORE_LINES.contains(&core.len()) {
            violations.push(Violation::new(
                ViolationKind::CoreLength,
                format!(
                    "{} core lines, expected {}..={}",
                    core.len(),
                    contract::CORE_LINES.start(),
                    contract::CORE_LINES.end()
                ),
            ));
        }

        let counts: Vec<usize> = core.iter().map(|line| word_count(line)).collect();

        for (offset, &count) in counts.iter().enumerate() {
            if !contract::CORE_LINE_WORDS.contains(&count) {
                violations.push(Violation::at_line(
                    ViolationKind::WordCount,
                    core_start + offset,
                    format!(
                        "{} words, expected {}..={}",
                        count,
                        contract::CORE_LINE_WORDS.start(),
                        contract::CORE_LINE_WORDS.end()
                    ),
                ));
            }
        }

        let telegraphic = counts.windows(2).position(|pair| {
            pair[0] <= contract::TELEGRAPHIC_MAX_WORDS && pair[1] <= contract::TELEGRAPHIC_MAX_WORDS
        });
        if let Some(offset) = telegraphic {
            violations.push(Violation::at_line(
                ViolationKind::TelegraphicRhythm,
                core_start + offset,
                format!(
                    "two adjacent lines of at most {} words",
                    contract::TELEGRAPHIC_MAX_WORDS
                ),
            ));
        }

        violations
    }
}
