//! Script module - the card text contract and its enforcement.
//!
//! - `contract` - fixed phrases: greetings, closings, the forbidden list
//! - `normalize` - whitespace normalization and word counting
//! - `rules` / `validator` - the ordered rule list and its runner
//! - `prompt` - deterministic instruction assembly
//! - `draft` - generated candidates and the retry state machine

mod contract;
mod draft;
mod normalize;
mod prompt;
mod rules;
mod validator;
mod violation;

pub use contract::{
    closings, education_clause, education_clause_words, education_verb, ClosingPhrase,
    ForbiddenKind, ForbiddenPhrase, CORE_LINES, CORE_LINE_WORDS, FORBIDDEN_PHRASES, GREETINGS,
    HEADER_LINES, IDENTITY_PREFIX, MIN_SCRIPT_LINES, TELEGRAPHIC_MAX_WORDS,
};
pub use draft::{AttemptOutcome, Draft, RetryState};
pub use normalize::{normalize, word_count, words, Script};
pub use prompt::PromptBuilder;
pub use rules::{
    default_rules, BareNameLineRule, ClosingRule, CoreRhythmRule, ForbiddenPhraseRule,
    GenderAgreementRule, GreetingRule, IdentityRule, ScriptRule, ScriptSubject,
};
pub use validator::{ScriptValidator, ValidationReport};
pub use violation::{Violation, ViolationKind};
