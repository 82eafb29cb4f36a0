//! Script validator - runs every rule over a normalized draft.

use serde::{Deserialize, Serialize};

use super::normalize::Script;
use super::rules::{default_rules, ScriptRule, ScriptSubject};
use super::violation::{Violation, ViolationKind};

/// Outcome of validating one generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            passed: violations.is_empty(),
            violations,
        }
    }

    /// Violations of one kind, in report order.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Stable identifiers of all violations, for structured logs.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.kind.as_str()).collect()
    }
}

/// Checks generated text against the script contract.
///
/// Rules run in a fixed order and never short-circuit each other; the only
/// early exit is an empty text, for which no line-based rule is defined.
pub struct ScriptValidator {
    rules: Vec<Box<dyn ScriptRule>>,
}

impl ScriptValidator {
    /// Creates a validator with the standard rule set.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Creates a validator with a custom rule list.
    pub fn with_rules(rules: Vec<Box<dyn ScriptRule>>) -> Self {
        Self { rules }
    }

    /// Names of the configured rules, in order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Validates raw generated text for the given subject.
    pub fn validate(&self, text: &str, subject: &ScriptSubject) -> ValidationReport {
        let script = Script::parse(text);

        if script.is_empty() {
            return ValidationReport::from_violations(vec![Violation::new(
                ViolationKind::EmptyText,
                "no non-empty lines",
            )]);
        }

        let violations = self
            .rules
            .iter()
            .flat_map(|rule| rule.check(&script, subject))
            .collect();

        ValidationReport::from_violations(violations)
    }
}

impl Default for ScriptValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScriptValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptValidator")
            .field("rules", &self.rule_names())
            .finish()
    }
}
