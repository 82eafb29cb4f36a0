//! Grammatical gender of the person the script speaks for.

use serde::{Deserialize, Serialize};

/// Grammatical gender used for verb and adjective agreement in the script.
///
/// Closed two-value set: every gender-dependent phrase in the script
/// contract has exactly one form per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Returns the other gender.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}
