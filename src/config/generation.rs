//! Retry loop configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_ALLOWED_ATTEMPTS: u32 = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause between attempts in milliseconds
    #[serde(default)]
    pub retry_delay_ms: u64,
}

impl GenerationConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 || self.max_attempts > MAX_ALLOWED_ATTEMPTS {
            return Err(ValidationError::InvalidMaxAttempts(MAX_ALLOWED_ATTEMPTS));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: 0,
        }
    }
}

fn default_max_attempts() -> u32 {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_six_attempts_without_delay() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_attempts, 6);
        assert_eq!(config.retry_delay(), Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn attempt_bounds_are_checked() {
        for max_attempts in [0, 21] {
            let config = GenerationConfig {
                max_attempts,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }
}
