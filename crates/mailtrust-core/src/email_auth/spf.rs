//! SPF (Sender Policy Framework) result
//!
//! Carries an already-evaluated RFC 7208 outcome together with the
//! `smtp.mailfrom` domain it was evaluated for.

use super::MechanismOutcome;
use mailtrust_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// SPF verification result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpfResult {
    /// Evaluated outcome
    pub outcome: MechanismOutcome,
    /// Envelope `smtp.mailfrom` domain
    pub domain: String,
}

impl SpfResult {
    /// Create an SPF result, rejecting a blank `smtp.mailfrom` domain
    pub fn new(outcome: MechanismOutcome, domain: impl Into<String>) -> Result<Self> {
        let result = Self {
            outcome,
            domain: domain.into(),
        };
        result.validate()?;
        Ok(result)
    }

    /// Check the domain invariant on a result built field by field
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(Error::malformed("spf", "missing smtp.mailfrom domain"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let spf = SpfResult::new(MechanismOutcome::Pass, "example.net").unwrap();
        assert_eq!(spf.outcome, MechanismOutcome::Pass);
        assert_eq!(spf.domain, "example.net");
    }

    #[test]
    fn test_blank_domain_is_malformed() {
        let err = SpfResult::new(MechanismOutcome::Neutral, "  ").unwrap_err();
        assert_eq!(err.code(), "MALFORMED_MECHANISM_RESULT");
        assert!(err.to_string().contains("spf"));
    }

    #[test]
    fn test_validate_struct_literal() {
        let spf = SpfResult {
            outcome: MechanismOutcome::Fail,
            domain: String::new(),
        };
        assert!(spf.validate().is_err());
    }
}
