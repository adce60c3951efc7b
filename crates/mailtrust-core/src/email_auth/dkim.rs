//! DKIM (DomainKeys Identified Mail) result

use super::MechanismOutcome;
use mailtrust_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// DKIM verification result for the signature the parser selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DkimResult {
    /// Evaluated outcome
    pub outcome: MechanismOutcome,
    /// Signing domain (`header.d`)
    pub domain: String,
}

impl DkimResult {
    /// Create a DKIM result, rejecting a blank signing domain
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
            return Err(Error::malformed("dkim", "missing header.d domain"));
        }
        Ok(())
    }

    /// Whether this signature may stand in for the validated domain.
    /// A neutral DKIM result carries no usable domain signal.
    pub fn is_domain_eligible(&self) -> bool {
        self.outcome.is_determinate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let dkim = DkimResult::new(MechanismOutcome::Fail, "example.net").unwrap();
        assert_eq!(dkim.domain, "example.net");
        assert!(dkim.is_domain_eligible());
    }

    #[test]
    fn test_neutral_not_eligible() {
        let dkim = DkimResult::new(MechanismOutcome::Neutral, "example.net").unwrap();
        assert!(!dkim.is_domain_eligible());
    }

    #[test]
    fn test_blank_domain_is_malformed() {
        let err = DkimResult::new(MechanismOutcome::Pass, "").unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("header.d"));
    }
}
