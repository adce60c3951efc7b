//! DMARC (Domain-based Message Authentication, Reporting, and Conformance) result
//!
//! The DMARC verdict already folds in SPF/DKIM alignment against the From
//! domain, so only its outcome and the published disposition are carried.

use super::MechanismOutcome;
use mailtrust_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// DMARC policy action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DmarcPolicy {
    /// No policy (monitor mode)
    #[default]
    None,
    /// Quarantine messages (move to spam)
    Quarantine,
    /// Reject messages
    Reject,
}

impl DmarcPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DmarcPolicy::None => "none",
            DmarcPolicy::Quarantine => "quarantine",
            DmarcPolicy::Reject => "reject",
        }
    }

    /// Extract the `p=` disposition from a DMARC result comment,
    /// e.g. `(p=REJECT sp=NONE dis=NONE)`.
    ///
    /// Returns `None` when there is no `p=` token or its value is unknown.
    pub fn from_comment(comment: &str) -> Option<Self> {
        comment
            .split(|c: char| c.is_whitespace() || c == '(' || c == ')' || c == ';')
            .filter_map(|token| token.split_once('='))
            .find(|(name, _)| name.eq_ignore_ascii_case("p"))
            .and_then(|(_, value)| value.parse().ok())
    }
}

impl std::fmt::Display for DmarcPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DmarcPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(DmarcPolicy::None),
            "quarantine" => Ok(DmarcPolicy::Quarantine),
            "reject" => Ok(DmarcPolicy::Reject),
            other => Err(Error::malformed(
                "dmarc",
                format!("invalid policy {:?}", other),
            )),
        }
    }
}

/// DMARC verification result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DmarcResult {
    /// DMARC check passed
    Pass,
    /// DMARC check failed with the domain's published policy
    Fail(DmarcPolicy),
}

impl DmarcResult {
    /// Build a result from separately parsed outcome and policy.
    ///
    /// A failure must carry its policy, and DMARC has no neutral outcome.
    /// A policy given alongside a pass is ignored.
    pub fn from_parts(outcome: MechanismOutcome, policy: Option<DmarcPolicy>) -> Result<Self> {
        match (outcome, policy) {
            (MechanismOutcome::Pass, _) => Ok(DmarcResult::Pass),
            (MechanismOutcome::Fail, Some(policy)) => Ok(DmarcResult::Fail(policy)),
            (MechanismOutcome::Fail, None) => {
                Err(Error::malformed("dmarc", "failure without p= policy"))
            }
            (MechanismOutcome::Neutral, _) => {
                Err(Error::malformed("dmarc", "neutral is not a DMARC outcome"))
            }
        }
    }

    pub fn outcome(&self) -> MechanismOutcome {
        match self {
            DmarcResult::Pass => MechanismOutcome::Pass,
            DmarcResult::Fail(_) => MechanismOutcome::Fail,
        }
    }

    /// Get the policy for failed DMARC
    pub fn policy(&self) -> Option<DmarcPolicy> {
        match self {
            DmarcResult::Fail(policy) => Some(*policy),
            DmarcResult::Pass => None,
        }
    }

    /// Convert to header value for Authentication-Results
    pub fn as_header_value(&self) -> &'static str {
        self.outcome().as_header_value()
    }
}
