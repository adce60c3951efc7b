//! Authenticity Aggregator - Combines mechanism results into one verdict
//!
//! DMARC alone decides the overall status. SPF and DKIM only feed the domain
//! alignment flag and the detail list shown next to the verdict.

use crate::email_auth::{
    domains_match, AuthenticityInput, DkimResult, DmarcPolicy, DmarcResult, MechanismOutcome,
    SpfResult,
};
use mailtrust_common::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Overall trust verdict shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Pass,
    Fail,
    Suspicious,
    Neutral,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Pass => "pass",
            OverallStatus::Fail => "fail",
            OverallStatus::Suspicious => "suspicious",
            OverallStatus::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication mechanism named in the detail list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mechanism {
    Dmarc,
    Dkim,
    Spf,
}

impl Mechanism {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mechanism::Dmarc => "dmarc",
            Mechanism::Dkim => "dkim",
            Mechanism::Spf => "spf",
        }
    }
}

impl std::fmt::Display for Mechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One present mechanism and its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MechanismDetail {
    pub mechanism: Mechanism,
    pub outcome: MechanismOutcome,
}

/// Verdict for a single message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticityVerdict {
    /// Overall status
    pub status: OverallStatus,
    /// `None` when neither SPF nor a determinate DKIM result was present
    pub domain_mismatch: Option<bool>,
    /// Present mechanisms, ordered DMARC, DKIM, SPF
    pub details: Vec<MechanismDetail>,
}

impl AuthenticityVerdict {
    /// Detail entry for a mechanism, if it was present
    pub fn detail(&self, mechanism: Mechanism) -> Option<MechanismOutcome> {
        self.details
            .iter()
            .find(|d| d.mechanism == mechanism)
            .map(|d| d.outcome)
    }
}

/// Evaluate one message's mechanism results.
///
/// Fails only when a present mechanism is missing a required field.
pub fn evaluate(input: &AuthenticityInput) -> Result<AuthenticityVerdict> {
    input.validate()?;

    let status = status_for(input.dmarc.as_ref());

    let domain_mismatch = validated_domain(input.spf.as_ref(), input.dkim.as_ref())
        .map(|domain| !domains_match(domain, &input.from_domain));

    let details = details_for(input);

    debug!(
        "Authenticity verdict for {}: status={}, domain_mismatch={:?}, mechanisms={}",
        input.from_domain,
        status,
        domain_mismatch,
        details.len()
    );

    Ok(AuthenticityVerdict {
        status,
        domain_mismatch,
        details,
    })
}

/// Overall status from the DMARC result alone
pub fn status_for(dmarc: Option<&DmarcResult>) -> OverallStatus {
    match dmarc {
        None => OverallStatus::Neutral,
        Some(DmarcResult::Pass) => OverallStatus::Pass,
        Some(DmarcResult::Fail(DmarcPolicy::Reject)) => OverallStatus::Fail,
        Some(DmarcResult::Fail(DmarcPolicy::Quarantine)) => OverallStatus::Suspicious,
        Some(DmarcResult::Fail(DmarcPolicy::None)) => OverallStatus::Neutral,
    }
}

/// Domain to compare against the From domain, if any mechanism vouches
/// for one.
///
/// A determinate DKIM signature wins over SPF. SPF supplies its
/// `smtp.mailfrom` domain whatever its own outcome.
pub fn validated_domain<'a>(
    spf: Option<&'a SpfResult>,
    dkim: Option<&'a DkimResult>,
) -> Option<&'a str> {
    match (dkim, spf) {
        (Some(dkim), _) if dkim.is_domain_eligible() => Some(dkim.domain.as_str()),
        (_, Some(spf)) => Some(spf.domain.as_str()),
        _ => None,
    }
}

fn details_for(input: &AuthenticityInput) -> Vec<MechanismDetail> {
    let mut details = Vec::with_capacity(input.present_count());

    if let Some(dmarc) = &input.dmarc {
        details.push(MechanismDetail {
            mechanism: Mechanism::Dmarc,
            outcome: dmarc.outcome(),
        });
    }
    if let Some(dkim) = &input.dkim {
        details.push(MechanismDetail {
            mechanism: Mechanism::Dkim,
            outcome: dkim.outcome,
        });
    }
    if let Some(spf) = &input.spf {
        details.push(MechanismDetail {
            mechanism: Mechanism::Spf,
            outcome: spf.outcome,
        });
    }

    details
}
