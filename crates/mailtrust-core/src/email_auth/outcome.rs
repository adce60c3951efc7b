//! Per-mechanism outcome shared by SPF, DKIM and DMARC

use mailtrust_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Outcome of a single authentication mechanism.
///
/// A mechanism that does not appear in the header at all has no outcome;
/// that is modelled as `Option::None` by the holder, never as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MechanismOutcome {
    /// The mechanism verified the message
    Pass,
    /// The mechanism rejected the message
    Fail,
    /// The mechanism ran but reached no verdict
    Neutral,
}

impl MechanismOutcome {
    /// Header token for Authentication-Results
    pub fn as_header_value(&self) -> &'static str {
        match self {
            MechanismOutcome::Pass => "pass",
            MechanismOutcome::Fail => "fail",
            MechanismOutcome::Neutral => "neutral",
        }
    }

    /// Whether the outcome is PASS or FAIL
    pub fn is_determinate(&self) -> bool {
        !matches!(self, MechanismOutcome::Neutral)
    }

    /// Narrow a full RFC 8601 result token into the three-valued model.
    ///
    /// `softfail` counts as a failure. `temperror`, `permerror` and `policy`
    /// are kept as present but undecided. `none` means nothing was evaluated,
    /// so the mechanism is reported as absent.
    pub fn from_protocol_token(token: &str) -> Result<Option<Self>> {
        match token.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(Some(MechanismOutcome::Pass)),
            "fail" | "softfail" => Ok(Some(MechanismOutcome::Fail)),
            "neutral" | "temperror" | "permerror" | "policy" => {
                Ok(Some(MechanismOutcome::Neutral))
            }
            "none" => Ok(None),
            other => Err(Error::malformed(
                "mechanism",
                format!("unknown result token {:?}", other),
            )),
        }
    }
}

impl std::fmt::Display for MechanismOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_header_value())
    }
}

impl FromStr for MechanismOutcome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(MechanismOutcome::Pass),
            "fail" => Ok(MechanismOutcome::Fail),
            "neutral" => Ok(MechanismOutcome::Neutral),
            other => Err(Error::malformed(
                "mechanism",
                format!("invalid outcome {:?}", other),
            )),
        }
    }
}
