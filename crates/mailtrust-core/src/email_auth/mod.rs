//! Email Authentication Module
//!
//! Typed carriers for SPF, DKIM and DMARC outcomes that an upstream
//! Authentication-Results parser has already evaluated, plus the visible
//! From domain they are judged against.

pub mod dkim;
pub mod dmarc;
pub mod outcome;
pub mod spf;

pub use dkim::DkimResult;
pub use dmarc::{DmarcPolicy, DmarcResult};
pub use outcome::MechanismOutcome;
pub use spf::SpfResult;

use mailtrust_common::Result;
use serde::{Deserialize, Serialize};

/// Everything the aggregator needs to judge one message.
///
/// A `None` mechanism was not present in the header, which is meaningful
/// input in its own right and distinct from a neutral outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticityInput {
    pub spf: Option<SpfResult>,
    pub dkim: Option<DkimResult>,
    pub dmarc: Option<DmarcResult>,
    /// Domain part of the visible From address
    pub from_domain: String,
}

impl AuthenticityInput {
    /// Create an input with no mechanisms present
    pub fn new(from_domain: impl Into<String>) -> Self {
        Self {
            spf: None,
            dkim: None,
            dmarc: None,
            from_domain: from_domain.into(),
        }
    }

    /// Set the SPF result
    pub fn with_spf(mut self, spf: Option<SpfResult>) -> Self {
        self.spf = spf;
        self
    }

    /// Set the DKIM result
    pub fn with_dkim(mut self, dkim: Option<DkimResult>) -> Self {
        self.dkim = dkim;
        self
    }

    /// Set the DMARC result
    pub fn with_dmarc(mut self, dmarc: Option<DmarcResult>) -> Self {
        self.dmarc = dmarc;
        self
    }

    /// Number of mechanisms present
    pub fn present_count(&self) -> usize {
        usize::from(self.spf.is_some())
            + usize::from(self.dkim.is_some())
            + usize::from(self.dmarc.is_some())
    }

    /// Check that every present mechanism carries its required fields
    pub fn validate(&self) -> Result<()> {
        if let Some(spf) = &self.spf {
            spf.validate()?;
        }
        if let Some(dkim) = &self.dkim {
            dkim.validate()?;
        }
        Ok(())
    }
}

/// Compare two domains case-insensitively, ignoring one trailing root dot
pub fn domains_match(a: &str, b: &str) -> bool {
    fn trim(domain: &str) -> &str {
        let domain = domain.trim();
        domain.strip_suffix('.').unwrap_or(domain)
    }

    trim(a).eq_ignore_ascii_case(trim(b))
}
