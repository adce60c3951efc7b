//! MailTrust Core - Mail authenticity aggregation
//!
//! This crate combines already-evaluated SPF, DKIM and DMARC results with the
//! visible From domain into one PASS / FAIL / SUSPICIOUS / NEUTRAL verdict and a
//! domain-mismatch flag.

pub mod authenticity;
pub mod email_auth;

pub use authenticity::{
    evaluate, AuthenticityScanner, AuthenticityVerdict, Mechanism, MechanismDetail,
    OverallStatus, ScanItem, ScanReport,
};
pub use email_auth::{
    AuthenticityInput, DkimResult, DmarcPolicy, DmarcResult, MechanismOutcome, SpfResult,
};
