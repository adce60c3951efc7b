//! Authenticity verdicts
//!
//! Turns parsed SPF, DKIM and DMARC results into the single trust verdict
//! shown to the user, either per message or across a batch.

pub mod aggregator;
pub mod scan;

pub use aggregator::{
    evaluate, status_for, validated_domain, AuthenticityVerdict, Mechanism, MechanismDetail,
    OverallStatus,
};
pub use scan::{AuthenticityScanner, ScanItem, ScanOutcome, ScanReport, ScanSummary};
