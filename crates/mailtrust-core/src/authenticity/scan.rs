//! Batch scanner - Evaluates many messages, e.g. a whole mailbox
//!
//! Messages are independent, so the scan shards them into chunks and runs
//! each chunk on the blocking pool, bounded by a semaphore.

use super::aggregator::{evaluate, AuthenticityVerdict, OverallStatus};
use crate::email_auth::AuthenticityInput;
use mailtrust_common::config::ScanConfig;
use mailtrust_common::types::MessageId;
use mailtrust_common::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// One message queued for evaluation
#[derive(Debug, Clone)]
pub struct ScanItem {
    pub message_id: MessageId,
    pub input: AuthenticityInput,
}

impl ScanItem {
    pub fn new(message_id: MessageId, input: AuthenticityInput) -> Self {
        Self { message_id, input }
    }
}

/// Evaluation result for one message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome {
    pub message_id: MessageId,
    /// The verdict, or the reason the parsed input was rejected
    pub result: std::result::Result<AuthenticityVerdict, String>,
}

impl ScanOutcome {
    /// Status to present to the user. Messages whose authentication results
    /// could not be evaluated are shown as unauthenticated.
    pub fn effective_status(&self) -> OverallStatus {
        match &self.result {
            Ok(verdict) => verdict.status,
            Err(_) => OverallStatus::Neutral,
        }
    }
}

/// Counts over a finished scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub suspicious: usize,
    pub neutral: usize,
    /// Verdicts whose validated domain differs from the From domain
    pub mismatched: usize,
    /// Messages rejected as malformed (not counted under a status)
    pub malformed: usize,
}

impl ScanSummary {
    fn record(&mut self, outcome: &ScanOutcome) {
        self.total += 1;

        let verdict = match &outcome.result {
            Ok(verdict) => verdict,
            Err(_) => {
                self.malformed += 1;
                return;
            }
        };

        match verdict.status {
            OverallStatus::Pass => self.pass += 1,
            OverallStatus::Fail => self.fail += 1,
            OverallStatus::Suspicious => self.suspicious += 1,
            OverallStatus::Neutral => self.neutral += 1,
        }
        if verdict.domain_mismatch == Some(true) {
            self.mismatched += 1;
        }
    }
}

/// Outcomes in input order plus their summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub outcomes: Vec<ScanOutcome>,
    pub summary: ScanSummary,
}

impl ScanReport {
    fn from_outcomes(outcomes: Vec<ScanOutcome>) -> Self {
        let mut summary = ScanSummary::default();
        for outcome in &outcomes {
            summary.record(outcome);
        }
        Self { outcomes, summary }
    }
}

/// Authenticity scanner
#[derive(Debug, Clone)]
pub struct AuthenticityScanner {
    /// Maximum chunks in flight
    concurrency_limit: usize,
    /// Messages per blocking task
    chunk_size: usize,
}

impl AuthenticityScanner {
    /// Create a new scanner from configuration
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit.max(1),
            chunk_size: config.chunk_size.max(1),
        }
    }

    /// Set concurrency limit
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit.max(1);
        self
    }

    /// Set chunk size
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Evaluate every item on the current thread
    pub fn evaluate_all(&self, items: impl IntoIterator<Item = ScanItem>) -> ScanReport {
        ScanReport::from_outcomes(evaluate_chunk(items.into_iter().collect()))
    }

    /// Evaluate every item on the blocking pool. Outcomes keep input order.
    pub async fn scan(&self, items: Vec<ScanItem>) -> Result<ScanReport> {
        let total = items.len();
        let semaphore = Arc::new(Semaphore::new(self.concurrency_limit));

        debug!(
            "Scanning {} messages (concurrency: {}, chunk: {})",
            total, self.concurrency_limit, self.chunk_size
        );

        let mut handles = Vec::new();
        let mut items = items.into_iter().peekable();

        while items.peek().is_some() {
            let chunk: Vec<ScanItem> = items.by_ref().take(self.chunk_size).collect();

            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| Error::Internal(format!("Scan semaphore closed: {}", e)))?;

            let handle = tokio::task::spawn_blocking(move || {
                let outcomes = evaluate_chunk(chunk);
                drop(permit);
                outcomes
            });

            handles.push(handle);
        }

        let mut outcomes = Vec::with_capacity(total);
        for handle in handles {
            let chunk = handle
                .await
                .map_err(|e| Error::Internal(format!("Scan task failed: {}", e)))?;
            outcomes.extend(chunk);
        }

        let report = ScanReport::from_outcomes(outcomes);

        info!(
            "Scan complete: {} messages, {} pass, {} fail, {} suspicious, {} neutral, {} mismatched, {} malformed",
            report.summary.total,
            report.summary.pass,
            report.summary.fail,
            report.summary.suspicious,
            report.summary.neutral,
            report.summary.mismatched,
            report.summary.malformed
        );

        Ok(report)
    }
}

impl Default for AuthenticityScanner {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}

fn evaluate_chunk(chunk: Vec<ScanItem>) -> Vec<ScanOutcome> {
    chunk
        .into_iter()
        .map(|item| {
            let result = evaluate(&item.input).map_err(|e| {
                warn!(
                    "Malformed authentication results for message {}: {}",
                    item.message_id, e
                );
                e.to_string()
            });
            ScanOutcome {
                message_id: item.message_id,
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email_auth::{DkimResult, DmarcPolicy, DmarcResult, MechanismOutcome, SpfResult};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn item(dmarc: Option<DmarcResult>, spf_domain: Option<&str>) -> ScanItem {
        let input = AuthenticityInput::new("example.net")
            .with_spf(spf_domain.map(|d| SpfResult {
                outcome: MechanismOutcome::Pass,
                domain: d.to_string(),
            }))
            .with_dmarc(dmarc);
        ScanItem::new(Uuid::new_v4(), input)
    }

    fn mailbox() -> Vec<ScanItem> {
        vec![
            item(Some(DmarcResult::Pass), Some("example.net")),
            item(Some(DmarcResult::Fail(DmarcPolicy::Reject)), Some("evil.example")),
            item(Some(DmarcResult::Fail(DmarcPolicy::Quarantine)), None),
            item(None, Some("example.net")),
            item(Some(DmarcResult::Pass), Some("")),
        ]
    }

    #[test]
    fn test_evaluate_all_summary() {
        let report = AuthenticityScanner::default().evaluate_all(mailbox());

        assert_eq!(
            report.summary,
            ScanSummary {
                total: 5,
                pass: 1,
                fail: 1,
                suspicious: 1,
                neutral: 1,
                mismatched: 1,
                malformed: 1,
            }
        );
    }

    #[test]
    fn test_malformed_item_presented_as_neutral() {
        let report = AuthenticityScanner::default().evaluate_all(mailbox());
        let malformed = &report.outcomes[4];

        assert!(malformed.result.is_err());
        assert_eq!(malformed.effective_status(), OverallStatus::Neutral);
        assert_eq!(report.outcomes[0].effective_status(), OverallStatus::Pass);
    }

    #[tokio::test]
    async fn test_scan_preserves_order() {
        let items: Vec<ScanItem> = (0..50)
            .map(|i| {
                let dmarc = if i % 2 == 0 {
                    Some(DmarcResult::Pass)
                } else {
                    Some(DmarcResult::Fail(DmarcPolicy::Reject))
                };
                item(dmarc, Some("example.net"))
            })
            .collect();
        let ids: Vec<MessageId> = items.iter().map(|i| i.message_id).collect();

        let scanner = AuthenticityScanner::default()
            .with_chunk_size(7)
            .with_concurrency_limit(3);
        let report = scanner.scan(items).await.unwrap();

        let scanned: Vec<MessageId> = report.outcomes.iter().map(|o| o.message_id).collect();
        assert_eq!(scanned, ids);
        assert_eq!(report.summary.pass, 25);
        assert_eq!(report.summary.fail, 25);
    }

    #[tokio::test]
    async fn test_scan_matches_sequential_evaluation() {
        let items = mailbox();
        let scanner = AuthenticityScanner::default().with_chunk_size(2);

        let sequential = scanner.evaluate_all(items.clone());
        let parallel = scanner.scan(items).await.unwrap();

        assert_eq!(parallel, sequential);
    }

    #[tokio::test]
    async fn test_scan_empty() {
        let report = AuthenticityScanner::default().scan(Vec::new()).await.unwrap();
        assert!(report.outcomes.is_empty());
        assert_eq!(report.summary, ScanSummary::default());
    }

    #[test]
    fn test_limits_clamped() {
        let scanner = AuthenticityScanner::new(&ScanConfig {
            concurrency_limit: 0,
            chunk_size: 0,
        });
        assert_eq!(scanner.concurrency_limit, 1);
        assert_eq!(scanner.chunk_size, 1);
    }

    #[test]
    fn test_dkim_only_item() {
        let input = AuthenticityInput::new("example.net").with_dkim(Some(
            DkimResult::new(MechanismOutcome::Fail, "other.example").unwrap(),
        ));
        let report =
            AuthenticityScanner::default().evaluate_all([ScanItem::new(Uuid::new_v4(), input)]);

        assert_eq!(report.summary.neutral, 1);
        assert_eq!(report.summary.mismatched, 1);
    }
}
