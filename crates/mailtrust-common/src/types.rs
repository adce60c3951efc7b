//! Common types for MailTrust

use uuid::Uuid;

/// Unique identifier for messages
pub type MessageId = Uuid;
