//! Escalation records
//!
//! An escalation is raised when repeated rejections indicate the normal
//! review loop has stalled. At most one active (QUEUED or NOTIFIED) record
//! may exist per inspection; that invariant is enforced at the store
//! boundary, not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::inspection::Priority;

/// Lifecycle status of an escalation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EscalationStatus {
    /// Created, managers not yet paged
    Queued,
    /// Managers have been paged at least once
    Notified,
    /// A manager acted, terminal
    Resolved,
    /// TTL elapsed with no action, terminal
    Expired,
}

impl EscalationStatus {
    /// QUEUED or NOTIFIED
    pub fn is_active(self) -> bool {
        matches!(self, Self::Queued | Self::Notified)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Expired)
    }
}

impl fmt::Display for EscalationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => write!(f, "QUEUED"),
            Self::Notified => write!(f, "NOTIFIED"),
            Self::Resolved => write!(f, "RESOLVED"),
            Self::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// Escalation urgency, ordered so dashboards can sort and threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EscalationPriority {
    Low = 0,
    Medium = 1,
    High = 2,
    Urgent = 3,
}

impl From<Priority> for EscalationPriority {
    /// A HIGH-priority inspection escalates at least HIGH.
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Low => EscalationPriority::Low,
            Priority::Medium => EscalationPriority::Medium,
            Priority::High => EscalationPriority::High,
        }
    }
}

impl fmt::Display for EscalationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Urgent => write!(f, "URGENT"),
        }
    }
}

/// An out-of-band record routed to managers when rejections repeat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationRecord {
    pub id: String,
    pub inspection_id: String,

    /// The manager whose review loop stalled
    pub original_manager_id: String,

    pub escalation_reason: String,
    pub priority_level: EscalationPriority,
    pub status: EscalationStatus,

    /// Times managers were paged for this record
    #[serde(default)]
    pub notification_count: u32,

    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl EscalationRecord {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
