//! Inspection record and lifecycle status
//!
//! An inspection moves through five states; `APPROVED` is terminal. The
//! record itself is plain data; transition legality lives in the
//! `fieldgate-lifecycle` crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::checklist::Response;

/// Lifecycle status of an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionStatus {
    /// Being filled in by the inspector
    Draft,
    /// Submitted, waiting for a manager to pick it up
    Pending,
    /// A manager is actively reviewing
    InReview,
    /// Accepted, terminal state
    Approved,
    /// Sent back by a manager
    Rejected,
}

impl InspectionStatus {
    /// Whether this is a terminal state (no further transitions allowed).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "DRAFT"),
            Self::Pending => write!(f, "PENDING"),
            Self::InReview => write!(f, "IN_REVIEW"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Inspection priority, set at assignment time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// A unit of field work tracked through the five-state lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
    pub id: String,
    pub project_id: String,
    pub checklist_id: String,

    /// Inspector identity
    pub assigned_to: String,

    pub status: InspectionStatus,
    pub priority: Priority,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// question id → response
    #[serde(default)]
    pub responses: HashMap<String, Response>,

    /// Incremented on every REJECTED transition; reset only when an
    /// escalation is resolved
    #[serde(default)]
    pub rejection_count: u32,

    /// Reviewer notes from the most recent decision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Inspection {
    /// Create a new inspection in DRAFT with a fresh id.
    pub fn new(
        project_id: impl Into<String>,
        checklist_id: impl Into<String>,
        assigned_to: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            checklist_id: checklist_id.into(),
            assigned_to: assigned_to.into(),
            status: InspectionStatus::Draft,
            priority: Priority::Medium,
            due_date: None,
            responses: HashMap::new(),
            rejection_count: 0,
            reviewer_notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set due date
    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Record (or replace) a response, touching `updated_at`.
    pub fn record_response(&mut self, response: Response) {
        self.responses
            .insert(response.question_id.clone(), response);
        self.updated_at = Utc::now();
    }

    /// The response for a question, if one was recorded.
    pub fn response_for(&self, question_id: &str) -> Option<&Response> {
        self.responses.get(question_id)
    }
}
