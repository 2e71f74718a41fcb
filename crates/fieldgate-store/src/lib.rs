//! Fieldgate Store: the record-store seam
//!
//! The engine crates are pure; everything durable goes through the
//! [`RecordStore`] trait. The in-memory implementation backs tests and the
//! demo binary; a relational implementation would satisfy the same contract,
//! enforcing the one-active-escalation invariant with a partial unique index
//! instead of a lock.

pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use fieldgate_core::{
    Checklist, EscalationRecord, Inspection, InspectionStatus, Response, WorkflowError,
};

pub use memory::MemoryStore;

/// Fields committed together with a status write.
///
/// The rejection-count increment rides in the same patch as the REJECTED
/// status; the write itself is guarded by the caller's expected status, so
/// a patch computed from a stale read is refused instead of applied.
#[derive(Debug, Clone, Default)]
pub struct StatusPatch {
    /// Replace the full response map
    pub responses: Option<HashMap<String, Response>>,
    /// Overwrite the rejection count
    pub rejection_count: Option<u32>,
    /// Overwrite reviewer notes
    pub reviewer_notes: Option<String>,
}

impl StatusPatch {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_responses(mut self, responses: HashMap<String, Response>) -> Self {
        self.responses = Some(responses);
        self
    }

    pub fn with_rejection_count(mut self, count: u32) -> Self {
        self.rejection_count = Some(count);
        self
    }

    pub fn with_reviewer_notes(mut self, notes: impl Into<String>) -> Self {
        self.reviewer_notes = Some(notes.into());
        self
    }
}

/// Scope of a manager's escalation queue query: all active records plus
/// terminal ones created within the recency window.
#[derive(Debug, Clone, Copy)]
pub struct QueueWindow {
    pub now: DateTime<Utc>,
    pub recency_hours: i64,
}

impl QueueWindow {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            recency_hours: 72,
        }
    }
}

/// Persistence boundary for inspections, checklists, and escalations.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get_inspection(&self, id: &str) -> Result<Inspection, WorkflowError>;

    async fn put_inspection(&self, inspection: Inspection) -> Result<(), WorkflowError>;

    /// Commit a status change and its patch as one write, compare-and-swap
    /// style: `expected` is the status the caller read before validating.
    /// Fails with [`WorkflowError::Conflict`] when the stored status has
    /// changed underneath the caller.
    async fn update_inspection_status(
        &self,
        id: &str,
        expected: InspectionStatus,
        status: InspectionStatus,
        patch: StatusPatch,
    ) -> Result<Inspection, WorkflowError>;

    async fn get_checklist(&self, id: &str) -> Result<Checklist, WorkflowError>;

    async fn put_checklist(&self, checklist: Checklist) -> Result<(), WorkflowError>;

    /// Create an escalation, enforcing at most one active record per
    /// inspection. Fails with [`WorkflowError::Conflict`] if a QUEUED or
    /// NOTIFIED record already exists.
    async fn create_escalation(
        &self,
        record: EscalationRecord,
    ) -> Result<EscalationRecord, WorkflowError>;

    async fn get_escalation(&self, id: &str) -> Result<EscalationRecord, WorkflowError>;

    /// Replace an existing escalation record (status advances, page counts).
    async fn save_escalation(&self, record: EscalationRecord) -> Result<(), WorkflowError>;

    /// The active escalation for an inspection, if any.
    async fn active_escalation_for(
        &self,
        inspection_id: &str,
    ) -> Result<Option<EscalationRecord>, WorkflowError>;

    /// A manager's queue: active records plus recently-terminal ones.
    async fn escalations_for_manager(
        &self,
        manager_id: &str,
        window: QueueWindow,
    ) -> Result<Vec<EscalationRecord>, WorkflowError>;
}
