//! Escalation record lifecycle
//!
//! Legal record transitions:
//!
//! ```text
//! QUEUED → NOTIFIED → RESOLVED | EXPIRED
//! QUEUED → RESOLVED            (resolved before anyone was paged)
//! QUEUED → EXPIRED             (TTL elapsed before anyone was paged)
//! ```

use chrono::{DateTime, Duration, Utc};

use fieldgate_core::{
    EscalationPriority, EscalationRecord, EscalationStatus, Inspection, WorkflowConfig,
    WorkflowError,
};

/// Request to open an escalation for an inspection.
#[derive(Debug, Clone)]
pub struct NewEscalation {
    pub inspection_id: String,
    pub original_manager_id: String,
    pub escalation_reason: String,
    /// Explicit priority; the inspection-derived floor still applies
    pub priority_level: Option<EscalationPriority>,
}

impl NewEscalation {
    pub fn new(
        inspection_id: impl Into<String>,
        original_manager_id: impl Into<String>,
        escalation_reason: impl Into<String>,
    ) -> Self {
        Self {
            inspection_id: inspection_id.into(),
            original_manager_id: original_manager_id.into(),
            escalation_reason: escalation_reason.into(),
            priority_level: None,
        }
    }

    /// Request a specific priority
    pub fn with_priority(mut self, priority: EscalationPriority) -> Self {
        self.priority_level = Some(priority);
        self
    }
}

/// Pure escalation lifecycle logic, parameterized by workflow config.
#[derive(Debug, Clone)]
pub struct EscalationEngine {
    config: WorkflowConfig,
}

impl EscalationEngine {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Build a fresh QUEUED record.
    ///
    /// The priority floor comes from the inspection: a HIGH-priority
    /// inspection escalates at least HIGH, even when the caller asked for
    /// less. The TTL comes from the workflow config.
    pub fn open(
        &self,
        request: NewEscalation,
        inspection: &Inspection,
        now: DateTime<Utc>,
    ) -> EscalationRecord {
        let floor = EscalationPriority::from(inspection.priority);
        let priority_level = request
            .priority_level
            .map(|requested| requested.max(floor))
            .unwrap_or(floor);

        let record = EscalationRecord {
            id: uuid::Uuid::new_v4().to_string(),
            inspection_id: request.inspection_id,
            original_manager_id: request.original_manager_id,
            escalation_reason: request.escalation_reason,
            priority_level,
            status: EscalationStatus::Queued,
            notification_count: 0,
            created_at: now,
            expires_at: Some(now + Duration::hours(self.config.escalation_ttl_hours)),
        };

        tracing::info!(
            escalation_id = %record.id,
            inspection_id = %record.inspection_id,
            priority = %record.priority_level,
            "Escalation opened"
        );

        record
    }

    /// Advance a record to a new status, enforcing the lifecycle graph.
    pub fn advance(
        &self,
        record: &mut EscalationRecord,
        to: EscalationStatus,
    ) -> Result<(), WorkflowError> {
        use EscalationStatus::*;

        let from = record.status;
        let legal = matches!(
            (from, to),
            (Queued, Notified)
                | (Queued, Resolved)
                | (Queued, Expired)
                | (Notified, Resolved)
                | (Notified, Expired)
        );

        if !legal {
            return Err(WorkflowError::Conflict(format!(
                "escalation {} cannot move from {} to {}",
                record.id, from, to
            )));
        }

        record.status = to;
        tracing::debug!(
            escalation_id = %record.id,
            %from,
            %to,
            "Escalation transition"
        );
        Ok(())
    }

    /// Page managers: moves a QUEUED record to NOTIFIED (idempotent for an
    /// already-NOTIFIED record) and counts the page-out.
    pub fn notify(&self, record: &mut EscalationRecord) -> Result<(), WorkflowError> {
        match record.status {
            EscalationStatus::Queued => {
                self.advance(record, EscalationStatus::Notified)?;
            }
            EscalationStatus::Notified => {}
            terminal => {
                return Err(WorkflowError::Conflict(format!(
                    "escalation {} is already {}",
                    record.id, terminal
                )));
            }
        }
        record.notification_count += 1;
        Ok(())
    }

    /// Resolve an escalation; error if already terminal.
    pub fn resolve(&self, record: &mut EscalationRecord) -> Result<(), WorkflowError> {
        self.advance(record, EscalationStatus::Resolved)
    }

    /// Whether an active record's TTL has elapsed at `now`.
    pub fn is_expired(&self, record: &EscalationRecord, now: DateTime<Utc>) -> bool {
        record.status.is_active()
            && record
                .expires_at
                .map(|expires| expires <= now)
                .unwrap_or(false)
    }

    /// Flip every due active record to EXPIRED; returns how many changed.
    /// Called by the external periodic timer.
    pub fn expire_due(&self, records: &mut [EscalationRecord], now: DateTime<Utc>) -> usize {
        let mut expired = 0;
        for record in records.iter_mut() {
            if self.is_expired(record, now) && self.advance(record, EscalationStatus::Expired).is_ok()
            {
                expired += 1;
            }
        }
        expired
    }
}
