//! In-memory record store
//!
//! Backs tests and the demo binary. All maps live behind one `RwLock` so
//! `create_escalation` can do its uniqueness check and insert atomically
//! under the write guard, the in-memory equivalent of a partial unique
//! index on (inspection_id, active).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::RwLock;

use fieldgate_core::{
    Checklist, EscalationRecord, Inspection, InspectionStatus, WorkflowError,
};

use crate::{QueueWindow, RecordStore, StatusPatch};

#[derive(Default)]
struct Inner {
    inspections: HashMap<String, Inspection>,
    checklists: HashMap<String, Checklist>,
    escalations: HashMap<String, EscalationRecord>,
}

/// A `RecordStore` held entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_inspection(&self, id: &str) -> Result<Inspection, WorkflowError> {
        self.inner
            .read()
            .await
            .inspections
            .get(id)
            .cloned()
            .ok_or_else(|| WorkflowError::NotFound(format!("inspection {}", id)))
    }

    async fn put_inspection(&self, inspection: Inspection) -> Result<(), WorkflowError> {
        self.inner
            .write()
            .await
            .inspections
            .insert(inspection.id.clone(), inspection);
        Ok(())
    }

    async fn update_inspection_status(
        &self,
        id: &str,
        expected: InspectionStatus,
        status: InspectionStatus,
        patch: StatusPatch,
    ) -> Result<Inspection, WorkflowError> {
        let mut inner = self.inner.write().await;
        let inspection = inner
            .inspections
            .get_mut(id)
            .ok_or_else(|| WorkflowError::NotFound(format!("inspection {}", id)))?;

        // compare-and-swap under the write guard: a patch computed from a
        // stale read must not land
        if inspection.status != expected {
            return Err(WorkflowError::Conflict(format!(
                "inspection {} is {}, caller expected {}",
                id, inspection.status, expected
            )));
        }

        inspection.status = status;
        if let Some(responses) = patch.responses {
            inspection.responses = responses;
        }
        if let Some(count) = patch.rejection_count {
            inspection.rejection_count = count;
        }
        if let Some(notes) = patch.reviewer_notes {
            inspection.reviewer_notes = Some(notes);
        }
        inspection.updated_at = chrono::Utc::now();

        tracing::debug!(inspection_id = %id, %status, "Inspection status committed");
        Ok(inspection.clone())
    }

    async fn get_checklist(&self, id: &str) -> Result<Checklist, WorkflowError> {
        self.inner
            .read()
            .await
            .checklists
            .get(id)
            .cloned()
            .ok_or_else(|| WorkflowError::NotFound(format!("checklist {}", id)))
    }

    async fn put_checklist(&self, checklist: Checklist) -> Result<(), WorkflowError> {
        self.inner
            .write()
            .await
            .checklists
            .insert(checklist.id.clone(), checklist);
        Ok(())
    }

    async fn create_escalation(
        &self,
        record: EscalationRecord,
    ) -> Result<EscalationRecord, WorkflowError> {
        let mut inner = self.inner.write().await;

        // check-and-create must be atomic under the write guard
        if let Some(existing) = inner
            .escalations
            .values()
            .find(|e| e.inspection_id == record.inspection_id && e.is_active())
        {
            return Err(WorkflowError::Conflict(format!(
                "inspection {} already has active escalation {}",
                record.inspection_id, existing.id
            )));
        }

        inner.escalations.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn get_escalation(&self, id: &str) -> Result<EscalationRecord, WorkflowError> {
        self.inner
            .read()
            .await
            .escalations
            .get(id)
            .cloned()
            .ok_or_else(|| WorkflowError::NotFound(format!("escalation {}", id)))
    }

    async fn save_escalation(&self, record: EscalationRecord) -> Result<(), WorkflowError> {
        let mut inner = self.inner.write().await;
        if !inner.escalations.contains_key(&record.id) {
            return Err(WorkflowError::NotFound(format!("escalation {}", record.id)));
        }
        inner.escalations.insert(record.id.clone(), record);
        Ok(())
    }

    async fn active_escalation_for(
        &self,
        inspection_id: &str,
    ) -> Result<Option<EscalationRecord>, WorkflowError> {
        Ok(self
            .inner
            .read()
            .await
            .escalations
            .values()
            .find(|e| e.inspection_id == inspection_id && e.is_active())
            .cloned())
    }

    async fn escalations_for_manager(
        &self,
        manager_id: &str,
        window: QueueWindow,
    ) -> Result<Vec<EscalationRecord>, WorkflowError> {
        let cutoff = window.now - Duration::hours(window.recency_hours);
        let mut records: Vec<EscalationRecord> = self
            .inner
            .read()
            .await
            .escalations
            .values()
            .filter(|e| e.original_manager_id == manager_id)
            .filter(|e| e.is_active() || e.created_at >= cutoff)
            .cloned()
            .collect();

        // most urgent first, then newest
        records.sort_by(|a, b| {
            b.priority_level
                .cmp(&a.priority_level)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(records)
    }
}
