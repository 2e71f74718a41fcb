//! Manager-queue aggregation
//!
//! Dashboard metrics over a manager's escalation records.

use serde::Serialize;

use fieldgate_core::{EscalationPriority, EscalationRecord, EscalationStatus};

/// Counts shown on the manager dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueMetrics {
    pub total_escalations: usize,
    pub active_escalations: usize,
    pub urgent_escalations: usize,
    pub expired_escalations: usize,
}

impl QueueMetrics {
    /// Aggregate metrics over a slice of records.
    ///
    /// Urgent counts only *active* URGENT records; a resolved urgent
    /// escalation no longer demands attention.
    pub fn from_records(records: &[EscalationRecord]) -> Self {
        let active = records.iter().filter(|r| r.is_active()).count();
        let urgent = records
            .iter()
            .filter(|r| r.is_active() && r.priority_level == EscalationPriority::Urgent)
            .count();
        let expired = records
            .iter()
            .filter(|r| r.status == EscalationStatus::Expired)
            .count();

        Self {
            total_escalations: records.len(),
            active_escalations: active,
            urgent_escalations: urgent,
            expired_escalations: expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EscalationEngine, NewEscalation};
    use chrono::Utc;
    use fieldgate_core::{Inspection, Priority, WorkflowConfig};

    fn records() -> Vec<EscalationRecord> {
        let engine = EscalationEngine::new(WorkflowConfig::default());
        let inspection = Inspection::new("proj-1", "cl-1", "inspector-1");
        let now = Utc::now();

        let queued = engine.open(NewEscalation::new("insp-1", "mgr-1", "a"), &inspection, now);

        let urgent = engine.open(
            NewEscalation::new("insp-2", "mgr-1", "b").with_priority(EscalationPriority::Urgent),
            &inspection.clone().with_priority(Priority::High),
            now,
        );

        let mut resolved = engine.open(NewEscalation::new("insp-3", "mgr-1", "c"), &inspection, now);
        engine.resolve(&mut resolved).unwrap();

        let mut expired = engine.open(NewEscalation::new("insp-4", "mgr-1", "d"), &inspection, now);
        engine
            .advance(&mut expired, EscalationStatus::Expired)
            .unwrap();

        vec![queued, urgent, resolved, expired]
    }

    #[test]
    fn test_metrics_counts() {
        let metrics = QueueMetrics::from_records(&records());
        assert_eq!(metrics.total_escalations, 4);
        assert_eq!(metrics.active_escalations, 2);
        assert_eq!(metrics.urgent_escalations, 1);
        assert_eq!(metrics.expired_escalations, 1);
    }

    #[test]
    fn test_empty_queue() {
        let metrics = QueueMetrics::from_records(&[]);
        assert_eq!(metrics.total_escalations, 0);
        assert_eq!(metrics.active_escalations, 0);
    }
}
