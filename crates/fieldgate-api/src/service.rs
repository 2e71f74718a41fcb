//! Workflow orchestration: read → validate → commit
//!
//! The pure engines sit between two async store calls; this service owns
//! that sequencing. Every commit carries the status observed at read time,
//! so a record that changed underneath the caller surfaces as a conflict
//! instead of landing a stale write. The inspection transition and the
//! escalation record are two separate commits by design: a rejection that
//! lands while the escalation write fails is reported as a recoverable
//! state, never silently dropped.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use fieldgate_core::{
    EscalationRecord, Inspection, InspectionStatus, IssueCode, Response, ValidationIssue,
    WorkflowConfig, WorkflowError,
};
use fieldgate_escalation::{EscalationEngine, NewEscalation, QueueMetrics};
use fieldgate_lifecycle::{
    calculate_progress, can_transition, next_action, validate_transition, NextAction,
};
use fieldgate_store::{QueueWindow, RecordStore, StatusPatch};

/// Outcome of a submit request.
#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted { inspection: Inspection },
    Invalid { errors: Vec<ValidationIssue> },
}

/// Outcome of a review decision.
#[derive(Debug)]
pub enum ReviewOutcome {
    Approved {
        inspection: Inspection,
    },
    Rejected {
        inspection: Inspection,
        escalation: Option<EscalationRecord>,
        /// Set when the rejection committed but the escalation write failed
        escalation_error: Option<String>,
    },
    Invalid {
        errors: Vec<ValidationIssue>,
    },
}

/// A manager's review decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

/// Read-only probe for UI: can this inspection be submitted right now?
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub can_submit: bool,
    pub validation_errors: Vec<ValidationIssue>,
    pub progress: u8,
    pub current_status: InspectionStatus,
    pub next_action: NextAction,
}

pub struct WorkflowService {
    store: Arc<dyn RecordStore>,
    config: WorkflowConfig,
    escalations: EscalationEngine,
}

impl WorkflowService {
    pub fn new(store: Arc<dyn RecordStore>, config: WorkflowConfig) -> Self {
        Self {
            store,
            escalations: EscalationEngine::new(config),
            config,
        }
    }

    /// Fetch an inspection record.
    pub async fn inspection(&self, inspection_id: &str) -> Result<Inspection, WorkflowError> {
        self.store.get_inspection(inspection_id).await
    }

    /// Submit an inspection for review (DRAFT/REJECTED → PENDING).
    ///
    /// Only the assignee may submit. Incoming responses are merged over the
    /// stored ones and committed together with the status.
    pub async fn submit(
        &self,
        inspection_id: &str,
        actor: &str,
        responses: Vec<Response>,
    ) -> Result<SubmitOutcome, WorkflowError> {
        let mut inspection = self.store.get_inspection(inspection_id).await?;

        if inspection.assigned_to != actor {
            return Err(WorkflowError::Authorization(format!(
                "inspection {} is assigned to {}",
                inspection_id, inspection.assigned_to
            )));
        }

        for response in responses {
            inspection.record_response(response);
        }

        let checklist = self.store.get_checklist(&inspection.checklist_id).await?;
        let check = validate_transition(
            &inspection,
            &checklist,
            InspectionStatus::Pending,
            &self.config,
        );
        if !check.valid {
            return Ok(SubmitOutcome::Invalid {
                errors: check.errors,
            });
        }

        let committed = self
            .store
            .update_inspection_status(
                inspection_id,
                inspection.status,
                InspectionStatus::Pending,
                StatusPatch::none().with_responses(inspection.responses.clone()),
            )
            .await?;

        tracing::info!(inspection_id, actor, "Inspection submitted");
        Ok(SubmitOutcome::Submitted {
            inspection: committed,
        })
    }

    /// Apply a manager's review decision to an IN_REVIEW inspection.
    ///
    /// A rejection that reaches the threshold must carry an
    /// `escalation_reason`; the count increment commits atomically with the
    /// status, and only then is the escalation record written.
    pub async fn review(
        &self,
        inspection_id: &str,
        manager_id: &str,
        decision: ReviewDecision,
        notes: Option<String>,
        escalation_reason: Option<String>,
    ) -> Result<ReviewOutcome, WorkflowError> {
        let inspection = self.store.get_inspection(inspection_id).await?;
        let checklist = self.store.get_checklist(&inspection.checklist_id).await?;

        match decision {
            ReviewDecision::Approved => {
                let check = validate_transition(
                    &inspection,
                    &checklist,
                    InspectionStatus::Approved,
                    &self.config,
                );
                if !check.valid {
                    return Ok(ReviewOutcome::Invalid {
                        errors: check.errors,
                    });
                }

                let mut patch = StatusPatch::none();
                if let Some(notes) = notes {
                    patch = patch.with_reviewer_notes(notes);
                }
                let committed = self
                    .store
                    .update_inspection_status(
                        inspection_id,
                        inspection.status,
                        InspectionStatus::Approved,
                        patch,
                    )
                    .await?;

                tracing::info!(inspection_id, manager_id, "Inspection approved");
                Ok(ReviewOutcome::Approved {
                    inspection: committed,
                })
            }
            ReviewDecision::Rejected => {
                self.reject(inspection, manager_id, notes, escalation_reason)
                    .await
            }
        }
    }

    async fn reject(
        &self,
        inspection: Inspection,
        manager_id: &str,
        notes: Option<String>,
        escalation_reason: Option<String>,
    ) -> Result<ReviewOutcome, WorkflowError> {
        // table check only; the escalation rule is handled here, not by
        // refusing the transition, because this caller IS the escalation path
        if !can_transition(inspection.status, InspectionStatus::Rejected) {
            return Ok(ReviewOutcome::Invalid {
                errors: vec![ValidationIssue::new(
                    IssueCode::IllegalTransition,
                    format!(
                        "cannot move inspection from {} to {}",
                        inspection.status,
                        InspectionStatus::Rejected
                    ),
                )],
            });
        }

        let new_count = inspection.rejection_count + 1;
        let escalates = new_count >= self.config.max_rejections;

        if escalates && escalation_reason.is_none() {
            return Ok(ReviewOutcome::Invalid {
                errors: vec![ValidationIssue::new(
                    IssueCode::EscalationRequired,
                    format!(
                        "rejection {} reaches the threshold of {}; escalation_reason is required",
                        new_count, self.config.max_rejections
                    ),
                )],
            });
        }

        let mut patch = StatusPatch::none().with_rejection_count(new_count);
        if let Some(notes) = notes {
            patch = patch.with_reviewer_notes(notes);
        }
        let committed = self
            .store
            .update_inspection_status(
                &inspection.id,
                inspection.status,
                InspectionStatus::Rejected,
                patch,
            )
            .await?;

        tracing::info!(
            inspection_id = %committed.id,
            manager_id,
            rejection_count = new_count,
            escalates,
            "Inspection rejected"
        );

        if !escalates {
            return Ok(ReviewOutcome::Rejected {
                inspection: committed,
                escalation: None,
                escalation_error: None,
            });
        }

        // the rejection is already committed; an escalation failure is
        // surfaced for manual reconciliation, never dropped
        let request = NewEscalation::new(
            committed.id.clone(),
            manager_id,
            escalation_reason.unwrap_or_default(),
        );
        let record = self.escalations.open(request, &committed, Utc::now());

        match self.store.create_escalation(record).await {
            Ok(created) => Ok(ReviewOutcome::Rejected {
                inspection: committed,
                escalation: Some(created),
                escalation_error: None,
            }),
            Err(err) => {
                tracing::warn!(
                    inspection_id = %committed.id,
                    error = %err,
                    "Rejection committed but escalation failed"
                );
                Ok(ReviewOutcome::Rejected {
                    inspection: committed,
                    escalation: None,
                    escalation_error: Some(
                        WorkflowError::EscalationCreation(err.to_string()).to_string(),
                    ),
                })
            }
        }
    }

    /// Resolve an escalation and reset the inspection's rejection count so
    /// the normal review loop can restart.
    pub async fn resolve_escalation(
        &self,
        escalation_id: &str,
    ) -> Result<EscalationRecord, WorkflowError> {
        let mut record = self.store.get_escalation(escalation_id).await?;
        self.escalations.resolve(&mut record)?;
        self.store.save_escalation(record.clone()).await?;

        let inspection = self.store.get_inspection(&record.inspection_id).await?;
        self.store
            .update_inspection_status(
                &inspection.id,
                inspection.status,
                inspection.status,
                StatusPatch::none().with_rejection_count(0),
            )
            .await?;

        tracing::info!(escalation_id, inspection_id = %record.inspection_id, "Escalation resolved");
        Ok(record)
    }

    /// Read-only submit probe for the UI.
    pub async fn probe(&self, inspection_id: &str) -> Result<ProbeReport, WorkflowError> {
        let inspection = self.store.get_inspection(inspection_id).await?;
        let checklist = self.store.get_checklist(&inspection.checklist_id).await?;

        let check = validate_transition(
            &inspection,
            &checklist,
            InspectionStatus::Pending,
            &self.config,
        );

        Ok(ProbeReport {
            can_submit: check.valid,
            validation_errors: check.errors,
            progress: calculate_progress(&inspection, &checklist),
            current_status: inspection.status,
            next_action: next_action(inspection.status),
        })
    }

    /// A manager's escalation queue with dashboard metrics.
    pub async fn manager_queue(
        &self,
        manager_id: &str,
    ) -> Result<(Vec<EscalationRecord>, QueueMetrics), WorkflowError> {
        let records = self
            .store
            .escalations_for_manager(manager_id, QueueWindow::at(Utc::now()))
            .await?;
        let metrics = QueueMetrics::from_records(&records);
        Ok((records, metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldgate_core::{
        Checklist, EscalationStatus, Priority, Question, QuestionType, ResponseValue,
    };
    use fieldgate_store::MemoryStore;

    async fn seeded_service() -> (WorkflowService, String) {
        let store = Arc::new(MemoryStore::new());
        let checklist = Checklist::new("cl-1")
            .with_question(Question::new("q1", "Panels secured?", QuestionType::Boolean).required());
        store.put_checklist(checklist).await.unwrap();

        let inspection = Inspection::new("proj-1", "cl-1", "inspector-1")
            .with_priority(Priority::High);
        let id = inspection.id.clone();
        store.put_inspection(inspection).await.unwrap();

        (
            WorkflowService::new(store, WorkflowConfig::default()),
            id,
        )
    }

    async fn submit_ok(service: &WorkflowService, id: &str) {
        let outcome = service
            .submit(
                id,
                "inspector-1",
                vec![Response::answered("q1", ResponseValue::Bool(true))],
            )
            .await
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));
    }

    async fn move_to_in_review(service: &WorkflowService, id: &str) {
        submit_ok(service, id).await;
        service
            .store
            .update_inspection_status(
                id,
                InspectionStatus::Pending,
                InspectionStatus::InReview,
                StatusPatch::none(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_submit_requires_assignee() {
        let (service, id) = seeded_service().await;
        let err = service
            .submit(&id, "somebody-else", vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_submit_incomplete_lists_errors() {
        let (service, id) = seeded_service().await;
        let outcome = service.submit(&id, "inspector-1", vec![]).await.unwrap();

        match outcome {
            SubmitOutcome::Invalid { errors } => {
                assert_eq!(errors[0].question_id.as_deref(), Some("q1"));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_commits_pending() {
        let (service, id) = seeded_service().await;
        submit_ok(&service, &id).await;

        let inspection = service.store.get_inspection(&id).await.unwrap();
        assert_eq!(inspection.status, InspectionStatus::Pending);
        assert!(inspection.response_for("q1").is_some());
    }

    #[tokio::test]
    async fn test_approve_from_in_review() {
        let (service, id) = seeded_service().await;
        move_to_in_review(&service, &id).await;

        let outcome = service
            .review(&id, "mgr-1", ReviewDecision::Approved, Some("good work".into()), None)
            .await
            .unwrap();
        match outcome {
            ReviewOutcome::Approved { inspection } => {
                assert_eq!(inspection.status, InspectionStatus::Approved);
                assert_eq!(inspection.reviewer_notes.as_deref(), Some("good work"));
            }
            other => panic!("expected Approved, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_approve_from_pending_is_invalid() {
        let (service, id) = seeded_service().await;
        submit_ok(&service, &id).await;

        let outcome = service
            .review(&id, "mgr-1", ReviewDecision::Approved, None, None)
            .await
            .unwrap();
        assert!(matches!(outcome, ReviewOutcome::Invalid { .. }));
    }

    #[tokio::test]
    async fn test_first_rejection_is_plain() {
        let (service, id) = seeded_service().await;
        move_to_in_review(&service, &id).await;

        let outcome = service
            .review(&id, "mgr-1", ReviewDecision::Rejected, None, None)
            .await
            .unwrap();
        match outcome {
            ReviewOutcome::Rejected {
                inspection,
                escalation,
                escalation_error,
            } => {
                assert_eq!(inspection.rejection_count, 1);
                assert!(escalation.is_none());
                assert!(escalation_error.is_none());
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_second_rejection_escalates() {
        let (service, id) = seeded_service().await;
        move_to_in_review(&service, &id).await;
        service
            .review(&id, "mgr-1", ReviewDecision::Rejected, None, None)
            .await
            .unwrap();

        // back through the loop
        move_to_in_review(&service, &id).await;

        // without a reason the threshold rejection is refused
        let outcome = service
            .review(&id, "mgr-1", ReviewDecision::Rejected, None, None)
            .await
            .unwrap();
        match outcome {
            ReviewOutcome::Invalid { errors } => {
                assert_eq!(errors[0].code, IssueCode::EscalationRequired);
            }
            other => panic!("expected Invalid, got {:?}", other),
        }

        let outcome = service
            .review(
                &id,
                "mgr-1",
                ReviewDecision::Rejected,
                None,
                Some("review loop stalled".into()),
            )
            .await
            .unwrap();
        match outcome {
            ReviewOutcome::Rejected {
                inspection,
                escalation,
                escalation_error,
            } => {
                assert_eq!(inspection.rejection_count, 2);
                let record = escalation.expect("escalation record");
                assert_eq!(record.status, EscalationStatus::Queued);
                // HIGH inspection priority floors the escalation priority
                assert_eq!(
                    record.priority_level,
                    fieldgate_core::EscalationPriority::High
                );
                assert!(escalation_error.is_none());
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_escalation_surfaces_not_drops() {
        let (service, id) = seeded_service().await;
        move_to_in_review(&service, &id).await;
        service
            .review(&id, "mgr-1", ReviewDecision::Rejected, None, None)
            .await
            .unwrap();
        move_to_in_review(&service, &id).await;
        service
            .review(&id, "mgr-1", ReviewDecision::Rejected, None, Some("stalled".into()))
            .await
            .unwrap();

        // force another threshold rejection while the first escalation is
        // still active
        move_to_in_review(&service, &id).await;
        let outcome = service
            .review(&id, "mgr-1", ReviewDecision::Rejected, None, Some("again".into()))
            .await
            .unwrap();

        match outcome {
            ReviewOutcome::Rejected {
                inspection,
                escalation,
                escalation_error,
            } => {
                // the rejection itself still landed
                assert_eq!(inspection.status, InspectionStatus::Rejected);
                assert!(escalation.is_none());
                let err = escalation_error.expect("conflict surfaced");
                assert!(err.starts_with("ESCALATION/"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resolution_resets_rejection_count() {
        let (service, id) = seeded_service().await;
        move_to_in_review(&service, &id).await;
        service
            .review(&id, "mgr-1", ReviewDecision::Rejected, None, None)
            .await
            .unwrap();
        move_to_in_review(&service, &id).await;
        let outcome = service
            .review(&id, "mgr-1", ReviewDecision::Rejected, None, Some("stalled".into()))
            .await
            .unwrap();
        let escalation_id = match outcome {
            ReviewOutcome::Rejected { escalation, .. } => escalation.unwrap().id,
            other => panic!("expected Rejected, got {:?}", other),
        };

        let resolved = service.resolve_escalation(&escalation_id).await.unwrap();
        assert_eq!(resolved.status, EscalationStatus::Resolved);

        let inspection = service.store.get_inspection(&id).await.unwrap();
        assert_eq!(inspection.rejection_count, 0);

        // resolving twice is a conflict
        let err = service.resolve_escalation(&escalation_id).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_probe_reports_progress_and_guidance() {
        let (service, id) = seeded_service().await;

        let report = service.probe(&id).await.unwrap();
        assert!(!report.can_submit);
        assert_eq!(report.progress, 0);
        assert_eq!(report.current_status, InspectionStatus::Draft);
        assert_eq!(report.next_action.action, "complete_and_submit");

        submit_ok(&service, &id).await;
        let report = service.probe(&id).await.unwrap();
        assert_eq!(report.progress, 100);
        assert_eq!(report.current_status, InspectionStatus::Pending);
    }

    #[tokio::test]
    async fn test_manager_queue_metrics() {
        let (service, id) = seeded_service().await;
        move_to_in_review(&service, &id).await;
        service
            .review(&id, "mgr-1", ReviewDecision::Rejected, None, None)
            .await
            .unwrap();
        move_to_in_review(&service, &id).await;
        service
            .review(&id, "mgr-1", ReviewDecision::Rejected, None, Some("stalled".into()))
            .await
            .unwrap();

        let (records, metrics) = service.manager_queue("mgr-1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(metrics.active_escalations, 1);
        assert_eq!(metrics.total_escalations, 1);

        let (records, _) = service.manager_queue("mgr-2").await.unwrap();
        assert!(records.is_empty());
    }
}
