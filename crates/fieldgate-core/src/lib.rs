//! Fieldgate Core: data model, error taxonomy, and workflow configuration
//!
//! Shared types for the inspection lifecycle engine. Everything here is plain
//! data: the state machine, checklist validator, and escalation engine all
//! consume these types and return structured results.

pub mod checklist;
pub mod config;
pub mod error;
pub mod escalation;
pub mod inspection;
pub mod issue;

pub use checklist::{
    Checklist, ConditionOperator, Question, QuestionCondition, QuestionType, Response,
    ResponseValue, ValidationRules,
};
pub use config::WorkflowConfig;
pub use error::WorkflowError;
pub use escalation::{EscalationPriority, EscalationRecord, EscalationStatus};
pub use inspection::{Inspection, InspectionStatus, Priority};
pub use issue::{IssueCode, ValidationIssue};

/// Engine version
pub const FIELDGATE_VERSION: &str = "1.0.0";
