//! Fieldgate Lifecycle: the inspection state machine
//!
//! Stateless transition-and-validation authority over the five-state
//! inspection lifecycle:
//!
//! ```text
//! DRAFT → PENDING → IN_REVIEW → APPROVED (terminal)
//!   ↑        ↑          ↓
//!   └────────┼───── REJECTED
//!            └──────────┘
//! ```
//!
//! Every function here is a pure computation over its inputs, so the same
//! code runs as the client-side pre-check and the server-side authoritative
//! gate, so the two can never disagree.
//!
//! # Example
//!
//! ```
//! use fieldgate_core::{InspectionStatus, WorkflowConfig};
//! use fieldgate_lifecycle::can_transition;
//!
//! assert!(can_transition(InspectionStatus::Draft, InspectionStatus::Pending));
//! assert!(!can_transition(InspectionStatus::Draft, InspectionStatus::InReview));
//! ```

pub mod machine;
pub mod progress;

pub use machine::{can_transition, requires_escalation, validate_transition, TransitionCheck};
pub use progress::{calculate_progress, next_action, NextAction};
