//! Fieldgate Escalation: when the review loop stalls
//!
//! Decides when a rejection must produce an escalation record, drives the
//! record's lifecycle (QUEUED → NOTIFIED → RESOLVED | EXPIRED), and
//! aggregates queue metrics for manager dashboards.
//!
//! The engine owns no clock and no storage: expiry is a pure function of a
//! stored timestamp against a caller-supplied "now", and the
//! at-most-one-active-per-inspection invariant is enforced by the record
//! store's atomic check-and-create, not here.

pub mod engine;
pub mod queue;

pub use engine::{EscalationEngine, NewEscalation};
pub use queue::QueueMetrics;
