//! Workflow configuration
//!
//! The rejection threshold and escalation TTL are passed explicitly to both
//! the state machine and the escalation engine so the two cannot drift apart.

use serde::{Deserialize, Serialize};

/// Tunable workflow parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Rejections at/above this count require escalation instead of a plain reject
    pub max_rejections: u32,

    /// Hours until a fresh escalation expires if nobody acts
    pub escalation_ttl_hours: i64,
}

impl WorkflowConfig {
    pub fn new(max_rejections: u32, escalation_ttl_hours: i64) -> Self {
        Self {
            max_rejections,
            escalation_ttl_hours,
        }
    }

    /// Override the rejection threshold
    pub fn with_max_rejections(mut self, max: u32) -> Self {
        self.max_rejections = max;
        self
    }

    /// Override the escalation TTL
    pub fn with_escalation_ttl(mut self, hours: i64) -> Self {
        self.escalation_ttl_hours = hours;
        self
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_rejections: 2,
            escalation_ttl_hours: 48,
        }
    }
}
