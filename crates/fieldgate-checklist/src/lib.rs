//! Fieldgate Checklist: completeness and response validation
//!
//! Pure functions over checklist questions and inspector responses. Nothing
//! here touches storage or clocks, so every rule can be unit-tested
//! exhaustively and reused on both the client pre-check and the
//! authoritative server path.
//!
//! # Architecture
//!
//! ```text
//! Responses → Visibility Filter → Per-Response Rules → Aggregated Report
//!                  ↓                      ↓                    ↓
//!            visible subset       ValidationIssues      SubmissionReport /
//!                                                       ChecklistReport
//! ```
//!
//! # Example
//!
//! ```
//! use fieldgate_core::{Checklist, Question, QuestionType, Response, ResponseValue};
//! use fieldgate_checklist::validate_submission;
//! use std::collections::HashMap;
//!
//! let checklist = Checklist::new("cl-1")
//!     .with_question(Question::new("q1", "Panels secured?", QuestionType::Boolean).required());
//!
//! let mut responses = HashMap::new();
//! responses.insert(
//!     "q1".to_string(),
//!     Response::answered("q1", ResponseValue::Bool(true)),
//! );
//!
//! let report = validate_submission(&checklist, &responses);
//! assert!(report.valid);
//! ```

pub mod response;
pub mod submission;
pub mod visibility;

pub use response::{validate_response, ResponseCheck};
pub use submission::{
    next_recommended_question, validate_checklist, validate_submission, ChecklistReport,
    SubmissionReport,
};
pub use visibility::{condition_holds, is_visible, visible_questions};
