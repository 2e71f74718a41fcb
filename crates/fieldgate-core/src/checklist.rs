//! Checklist, question, and response model
//!
//! Questions are declarative data: a type, flags, optional visibility
//! conditions, and optional validation bounds. Responses carry a typed value
//! instead of loosely-typed JSON so malformed answers are rejected once at
//! the boundary, not re-checked at every call site.

use serde::{Deserialize, Serialize};

/// An ordered set of questions an inspector must answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    pub id: String,
    pub questions: Vec<Question>,
}

impl Checklist {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            questions: Vec::new(),
        }
    }

    /// Add a question
    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Look up a question by id
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// A single checklist question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the checklist
    pub id: String,

    /// Question text shown to the inspector
    pub question: String,

    /// Expected answer type
    #[serde(rename = "type")]
    pub question_type: QuestionType,

    /// Whether an answer is mandatory
    #[serde(default)]
    pub required: bool,

    /// Whether at least one evidence reference is mandatory
    #[serde(default)]
    pub evidence_required: bool,

    /// Visibility conditions; all must hold for the question to be visible
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<QuestionCondition>,

    /// Optional value bounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

impl Question {
    /// Create an optional question with no conditions
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        question_type: QuestionType,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            question_type,
            required: false,
            evidence_required: false,
            conditions: Vec::new(),
            validation: None,
        }
    }

    /// Mark the question as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the question as evidence-required
    pub fn evidence_required(mut self) -> Self {
        self.evidence_required = true;
        self
    }

    /// Add a visibility condition
    pub fn with_condition(mut self, condition: QuestionCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Attach validation bounds
    pub fn with_validation(mut self, validation: ValidationRules) -> Self {
        self.validation = Some(validation);
        self
    }
}

/// Answer type of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Boolean,
    Text,
    Number,
    Multiselect,
    Rating,
}

/// A show-if condition on another question's response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionCondition {
    /// The controlling question
    pub question_id: String,
    pub operator: ConditionOperator,
    /// Value the controlling response is compared against
    pub value: ResponseValue,
}

impl QuestionCondition {
    pub fn new(
        question_id: impl Into<String>,
        operator: ConditionOperator,
        value: ResponseValue,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            operator,
            value,
        }
    }
}

/// Comparison operator used by visibility conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
}

/// Value bounds for a question's answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Minimum numeric value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Maximum numeric value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Regex a text answer must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Minimum number of selections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<usize>,

    /// Maximum number of selections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,
}

impl ValidationRules {
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Default::default()
        }
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Default::default()
        }
    }

    pub fn selections(min: usize, max: usize) -> Self {
        Self {
            min_selections: Some(min),
            max_selections: Some(max),
            ..Default::default()
        }
    }
}

/// A typed answer value.
///
/// Untagged on the wire: `true`, `4.2`, `"ok"`, and `["a","b"]` all
/// deserialize to the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Selections(Vec<String>),
}

impl ResponseValue {
    pub fn text(value: impl Into<String>) -> Self {
        ResponseValue::Text(value.into())
    }

    /// Numeric view of the value. Booleans and selections never coerce;
    /// an empty string is never a valid number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ResponseValue::Number(n) => Some(*n),
            ResponseValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_selections(&self) -> Option<&[String]> {
        match self {
            ResponseValue::Selections(items) => Some(items),
            _ => None,
        }
    }

    /// Equality with numeric coercion: `Number(5.0)` equals `Text("5")`.
    pub fn loosely_equals(&self, other: &ResponseValue) -> bool {
        if self == other {
            return true;
        }
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// An inspector's answer to a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: String,

    /// The answer itself; absent means unanswered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ResponseValue>,

    /// Opaque references to attached evidence media
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence_ids: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Response {
    /// Create an unanswered response
    pub fn new(question_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            value: None,
            evidence_ids: Vec::new(),
            notes: None,
        }
    }

    /// Create an answered response
    pub fn answered(question_id: impl Into<String>, value: ResponseValue) -> Self {
        Self {
            question_id: question_id.into(),
            value: Some(value),
            evidence_ids: Vec::new(),
            notes: None,
        }
    }

    /// Attach evidence references
    pub fn with_evidence(mut self, evidence_ids: Vec<String>) -> Self {
        self.evidence_ids = evidence_ids;
        self
    }

    /// Attach notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Answered iff a value is present and is not the empty string.
    /// `false` and `0` are real answers.
    pub fn is_answered(&self) -> bool {
        match &self.value {
            None => false,
            Some(ResponseValue::Text(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    pub fn has_evidence(&self) -> bool {
        !self.evidence_ids.is_empty()
    }
}
