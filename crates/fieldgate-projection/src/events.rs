//! Push-feed event payloads
//!
//! Mirrors the wire shape of the feed: an event type plus the new and old
//! row images. DELETE carries only `old`; INSERT only `new`.

use serde::{Deserialize, Serialize};

/// Kind of change observed on the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Insert,
    Update,
    Delete,
}

/// One committed change for a single entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent<T> {
    pub event_type: ChangeType,

    /// Row image after the change (absent for DELETE)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<T>,

    /// Row image before the change (absent for INSERT)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<T>,
}

impl<T> ChangeEvent<T> {
    pub fn insert(row: T) -> Self {
        Self {
            event_type: ChangeType::Insert,
            new: Some(row),
            old: None,
        }
    }

    pub fn update(old: T, new: T) -> Self {
        Self {
            event_type: ChangeType::Update,
            new: Some(new),
            old: Some(old),
        }
    }

    pub fn delete(row: T) -> Self {
        Self {
            event_type: ChangeType::Delete,
            new: None,
            old: Some(row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_shapes() {
        let insert = ChangeEvent::insert("row");
        assert_eq!(insert.event_type, ChangeType::Insert);
        assert!(insert.old.is_none());

        let delete = ChangeEvent::delete("row");
        assert!(delete.new.is_none());
        assert!(delete.old.is_some());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&ChangeEvent::insert(1)).unwrap();
        assert!(json.contains("\"INSERT\""));
        assert!(!json.contains("\"old\""));
    }
}
