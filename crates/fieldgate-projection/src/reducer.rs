//! The projection reducer
//!
//! Folds feed events into a keyed view and layers optimistic local
//! mutations on top. Staged mutations are forgotten on commit (the feed
//! will confirm), and on abort the whole view is marked stale so the owner
//! refetches; no partial rollback.

use std::collections::HashMap;

use fieldgate_core::{EscalationRecord, Inspection};

use crate::events::{ChangeEvent, ChangeType};

/// An entity with a stable string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Inspection {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for EscalationRecord {
    fn key(&self) -> &str {
        &self.id
    }
}

/// What the projection owner must do after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionAction {
    /// Nothing; the view is consistent.
    None,
    /// Discard trust in the view and re-fetch the whole collection.
    Refetch,
}

/// Handle for a staged optimistic mutation.
pub type StageToken = u64;

#[derive(Debug, Clone)]
enum StagedDelta {
    Upsert(String),
    Delete(String),
}

impl StagedDelta {
    fn key(&self) -> &str {
        match self {
            StagedDelta::Upsert(key) | StagedDelta::Delete(key) => key,
        }
    }
}

/// A client-held keyed view of one entity collection.
#[derive(Debug, Default)]
pub struct Projection<T: Keyed + Clone> {
    items: HashMap<String, T>,
    staged: HashMap<StageToken, StagedDelta>,
    next_token: StageToken,
    stale: bool,
}

impl<T: Keyed + Clone> Projection<T> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            staged: HashMap::new(),
            next_token: 0,
            stale: false,
        }
    }

    /// Build from an initial fetch.
    pub fn from_items(items: Vec<T>) -> Self {
        let mut projection = Self::new();
        projection.reset(items);
        projection
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.get(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a failed commit has invalidated the view.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    /// Fold one feed event into the view.
    ///
    /// A confirmed server change supersedes any staged optimistic delta for
    /// the same key. Events keep applying while stale, so the view stays as
    /// fresh as possible until the owner refetches.
    pub fn apply_event(&mut self, event: ChangeEvent<T>) {
        let key = match (&event.new, &event.old) {
            (Some(row), _) | (None, Some(row)) => row.key().to_string(),
            (None, None) => {
                tracing::debug!("Dropping feed event with no row image");
                return;
            }
        };

        self.staged.retain(|_, delta| delta.key() != key);

        match event.event_type {
            ChangeType::Insert | ChangeType::Update => {
                if let Some(row) = event.new {
                    self.items.insert(key, row);
                }
            }
            ChangeType::Delete => {
                self.items.remove(&key);
            }
        }
    }

    /// Apply a local upsert immediately, before the authoritative commit.
    pub fn stage_upsert(&mut self, row: T) -> StageToken {
        let key = row.key().to_string();
        self.items.insert(key.clone(), row);
        self.stage(StagedDelta::Upsert(key))
    }

    /// Apply a local delete immediately, before the authoritative commit.
    pub fn stage_delete(&mut self, key: &str) -> StageToken {
        self.items.remove(key);
        self.stage(StagedDelta::Delete(key.to_string()))
    }

    fn stage(&mut self, delta: StagedDelta) -> StageToken {
        let token = self.next_token;
        self.next_token += 1;
        self.staged.insert(token, delta);
        token
    }

    /// The authoritative commit succeeded; the staged delta is simply
    /// forgotten (the feed will deliver the confirming event).
    pub fn commit(&mut self, token: StageToken) -> ProjectionAction {
        self.staged.remove(&token);
        ProjectionAction::None
    }

    /// The authoritative commit failed. The optimistic change cannot be
    /// reliably inverted, so the view is marked stale and the owner must
    /// refetch.
    pub fn abort(&mut self, token: StageToken) -> ProjectionAction {
        self.staged.remove(&token);
        self.stale = true;
        tracing::debug!(token, "Optimistic mutation aborted; view marked stale");
        ProjectionAction::Refetch
    }

    /// Install a fresh snapshot (the refetch result). Clears staleness and
    /// any staged deltas.
    pub fn reset(&mut self, items: Vec<T>) {
        self.items = items
            .into_iter()
            .map(|item| (item.key().to_string(), item))
            .collect();
        self.staged.clear();
        self.stale = false;
    }
}
