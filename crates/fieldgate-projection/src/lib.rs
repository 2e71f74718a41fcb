//! Fieldgate Projection: reconciling client-held state with the push feed
//!
//! The push feed delivers INSERT/UPDATE/DELETE events in commit order per
//! entity, with no ordering guarantee across entities. A [`Projection`] is a
//! keyed local view that folds those events in, supports optimistic local
//! mutations, and falls back to "invalidate and refetch" when a commit
//! fails: inverting an arbitrary partial update is error-prone, so we
//! never try.
//!
//! ```text
//!   stage(delta) ──► local view updated immediately
//!        │
//!   commit(token) ──► authoritative write confirmed; feed event follows
//!        │
//!   abort(token)  ──► view marked stale → ProjectionAction::Refetch
//! ```

pub mod events;
pub mod reducer;

pub use events::{ChangeEvent, ChangeType};
pub use reducer::{Keyed, Projection, ProjectionAction};
