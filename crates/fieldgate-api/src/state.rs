//! Shared application state
//!
//! The store and config are injected explicitly, no module-level service
//! singletons. Handlers clone the state; the store itself is shared behind
//! an `Arc`.

use std::sync::Arc;

use fieldgate_core::WorkflowConfig;
use fieldgate_store::RecordStore;

use crate::service::WorkflowService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WorkflowService>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: WorkflowConfig) -> Self {
        Self {
            service: Arc::new(WorkflowService::new(store, config)),
        }
    }
}
