//! Binary entrypoint for the Fieldgate API server.
//!
//! Boots with an in-memory store seeded with the solar-site checklist and a
//! demo inspection so the endpoints can be exercised immediately.
use std::sync::Arc;

use fieldgate_api::{run, state::AppState};
use fieldgate_core::{Checklist, Inspection, Priority, WorkflowConfig};
use fieldgate_store::{MemoryStore, RecordStore};

const SOLAR_SITE_CHECKLIST: &str =
    include_str!("../../../testing/fixtures/checklists/solar-site.json");

async fn seed(store: &MemoryStore) {
    let checklist: Checklist =
        serde_json::from_str(SOLAR_SITE_CHECKLIST).expect("fixture checklist parses");
    let checklist_id = checklist.id.clone();
    store
        .put_checklist(checklist)
        .await
        .expect("seed checklist");

    let inspection = Inspection::new("demo-project", checklist_id, "inspector-demo")
        .with_priority(Priority::Medium);
    tracing::info!(inspection_id = %inspection.id, "Seeded demo inspection");
    store
        .put_inspection(inspection)
        .await
        .expect("seed inspection");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let store = Arc::new(MemoryStore::new());
    seed(&store).await;

    let state = AppState::new(store, WorkflowConfig::default());

    // Default listen address can be overridden with FIELDGATE_ADDR
    let addr = std::env::var("FIELDGATE_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());
    run(&addr, state).await;
}
