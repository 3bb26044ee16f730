//! Application state shared across handlers

use std::sync::Arc;

use skinforge_claim::ClaimOrchestrator;
use skinforge_ledger::{
    InMemoryJournal, InMemoryLedgerStore, InMemoryPresetStore, LedgerJournal, LedgerStore,
    PresetStore,
};
use skinforge_redeem::LedgerOps;

use crate::inventory::InMemoryInventory;

/// Shared application state
pub struct AppState {
    pub presets: Arc<dyn PresetStore>,
    pub ledger: Arc<dyn LedgerStore>,
    pub journal: Arc<dyn LedgerJournal>,
    pub ops: Arc<LedgerOps>,
    pub orchestrator: ClaimOrchestrator,
    pub inventory: Arc<InMemoryInventory>,
}

impl AppState {
    /// Wire the engine over in-memory stores
    pub fn new() -> Arc<Self> {
        let presets: Arc<dyn PresetStore> = Arc::new(InMemoryPresetStore::new());
        let ledger: Arc<dyn LedgerStore> = Arc::new(InMemoryLedgerStore::new());
        let journal: Arc<dyn LedgerJournal> = Arc::new(InMemoryJournal::new());

        let inventory = Arc::new(InMemoryInventory::new(presets.clone(), ledger.clone()));
        let ops = Arc::new(LedgerOps::new(
            presets.clone(),
            ledger.clone(),
            journal.clone(),
            inventory.clone(),
        ));
        let orchestrator = ClaimOrchestrator::new(ops.clone(), inventory.clone());

        Arc::new(Self {
            presets,
            ledger,
            journal,
            ops,
            orchestrator,
            inventory,
        })
    }
}
