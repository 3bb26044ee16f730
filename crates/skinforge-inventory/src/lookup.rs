//! Request-scoped preset lookup
//!
//! Aggregation works on grant-time snapshots and can be missing a
//! threshold or display name on old rows. `PresetLookup` backfills those
//! from the preset store with a per-request memo, injected where it is
//! used, so there is no process-global catalog cache to go stale.

use std::collections::HashMap;
use std::sync::Arc;

use skinforge_ledger::PresetStore;
use skinforge_types::{FragmentPreset, PresetId, Result};

use crate::aggregate::FragmentGroup;

/// Memoizing preset reader scoped to one request
pub struct PresetLookup {
    store: Arc<dyn PresetStore>,
    memo: HashMap<PresetId, Option<FragmentPreset>>,
}

impl PresetLookup {
    pub fn new(store: Arc<dyn PresetStore>) -> Self {
        Self {
            store,
            memo: HashMap::new(),
        }
    }

    /// Fetch a preset, hitting the store at most once per id
    pub async fn get(&mut self, id: &PresetId) -> Result<Option<FragmentPreset>> {
        if let Some(cached) = self.memo.get(id) {
            return Ok(cached.clone());
        }
        let preset = self.store.get(id).await?;
        self.memo.insert(id.clone(), preset.clone());
        Ok(preset)
    }

    /// Fill a group's missing threshold and name from the preset store
    pub async fn backfill(&mut self, group: &mut FragmentGroup) -> Result<()> {
        if group.required_quantity.is_some() && group.name.is_some() {
            return Ok(());
        }
        let preset_id = group.preset_id.clone();
        if let Some(preset) = self.get(&preset_id).await? {
            if group.required_quantity.is_none() {
                group.required_quantity = Some(preset.required_quantity);
            }
            if group.name.is_none() {
                group.name = Some(preset.name.clone());
            }
            if group.reward_category.is_none() {
                group.reward_category = Some(preset.reward_category);
            }
        }
        Ok(())
    }
}
