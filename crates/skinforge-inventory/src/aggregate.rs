//! Per-preset fragment aggregation
//!
//! Groups fragment-type inventory entries by resolved preset id and sums
//! their quantities. Display fields come from one fallback chain - a
//! member's `details` snapshot first, then its populated `itemId` object -
//! and every consuming surface (listing, claim gating, progress) reads
//! them from the group, so the same screen can never disagree with
//! itself.

use std::collections::HashMap;

use skinforge_types::{InventoryEntry, PresetId, RewardCategory, SkinforgeError};

use crate::resolve::resolve_preset_id;

/// One per-preset aggregate over the user's fragment rows
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentGroup {
    pub preset_id: PresetId,
    /// Sum of member quantities (absent quantity counts as 1)
    pub total_quantity: u64,
    /// Threshold from the first member that carries one
    pub required_quantity: Option<u64>,
    /// Display label from the first member that carries one
    pub name: Option<String>,
    pub reward_category: Option<RewardCategory>,
    /// Inventory rows folded into this group
    pub entry_ids: Vec<String>,
}

impl FragmentGroup {
    fn new(preset_id: PresetId) -> Self {
        Self {
            preset_id,
            total_quantity: 0,
            required_quantity: None,
            name: None,
            reward_category: None,
            entry_ids: Vec::new(),
        }
    }

    /// Whether the group holds a full threshold.
    ///
    /// A group with no known threshold is never complete; the lookup
    /// service can backfill `required_quantity` from the preset store.
    pub fn is_complete(&self) -> bool {
        match self.required_quantity {
            Some(required) => self.total_quantity >= required,
            None => false,
        }
    }

    /// Fragments still missing, for "need N more" messaging
    pub fn fragments_missing(&self) -> u64 {
        match self.required_quantity {
            Some(required) => required.saturating_sub(self.total_quantity),
            None => 0,
        }
    }

    fn absorb(&mut self, entry: &InventoryEntry) {
        self.total_quantity += entry.unit_quantity();
        self.entry_ids.push(entry.entry_id.clone());

        // details first, populated itemId second; first member wins
        let populated = entry.item_id.as_populated();
        if self.required_quantity.is_none() {
            self.required_quantity = entry
                .details
                .as_ref()
                .and_then(|d| d.required_quantity)
                .or_else(|| populated.and_then(|p| p.required_quantity));
        }
        if self.name.is_none() {
            self.name = entry
                .details
                .as_ref()
                .and_then(|d| d.name.clone())
                .or_else(|| populated.and_then(|p| p.name.clone()));
        }
        if self.reward_category.is_none() {
            self.reward_category = entry.details.as_ref().and_then(|d| d.reward_category);
        }
    }
}

/// An entry excluded from aggregation, with the reason
#[derive(Debug, Clone)]
pub struct ExcludedEntry {
    pub entry_id: String,
    pub error: SkinforgeError,
}

/// The aggregation result: groups plus everything that could not be
/// attributed
#[derive(Debug, Clone, Default)]
pub struct AggregationOutcome {
    /// Groups in first-seen order
    pub groups: Vec<FragmentGroup>,
    pub excluded: Vec<ExcludedEntry>,
}

impl AggregationOutcome {
    pub fn group_for(&self, preset_id: &PresetId) -> Option<&FragmentGroup> {
        self.groups.iter().find(|g| &g.preset_id == preset_id)
    }
}

/// Aggregate a snapshot of inventory entries into per-preset groups.
///
/// Non-fragment entries are skipped. Unresolvable fragment entries are
/// excluded and reported, never guessed into a group. Totals are
/// insensitive to input order.
pub fn aggregate_fragments(entries: &[InventoryEntry]) -> AggregationOutcome {
    let mut outcome = AggregationOutcome::default();
    let mut index: HashMap<PresetId, usize> = HashMap::new();

    for entry in entries.iter().filter(|e| e.is_fragment()) {
        let preset_id = match resolve_preset_id(entry) {
            Ok(id) => id,
            Err(error) => {
                outcome.excluded.push(ExcludedEntry {
                    entry_id: entry.entry_id.clone(),
                    error,
                });
                continue;
            }
        };

        let slot = *index.entry(preset_id.clone()).or_insert_with(|| {
            outcome.groups.push(FragmentGroup::new(preset_id));
            outcome.groups.len() - 1
        });
        outcome.groups[slot].absorb(entry);
    }

    outcome
}
