//! In-memory inventory collaborator
//!
//! Plays the two external roles the engine consumes: the inventory read
//! API (fragment balances projected as inventory rows, plus granted
//! rewards) and the reward-grant payout target. An exchange therefore
//! becomes visible on the next inventory read, closing the loop the
//! storefront client drives.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use skinforge_claim::ItemClaimer;
use skinforge_inventory::InventoryReader;
use skinforge_ledger::{LedgerStore, PresetStore};
use skinforge_redeem::RewardGranter;
use skinforge_types::{
    EntryDetails, FragmentPreset, GrantedReward, InventoryEntry, ItemRef, Result, RewardCategory,
    RewardId, RewardTarget, SkinforgeError, UserId, FRAGMENT_ITEM_TYPE,
};

fn reward_item_type(category: RewardCategory) -> &'static str {
    match category {
        RewardCategory::Skin => "SkinUser",
        RewardCategory::Chroma => "ChromaUser",
        RewardCategory::LootBox => "LootBoxUser",
        RewardCategory::Icon => "IconUser",
        RewardCategory::Bundle => "BundleUser",
        RewardCategory::Coupon => "CouponUser",
        RewardCategory::Gold => "GoldUser",
        RewardCategory::Item => "ItemUser",
    }
}

/// Ledger-backed inventory with an in-memory reward shelf
pub struct InMemoryInventory {
    presets: Arc<dyn PresetStore>,
    ledger: Arc<dyn LedgerStore>,
    rewards: RwLock<HashMap<UserId, Vec<InventoryEntry>>>,
}

impl InMemoryInventory {
    pub fn new(presets: Arc<dyn PresetStore>, ledger: Arc<dyn LedgerStore>) -> Self {
        Self {
            presets,
            ledger,
            rewards: RwLock::new(HashMap::new()),
        }
    }

    fn project_fragment_row(
        row: &skinforge_types::FragmentLedgerEntry,
        preset: Option<&FragmentPreset>,
    ) -> InventoryEntry {
        InventoryEntry {
            entry_id: row.id.to_string(),
            item_type: FRAGMENT_ITEM_TYPE.to_string(),
            item_id: ItemRef::Id(row.preset_id.to_string()),
            details: preset.map(|p| EntryDetails {
                fragment_id: Some(p.id.to_string()),
                name: Some(p.name.clone()),
                required_quantity: Some(p.required_quantity),
                reward_category: Some(p.reward_category),
            }),
            quantity: Some(row.balance),
        }
    }
}

#[async_trait]
impl InventoryReader for InMemoryInventory {
    async fn entries_for_user(&self, user: &UserId) -> Result<Vec<InventoryEntry>> {
        let mut entries = Vec::new();
        for row in self.ledger.entries_for_user(user).await? {
            let preset = self.presets.get(&row.preset_id).await?;
            entries.push(Self::project_fragment_row(&row, preset.as_ref()));
        }
        let rewards = self.rewards.read().await;
        if let Some(rows) = rewards.get(user) {
            entries.extend(rows.iter().cloned());
        }
        Ok(entries)
    }
}

#[async_trait]
impl RewardGranter for InMemoryInventory {
    async fn grant_reward(
        &self,
        user: &UserId,
        preset: &FragmentPreset,
        _correlation_id: &str,
    ) -> Result<GrantedReward> {
        let entry_id = format!("inv_{}", Uuid::new_v4());
        let target_id = match &preset.reward_target {
            RewardTarget::CatalogItem(id) => id.to_string(),
            RewardTarget::Category(id) => id.to_string(),
        };

        let entry = InventoryEntry {
            entry_id: entry_id.clone(),
            item_type: reward_item_type(preset.reward_category).to_string(),
            item_id: ItemRef::Id(target_id),
            details: None,
            quantity: Some(1),
        };

        let mut rewards = self.rewards.write().await;
        rewards.entry(user.clone()).or_default().push(entry);

        Ok(GrantedReward {
            id: RewardId::new(),
            user_id: user.clone(),
            preset_id: preset.id.clone(),
            category: preset.reward_category,
            target: preset.reward_target.clone(),
            inventory_entry_id: Some(entry_id),
            granted_at: Utc::now(),
        })
    }
}

#[async_trait]
impl ItemClaimer for InMemoryInventory {
    async fn claim_item(&self, user: &UserId, entry_id: &str) -> Result<()> {
        let mut rewards = self.rewards.write().await;
        let rows = rewards.get_mut(user).ok_or_else(|| {
            SkinforgeError::storage(format!("no claimable inventory for user {user}"))
        })?;
        let position = rows.iter().position(|e| e.entry_id == entry_id).ok_or_else(|| {
            SkinforgeError::storage(format!("inventory entry {entry_id} not claimable"))
        })?;
        rows.remove(position);
        Ok(())
    }
}
