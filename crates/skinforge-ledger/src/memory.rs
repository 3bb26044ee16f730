//! In-memory store implementations
//!
//! Thread-safe and designed for concurrent access. These back the server
//! binary and every test; a database-backed implementation would slot in
//! behind the same traits.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use skinforge_types::{
    FragmentLedgerEntry, FragmentPreset, JournalEntry, PresetId, Result, SkinforgeError, UserId,
};

use crate::{LedgerJournal, LedgerStore, PresetStore};

/// In-memory preset store
#[derive(Clone, Default)]
pub struct InMemoryPresetStore {
    presets: Arc<RwLock<HashMap<PresetId, FragmentPreset>>>,
}

impl InMemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresetStore for InMemoryPresetStore {
    async fn get(&self, id: &PresetId) -> Result<Option<FragmentPreset>> {
        let presets = self.presets.read().await;
        Ok(presets.get(id).cloned())
    }

    async fn put(&self, preset: FragmentPreset) -> Result<()> {
        let mut presets = self.presets.write().await;
        presets.insert(preset.id.clone(), preset);
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<FragmentPreset>> {
        let presets = self.presets.read().await;
        Ok(presets.values().filter(|p| p.active).cloned().collect())
    }

    async fn deactivate(&self, id: &PresetId) -> Result<FragmentPreset> {
        let mut presets = self.presets.write().await;
        let preset = presets
            .get_mut(id)
            .ok_or_else(|| SkinforgeError::PresetNotFound {
                preset_id: id.to_string(),
            })?;
        preset.deactivate();
        Ok(preset.clone())
    }
}

/// In-memory balance ledger keyed by (user, preset)
#[derive(Clone, Default)]
pub struct InMemoryLedgerStore {
    entries: Arc<RwLock<HashMap<(UserId, PresetId), FragmentLedgerEntry>>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn get(&self, user: &UserId, preset: &PresetId) -> Result<Option<FragmentLedgerEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&(user.clone(), preset.clone())).cloned())
    }

    async fn upsert(&self, entry: FragmentLedgerEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert((entry.user_id.clone(), entry.preset_id.clone()), entry);
        Ok(())
    }

    async fn entries_for_user(&self, user: &UserId) -> Result<Vec<FragmentLedgerEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .values()
            .filter(|e| &e.user_id == user)
            .cloned()
            .collect())
    }
}

/// In-memory append-only journal
#[derive(Clone, Default)]
pub struct InMemoryJournal {
    entries: Arc<RwLock<Vec<JournalEntry>>>,
}

impl InMemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerJournal for InMemoryJournal {
    async fn append(&self, entry: JournalEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }

    async fn entries_for_user(&self, user: &UserId) -> Result<Vec<JournalEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| &e.user_id == user)
            .cloned()
            .collect())
    }

    async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skinforge_types::{CatalogItemId, JournalKind, PresetKind, RewardCategory, RewardTarget};

    fn test_preset() -> FragmentPreset {
        FragmentPreset::new(
            "Star Guardian Jinx",
            PresetKind::Specific,
            RewardTarget::CatalogItem(CatalogItemId::new()),
            RewardCategory::Skin,
            5,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_preset_read_after_write() {
        let store = InMemoryPresetStore::new();
        let preset = test_preset();
        let id = preset.id.clone();

        store.put(preset.clone()).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), Some(preset));
    }

    #[tokio::test]
    async fn test_deactivated_preset_excluded_from_listing() {
        let store = InMemoryPresetStore::new();
        let preset = test_preset();
        let id = preset.id.clone();
        store.put(preset).await.unwrap();
        store.put(test_preset()).await.unwrap();

        assert_eq!(store.list_active().await.unwrap().len(), 2);

        let deactivated = store.deactivate(&id).await.unwrap();
        assert!(!deactivated.active);

        let active = store.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        // Still fetchable by id for already-held balances
        assert!(store.get(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_deactivate_missing_preset() {
        let store = InMemoryPresetStore::new();
        let result = store.deactivate(&PresetId::new()).await;
        assert!(matches!(
            result,
            Err(SkinforgeError::PresetNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_upsert_never_duplicates_a_pair() {
        let store = InMemoryLedgerStore::new();
        let user = UserId::new();
        let preset = PresetId::new();

        let first = FragmentLedgerEntry::new(user.clone(), preset.clone(), 2, None);
        store.upsert(first.clone()).await.unwrap();

        let mut second = first.clone();
        second.balance = 5;
        store.upsert(second).await.unwrap();

        let entries = store.entries_for_user(&user).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].balance, 5);
        assert_eq!(
            store.get(&user, &preset).await.unwrap().map(|e| e.balance),
            Some(5)
        );
    }

    #[tokio::test]
    async fn test_entries_scoped_to_user() {
        let store = InMemoryLedgerStore::new();
        let user_a = UserId::new();
        let user_b = UserId::new();

        store
            .upsert(FragmentLedgerEntry::new(user_a.clone(), PresetId::new(), 1, None))
            .await
            .unwrap();
        store
            .upsert(FragmentLedgerEntry::new(user_b.clone(), PresetId::new(), 1, None))
            .await
            .unwrap();

        assert_eq!(store.entries_for_user(&user_a).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_journal_append() {
        let journal = InMemoryJournal::new();
        let user = UserId::new();
        let preset = PresetId::new();

        journal
            .append(JournalEntry::new(
                user.clone(),
                preset.clone(),
                JournalKind::Grant,
                3,
                3,
                Some("purchase_1".to_string()),
            ))
            .await
            .unwrap();
        journal
            .append(JournalEntry::new(
                user.clone(),
                preset,
                JournalKind::Decrement,
                1,
                2,
                None,
            ))
            .await
            .unwrap();

        let entries = journal.entries_for_user(&user).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, JournalKind::Grant);
        assert_eq!(entries[1].balance_after, 2);
        assert_eq!(journal.entry_count().await, 2);
    }
}
