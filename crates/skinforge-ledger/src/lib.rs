//! Skinforge Ledger - Preset store and fragment balance ledger
//!
//! The ledger is:
//! - Keyed by (user, preset) with at most one entry per pair
//! - Upsert-only (stores never duplicate a pair)
//! - Journal-linked (every mutation appends an audit record)
//!
//! # Invariants
//!
//! 1. No negative balances
//! 2. At most one ledger entry per (user, preset) pair
//! 3. Read-after-write consistency for a single entry
//!
//! The stores make no cross-entry atomicity guarantee. Serializing a
//! read-check-write sequence on one row is the operations layer's job;
//! see `skinforge-redeem`.

pub mod memory;

use async_trait::async_trait;
use skinforge_types::{
    FragmentLedgerEntry, FragmentPreset, JournalEntry, PresetId, Result, UserId,
};

pub use memory::{InMemoryJournal, InMemoryLedgerStore, InMemoryPresetStore};

/// Redemption-rule storage. Read-mostly, soft-deletable.
#[async_trait]
pub trait PresetStore: Send + Sync {
    /// Fetch a preset by id, active or not
    async fn get(&self, id: &PresetId) -> Result<Option<FragmentPreset>>;

    /// Create or replace a preset
    async fn put(&self, preset: FragmentPreset) -> Result<()>;

    /// List presets still open for accrual
    async fn list_active(&self) -> Result<Vec<FragmentPreset>>;

    /// Soft-delete; existing ledger rows remain valid
    async fn deactivate(&self, id: &PresetId) -> Result<FragmentPreset>;
}

/// Balance storage, one row per (user, preset) pair
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get(&self, user: &UserId, preset: &PresetId) -> Result<Option<FragmentLedgerEntry>>;

    /// Insert or replace the row for the entry's (user, preset) pair
    async fn upsert(&self, entry: FragmentLedgerEntry) -> Result<()>;

    async fn entries_for_user(&self, user: &UserId) -> Result<Vec<FragmentLedgerEntry>>;
}

/// Append-only record of every balance mutation
#[async_trait]
pub trait LedgerJournal: Send + Sync {
    async fn append(&self, entry: JournalEntry) -> Result<()>;

    async fn entries_for_user(&self, user: &UserId) -> Result<Vec<JournalEntry>>;

    /// Total number of journal entries
    async fn entry_count(&self) -> usize;
}
