//! Fragment ledger types
//!
//! A ledger entry is the durable per-(user, preset) fragment balance. At
//! most one entry exists per pair; entries are created lazily on the first
//! positive grant and persist at balance 0 to retain audit history.
//!
//! Every balance mutation also appends a journal entry with the balance
//! after the write, so the full accrual/redemption history of a user can be
//! reconstructed.

use crate::{JournalEntryId, LedgerEntryId, PresetId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The per-user, per-preset durable fragment balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentLedgerEntry {
    pub id: LedgerEntryId,
    pub preset_id: PresetId,
    pub user_id: UserId,
    /// Non-negative by construction; no operation underflows it
    pub balance: u64,
    /// Mirrors preset visibility; does not affect balance semantics
    pub active: bool,
    /// Audit tag of the originating grant event (purchase, lootbox draw)
    pub correlation_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FragmentLedgerEntry {
    /// Create a fresh entry from a first grant
    pub fn new(
        user_id: UserId,
        preset_id: PresetId,
        balance: u64,
        correlation_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: LedgerEntryId::new(),
            preset_id,
            user_id,
            balance,
            active: true,
            correlation_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// What kind of mutation a journal entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JournalKind {
    /// Positive accrual
    Grant,
    /// Administrative decrement (clamped at zero)
    Decrement,
    /// Threshold deduction of an exchange
    ExchangeDebit,
    /// Re-credit after a failed reward grant
    Compensation,
}

/// One append-only record of a ledger mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: JournalEntryId,
    pub user_id: UserId,
    pub preset_id: PresetId,
    pub kind: JournalKind,
    /// The delta actually applied (a clamped decrement records the
    /// applied portion, not the requested one)
    pub amount: u64,
    pub balance_after: u64,
    pub correlation_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(
        user_id: UserId,
        preset_id: PresetId,
        kind: JournalKind,
        amount: u64,
        balance_after: u64,
        correlation_id: Option<String>,
    ) -> Self {
        Self {
            id: JournalEntryId::new(),
            user_id,
            preset_id,
            kind,
            amount,
            balance_after,
            correlation_id,
            created_at: Utc::now(),
        }
    }
}
