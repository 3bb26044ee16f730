//! Grant, decrement, and exchange over the fragment ledger

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use skinforge_ledger::{LedgerJournal, LedgerStore, PresetStore};
use skinforge_types::{
    ExchangeOutcome, FragmentLedgerEntry, JournalEntry, JournalKind, PresetId, Result,
    SkinforgeError, UserId,
};

use crate::retry::RetryPolicy;
use crate::reward::RewardGranter;

/// Keyed mutex registry: one lock per (user, preset) ledger row.
///
/// The stores guarantee read-after-write consistency for a single entry but
/// nothing across a read-check-write sequence; holding the row lock for the
/// whole sequence is what makes grant/decrement/exchange atomic per row.
#[derive(Default)]
struct RowLocks {
    locks: DashMap<(UserId, PresetId), Arc<Mutex<()>>>,
}

impl RowLocks {
    fn lock_for(&self, user: &UserId, preset: &PresetId) -> Arc<Mutex<()>> {
        self.locks
            .entry((user.clone(), preset.clone()))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// The ledger operations service
pub struct LedgerOps {
    presets: Arc<dyn PresetStore>,
    ledger: Arc<dyn LedgerStore>,
    journal: Arc<dyn LedgerJournal>,
    rewards: Arc<dyn RewardGranter>,
    locks: RowLocks,
    retry: RetryPolicy,
}

impl LedgerOps {
    pub fn new(
        presets: Arc<dyn PresetStore>,
        ledger: Arc<dyn LedgerStore>,
        journal: Arc<dyn LedgerJournal>,
        rewards: Arc<dyn RewardGranter>,
    ) -> Self {
        Self {
            presets,
            ledger,
            journal,
            rewards,
            locks: RowLocks::default(),
            retry: RetryPolicy::default_reward(),
        }
    }

    /// Override the retry bound around the reward-grant step
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Accrue fragments toward a preset.
    ///
    /// Creates the ledger row lazily on the first positive grant. Repeated
    /// calls sharing a correlation id are NOT deduplicated; each applies.
    pub async fn grant(
        &self,
        user: &UserId,
        preset_id: &PresetId,
        amount: i64,
        correlation_id: Option<String>,
    ) -> Result<FragmentLedgerEntry> {
        if amount <= 0 {
            return Err(SkinforgeError::InvalidAmount { amount });
        }
        let amount = amount as u64;

        let preset = self
            .presets
            .get(preset_id)
            .await?
            .ok_or_else(|| SkinforgeError::PresetNotFound {
                preset_id: preset_id.to_string(),
            })?;
        if !preset.active {
            // Soft-deleted presets accept no new accrual
            return Err(SkinforgeError::PresetInactive {
                preset_id: preset_id.to_string(),
            });
        }

        let lock = self.locks.lock_for(user, preset_id);
        let _guard = lock.lock().await;

        let entry = match self.ledger.get(user, preset_id).await? {
            None => FragmentLedgerEntry::new(
                user.clone(),
                preset_id.clone(),
                amount,
                correlation_id.clone(),
            ),
            Some(mut entry) => {
                entry.balance = entry
                    .balance
                    .checked_add(amount)
                    .ok_or(SkinforgeError::BalanceOverflow)?;
                entry.updated_at = Utc::now();
                entry
            }
        };

        self.ledger.upsert(entry.clone()).await?;
        self.journal
            .append(JournalEntry::new(
                user.clone(),
                preset_id.clone(),
                JournalKind::Grant,
                amount,
                entry.balance,
                correlation_id,
            ))
            .await?;

        info!(
            user = %user,
            preset = %preset_id,
            amount,
            balance = entry.balance,
            "Fragments granted"
        );
        Ok(entry)
    }

    /// Reduce a balance, clamping at zero.
    ///
    /// Requires an existing row; a negative adjustment never creates one.
    /// When `amount` exceeds the balance the result is 0, not an error,
    /// and the excess is discarded. Callers that need exact bookkeeping
    /// must check the balance first.
    pub async fn decrement(
        &self,
        user: &UserId,
        preset_id: &PresetId,
        amount: i64,
    ) -> Result<FragmentLedgerEntry> {
        if amount <= 0 {
            return Err(SkinforgeError::InvalidAmount { amount });
        }
        let amount = amount as u64;

        let lock = self.locks.lock_for(user, preset_id);
        let _guard = lock.lock().await;

        let mut entry = self.ledger.get(user, preset_id).await?.ok_or_else(|| {
            SkinforgeError::LedgerEntryNotFound {
                user_id: user.to_string(),
                preset_id: preset_id.to_string(),
            }
        })?;

        let applied = entry.balance.min(amount);
        if applied < amount {
            warn!(
                user = %user,
                preset = %preset_id,
                requested = amount,
                applied,
                "Decrement clamped at zero"
            );
        }
        entry.balance -= applied;
        entry.updated_at = Utc::now();

        self.ledger.upsert(entry.clone()).await?;
        self.journal
            .append(JournalEntry::new(
                user.clone(),
                preset_id.clone(),
                JournalKind::Decrement,
                applied,
                entry.balance,
                None,
            ))
            .await?;

        Ok(entry)
    }

    /// Exchange a full threshold of fragments for the preset's reward.
    ///
    /// The threshold check and deduction are atomic per row. Inactive
    /// presets remain redeemable; already-held balances stay valid after a
    /// soft delete.
    pub async fn exchange(&self, user: &UserId, preset_id: &PresetId) -> Result<ExchangeOutcome> {
        let preset = self
            .presets
            .get(preset_id)
            .await?
            .ok_or_else(|| SkinforgeError::PresetNotFound {
                preset_id: preset_id.to_string(),
            })?;
        let required = preset.required_quantity;
        let correlation_id = format!("exchange_{}", Uuid::new_v4());

        let remaining = {
            let lock = self.locks.lock_for(user, preset_id);
            let _guard = lock.lock().await;

            let mut entry = match self.ledger.get(user, preset_id).await? {
                Some(entry) => entry,
                None => {
                    return Err(SkinforgeError::InsufficientFragments {
                        have: 0,
                        need: required,
                    })
                }
            };
            if entry.balance < required {
                return Err(SkinforgeError::InsufficientFragments {
                    have: entry.balance,
                    need: required,
                });
            }

            // Sufficiency was just verified under the lock; this deduction
            // is exact, never clamped
            entry.balance -= required;
            entry.updated_at = Utc::now();

            self.ledger.upsert(entry.clone()).await?;
            self.journal
                .append(JournalEntry::new(
                    user.clone(),
                    preset_id.clone(),
                    JournalKind::ExchangeDebit,
                    required,
                    entry.balance,
                    Some(correlation_id.clone()),
                ))
                .await?;
            entry.balance
        };

        // The reward grant is a separate transactional boundary: the
        // deduction above has committed, so a final reward failure must be
        // compensated below
        let reward = self
            .retry
            .retry_async(|_attempt| {
                let rewards = self.rewards.clone();
                let user = user.clone();
                let preset = preset.clone();
                let correlation_id = correlation_id.clone();
                async move { rewards.grant_reward(&user, &preset, &correlation_id).await }
            })
            .await;

        match reward {
            Ok(reward) => {
                info!(
                    user = %user,
                    preset = %preset_id,
                    reward = %reward.id,
                    remaining,
                    "Exchange complete"
                );
                Ok(ExchangeOutcome {
                    reward,
                    remaining_balance: remaining,
                })
            }
            Err(err) => {
                self.compensate(user, preset_id, required, &correlation_id)
                    .await?;
                warn!(
                    user = %user,
                    preset = %preset_id,
                    error = %err,
                    "Reward grant failed; ledger re-credited"
                );
                Err(SkinforgeError::RewardGrantFailed {
                    preset_id: preset_id.to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Re-credit a committed deduction after the reward grant failed
    async fn compensate(
        &self,
        user: &UserId,
        preset_id: &PresetId,
        amount: u64,
        correlation_id: &str,
    ) -> Result<()> {
        let lock = self.locks.lock_for(user, preset_id);
        let _guard = lock.lock().await;

        let mut entry = self.ledger.get(user, preset_id).await?.ok_or_else(|| {
            SkinforgeError::storage("ledger row vanished between deduction and compensation")
        })?;
        entry.balance = entry
            .balance
            .checked_add(amount)
            .ok_or(SkinforgeError::BalanceOverflow)?;
        entry.updated_at = Utc::now();

        self.ledger.upsert(entry.clone()).await?;
        self.journal
            .append(JournalEntry::new(
                user.clone(),
                preset_id.clone(),
                JournalKind::Compensation,
                amount,
                entry.balance,
                Some(correlation_id.to_string()),
            ))
            .await?;
        Ok(())
    }
}
