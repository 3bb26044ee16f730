//! Reward types
//!
//! The reward-grant collaborator turns a redeemed preset into a new
//! inventory entry. Its internal mechanics live outside the engine; these
//! types carry its output back through the exchange path.

use crate::{PresetId, RewardCategory, RewardId, RewardTarget, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The payout of one exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantedReward {
    pub id: RewardId,
    pub user_id: UserId,
    pub preset_id: PresetId,
    pub category: RewardCategory,
    pub target: RewardTarget,
    /// Inventory entry the collaborator created, when it reports one
    pub inventory_entry_id: Option<String>,
    pub granted_at: DateTime<Utc>,
}

/// Result of a successful exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeOutcome {
    pub reward: GrantedReward,
    /// Ledger balance left after the threshold deduction
    pub remaining_balance: u64,
}
