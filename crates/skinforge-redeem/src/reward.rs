//! Reward-grant collaborator seam
//!
//! Exchanging a full threshold pays out through this trait. The
//! implementation lives outside the engine (it writes the user's
//! inventory); the engine only consumes its output.

use async_trait::async_trait;
use skinforge_types::{FragmentPreset, GrantedReward, Result, UserId};

/// Creates the inventory entry a redeemed preset pays out
#[async_trait]
pub trait RewardGranter: Send + Sync {
    /// Grant the preset's reward to the user.
    ///
    /// Called after the ledger deduction has committed. May be retried;
    /// `correlation_id` identifies the exchange so an implementation that
    /// tracks it can deduplicate redelivery.
    async fn grant_reward(
        &self,
        user: &UserId,
        preset: &FragmentPreset,
        correlation_id: &str,
    ) -> Result<GrantedReward>;
}
