//! Reward reveal sequencing
//!
//! Presentation of a freshly granted reward runs through a small state
//! machine: `Pending` until the surface starts the reveal, `Revealing`
//! while the celebratory feedback plays, `Revealed` once the final reward
//! is shown. `Revealed` is terminal; presenting a new reward resets the
//! machine to `Pending`.

use skinforge_types::GrantedReward;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Pending,
    Revealing,
    Revealed,
}

/// Reveal state for the reward currently being presented
#[derive(Debug, Clone, Default)]
pub struct RewardReveal {
    phase: Option<RevealPhase>,
    reward: Option<GrantedReward>,
}

impl RewardReveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present a new reward, resetting the sequence to `Pending`
    pub fn present(&mut self, reward: GrantedReward) {
        debug!(reward = %reward.id, "Presenting reward");
        self.reward = Some(reward);
        self.phase = Some(RevealPhase::Pending);
    }

    /// Step the sequence forward; `Revealed` is terminal.
    ///
    /// The `Pending -> Revealing` transition is the hook for celebratory
    /// feedback on the surface.
    pub fn advance(&mut self) -> Option<RevealPhase> {
        let next = match self.phase? {
            RevealPhase::Pending => RevealPhase::Revealing,
            RevealPhase::Revealing => RevealPhase::Revealed,
            RevealPhase::Revealed => RevealPhase::Revealed,
        };
        self.phase = Some(next);
        Some(next)
    }

    pub fn phase(&self) -> Option<RevealPhase> {
        self.phase
    }

    pub fn reward(&self) -> Option<&GrantedReward> {
        self.reward.as_ref()
    }
}
