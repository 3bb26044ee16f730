//! Claim flows over the operations service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use skinforge_inventory::FragmentGroup;
use skinforge_redeem::LedgerOps;
use skinforge_types::{ExchangeOutcome, Result, RewardCategory, SkinforgeError, UserId};

/// Claims an ordinary (non-fragment) inventory item
#[async_trait]
pub trait ItemClaimer: Send + Sync {
    async fn claim_item(&self, user: &UserId, entry_id: &str) -> Result<()>;
}

/// One element of a batch claim
#[derive(Debug, Clone)]
pub enum Selection {
    Fragments(FragmentGroup),
    Item { entry_id: String },
}

/// What one selection produced
#[derive(Debug, Clone)]
pub enum ClaimResult {
    Exchanged(ExchangeOutcome),
    ItemClaimed { entry_id: String },
}

/// A selection that failed, with the selection's label for the surface
#[derive(Debug, Clone)]
pub struct ClaimFailure {
    pub label: String,
    pub error: SkinforgeError,
}

/// Result of a batch claim; failures are collected, not short-circuited
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub completed: Vec<ClaimResult>,
    pub failed: Vec<ClaimFailure>,
}

/// Drives single and batch claims
pub struct ClaimOrchestrator {
    ops: Arc<LedgerOps>,
    items: Arc<dyn ItemClaimer>,
}

impl ClaimOrchestrator {
    pub fn new(ops: Arc<LedgerOps>, items: Arc<dyn ItemClaimer>) -> Self {
        Self { ops, items }
    }

    /// Whether a group can enter a batch selection: it must hold a full
    /// threshold, and coupon fragments are claimed elsewhere
    pub fn is_selectable(group: &FragmentGroup) -> bool {
        group.is_complete() && group.reward_category != Some(RewardCategory::Coupon)
    }

    /// Filter a listing down to batch-selectable groups
    pub fn selectable_groups(groups: &[FragmentGroup]) -> Vec<&FragmentGroup> {
        groups.iter().filter(|g| Self::is_selectable(g)).collect()
    }

    /// Claim one fragment group, exchanging immediately on selection.
    ///
    /// An incomplete group is rejected with how many fragments are still
    /// missing. A group whose threshold the snapshot does not carry is
    /// passed through; `exchange` holds the authoritative check.
    pub async fn claim_single(
        &self,
        user: &UserId,
        group: &FragmentGroup,
    ) -> Result<ExchangeOutcome> {
        if let Some(need) = group.required_quantity {
            if group.total_quantity < need {
                return Err(SkinforgeError::InsufficientFragments {
                    have: group.total_quantity,
                    need,
                });
            }
        }
        self.ops.exchange(user, &group.preset_id).await
    }

    /// Claim several selections in one action.
    ///
    /// When every selection is a fragment group, the batch collapses to a
    /// single exchange on the first selected group and the rest are
    /// dropped.
    pub async fn claim_batch(&self, user: &UserId, selections: &[Selection]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        if selections.is_empty() {
            return outcome;
        }

        let all_fragments = selections
            .iter()
            .all(|s| matches!(s, Selection::Fragments(_)));
        if all_fragments {
            if let Selection::Fragments(first) = &selections[0] {
                info!(
                    user = %user,
                    selected = selections.len(),
                    preset = %first.preset_id,
                    "Fragments-only batch, exchanging first selection"
                );
                match self.claim_single(user, first).await {
                    Ok(exchanged) => outcome.completed.push(ClaimResult::Exchanged(exchanged)),
                    Err(error) => outcome.failed.push(ClaimFailure {
                        label: first.preset_id.to_string(),
                        error,
                    }),
                }
            }
            return outcome;
        }

        for selection in selections {
            match selection {
                Selection::Fragments(group) => match self.claim_single(user, group).await {
                    Ok(exchanged) => outcome.completed.push(ClaimResult::Exchanged(exchanged)),
                    Err(error) => outcome.failed.push(ClaimFailure {
                        label: group.preset_id.to_string(),
                        error,
                    }),
                },
                Selection::Item { entry_id } => {
                    match self.items.claim_item(user, entry_id).await {
                        Ok(()) => outcome.completed.push(ClaimResult::ItemClaimed {
                            entry_id: entry_id.clone(),
                        }),
                        Err(error) => outcome.failed.push(ClaimFailure {
                            label: entry_id.clone(),
                            error,
                        }),
                    }
                }
            }
        }
        outcome
    }
}
