//! HTTP handlers for the fragment engine

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skinforge_claim::{ClaimResult, Selection};
use skinforge_inventory::{aggregate_fragments, FragmentGroup, InventoryReader, PresetLookup};
use skinforge_ledger::{LedgerJournal, PresetStore};
use skinforge_types::{
    ExchangeOutcome, FragmentLedgerEntry, FragmentPreset, JournalEntry, JournalKind, PresetId,
    PresetKind, RewardCategory, RewardTarget, SkinforgeError, UserId,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn parse_user(raw: &str) -> ApiResult<UserId> {
    UserId::parse(raw).map_err(|_| ApiError::InvalidParameter(format!("userId: {raw}")))
}

fn parse_preset(raw: &str) -> ApiResult<PresetId> {
    PresetId::parse(raw).map_err(|_| ApiError::InvalidParameter(format!("presetId: {raw}")))
}

// =============================================================================
// Health
// =============================================================================

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// =============================================================================
// Preset administration
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePresetRequest {
    pub name: String,
    pub kind: PresetKind,
    pub reward_target: RewardTarget,
    pub reward_category: RewardCategory,
    pub required_quantity: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePresetRequest {
    pub name: Option<String>,
    pub required_quantity: Option<u64>,
}

pub async fn list_presets(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<FragmentPreset>>> {
    let presets = state.presets.list_active().await?;
    Ok(Json(presets))
}

pub async fn create_preset(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePresetRequest>,
) -> ApiResult<Json<FragmentPreset>> {
    let preset = FragmentPreset::new(
        req.name,
        req.kind,
        req.reward_target,
        req.reward_category,
        req.required_quantity,
    )?;
    state.presets.put(preset.clone()).await?;
    Ok(Json(preset))
}

pub async fn update_preset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePresetRequest>,
) -> ApiResult<Json<FragmentPreset>> {
    let preset_id = parse_preset(&id)?;
    let mut preset = state
        .presets
        .get(&preset_id)
        .await?
        .ok_or(SkinforgeError::PresetNotFound {
            preset_id: preset_id.to_string(),
        })?;

    if let Some(name) = req.name {
        preset.name = name;
    }
    if let Some(required_quantity) = req.required_quantity {
        preset.set_required_quantity(required_quantity)?;
    }
    state.presets.put(preset.clone()).await?;
    Ok(Json(preset))
}

pub async fn delete_preset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<FragmentPreset>> {
    let preset_id = parse_preset(&id)?;
    let preset = state.presets.deactivate(&preset_id).await?;
    Ok(Json(preset))
}

// =============================================================================
// Ledger mutation
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRequest {
    pub user_id: String,
    pub preset_id: String,
    pub amount: i64,
    pub correlation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecrementRequest {
    pub user_id: String,
    pub preset_id: String,
    pub amount: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryView {
    pub entry_id: String,
    pub user_id: String,
    pub preset_id: String,
    pub balance: u64,
    pub correlation_id: Option<String>,
}

impl From<FragmentLedgerEntry> for LedgerEntryView {
    fn from(entry: FragmentLedgerEntry) -> Self {
        Self {
            entry_id: entry.id.to_string(),
            user_id: entry.user_id.to_string(),
            preset_id: entry.preset_id.to_string(),
            balance: entry.balance,
            correlation_id: entry.correlation_id,
        }
    }
}

pub async fn grant(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GrantRequest>,
) -> ApiResult<Json<LedgerEntryView>> {
    let user = parse_user(&req.user_id)?;
    let preset = parse_preset(&req.preset_id)?;
    let entry = state
        .ops
        .grant(&user, &preset, req.amount, req.correlation_id)
        .await?;
    Ok(Json(entry.into()))
}

pub async fn decrement(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DecrementRequest>,
) -> ApiResult<Json<LedgerEntryView>> {
    let user = parse_user(&req.user_id)?;
    let preset = parse_preset(&req.preset_id)?;
    let entry = state.ops.decrement(&user, &preset, req.amount).await?;
    Ok(Json(entry.into()))
}

// =============================================================================
// Exchange
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    pub user_id: String,
    pub preset_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeView {
    pub reward_id: String,
    pub reward_category: RewardCategory,
    pub inventory_entry_id: Option<String>,
    pub remaining_balance: u64,
}

impl From<ExchangeOutcome> for ExchangeView {
    fn from(outcome: ExchangeOutcome) -> Self {
        Self {
            reward_id: outcome.reward.id.to_string(),
            reward_category: outcome.reward.category,
            inventory_entry_id: outcome.reward.inventory_entry_id,
            remaining_balance: outcome.remaining_balance,
        }
    }
}

pub async fn exchange(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExchangeRequest>,
) -> ApiResult<Json<ExchangeView>> {
    let user = parse_user(&req.user_id)?;
    let preset = parse_preset(&req.preset_id)?;
    let outcome = state.ops.exchange(&user, &preset).await?;
    Ok(Json(outcome.into()))
}

// =============================================================================
// Ledger journal
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryView {
    pub preset_id: String,
    pub kind: JournalKind,
    pub amount: u64,
    pub balance_after: u64,
    pub correlation_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<JournalEntry> for JournalEntryView {
    fn from(entry: JournalEntry) -> Self {
        Self {
            preset_id: entry.preset_id.to_string(),
            kind: entry.kind,
            amount: entry.amount,
            balance_after: entry.balance_after,
            correlation_id: entry.correlation_id,
            created_at: entry.created_at,
        }
    }
}

/// Audit history of a user's balance mutations, oldest first
pub async fn get_journal(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<JournalEntryView>>> {
    let user = parse_user(&user_id)?;
    let entries = state.journal.entries_for_user(&user).await?;
    Ok(Json(entries.into_iter().map(JournalEntryView::from).collect()))
}

// =============================================================================
// Aggregated fragment view
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentsView {
    pub groups: Vec<GroupView>,
    pub excluded: Vec<ExcludedView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub preset_id: String,
    pub name: Option<String>,
    pub total_quantity: u64,
    pub required_quantity: Option<u64>,
    pub reward_category: Option<RewardCategory>,
    pub complete: bool,
    pub fragments_missing: u64,
}

impl From<&FragmentGroup> for GroupView {
    fn from(group: &FragmentGroup) -> Self {
        Self {
            preset_id: group.preset_id.to_string(),
            name: group.name.clone(),
            total_quantity: group.total_quantity,
            required_quantity: group.required_quantity,
            reward_category: group.reward_category,
            complete: group.is_complete(),
            fragments_missing: group.fragments_missing(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedView {
    pub entry_id: String,
    pub code: &'static str,
}

/// Snapshot a user's fragment progress: inventory read, resolution,
/// aggregation, then a request-scoped backfill of missing display fields
async fn fragment_groups(
    state: &AppState,
    user: &UserId,
) -> ApiResult<(Vec<FragmentGroup>, Vec<ExcludedView>)> {
    let entries = state.inventory.entries_for_user(user).await?;
    let outcome = aggregate_fragments(&entries);

    let mut groups = outcome.groups;
    let mut lookup = PresetLookup::new(state.presets.clone());
    for group in &mut groups {
        lookup.backfill(group).await?;
    }

    let excluded = outcome
        .excluded
        .into_iter()
        .map(|e| ExcludedView {
            entry_id: e.entry_id,
            code: e.error.error_code(),
        })
        .collect();
    Ok((groups, excluded))
}

pub async fn get_fragments(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<FragmentsView>> {
    let user = parse_user(&user_id)?;
    let (groups, excluded) = fragment_groups(&state, &user).await?;
    Ok(Json(FragmentsView {
        groups: groups.iter().map(GroupView::from).collect(),
        excluded,
    }))
}

// =============================================================================
// Batch claim
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchClaimRequest {
    pub user_id: String,
    /// Completed fragment groups selected for redemption
    #[serde(default)]
    pub preset_ids: Vec<String>,
    /// Ordinary claimable items selected alongside
    #[serde(default)]
    pub entry_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum ClaimResultView {
    Exchanged {
        preset_id: String,
        reward_id: String,
        remaining_balance: u64,
    },
    ItemClaimed {
        entry_id: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimFailureView {
    pub label: String,
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchClaimResponse {
    pub completed: Vec<ClaimResultView>,
    pub failed: Vec<ClaimFailureView>,
}

pub async fn batch_claim(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchClaimRequest>,
) -> ApiResult<Json<BatchClaimResponse>> {
    let user = parse_user(&req.user_id)?;
    let (groups, _) = fragment_groups(&state, &user).await?;

    let mut selections = Vec::new();
    for raw in &req.preset_ids {
        let preset_id = parse_preset(raw)?;
        // A selection with no aggregated rows still routes through
        // exchange, which holds the authoritative balance check
        let group = groups
            .iter()
            .find(|g| g.preset_id == preset_id)
            .cloned()
            .unwrap_or(FragmentGroup {
                preset_id,
                total_quantity: 0,
                required_quantity: None,
                name: None,
                reward_category: None,
                entry_ids: vec![],
            });
        selections.push(Selection::Fragments(group));
    }
    for entry_id in &req.entry_ids {
        selections.push(Selection::Item {
            entry_id: entry_id.clone(),
        });
    }

    let outcome = state.orchestrator.claim_batch(&user, &selections).await;

    let completed = outcome
        .completed
        .into_iter()
        .map(|result| match result {
            ClaimResult::Exchanged(exchanged) => ClaimResultView::Exchanged {
                preset_id: exchanged.reward.preset_id.to_string(),
                reward_id: exchanged.reward.id.to_string(),
                remaining_balance: exchanged.remaining_balance,
            },
            ClaimResult::ItemClaimed { entry_id } => ClaimResultView::ItemClaimed { entry_id },
        })
        .collect();
    let failed = outcome
        .failed
        .into_iter()
        .map(|failure| ClaimFailureView {
            label: failure.label,
            code: failure.error.error_code(),
            message: failure.error.to_string(),
        })
        .collect();

    Ok(Json(BatchClaimResponse { completed, failed }))
}
