//! Fragment preset types
//!
//! A preset is the redemption rule for one fragment line: how many
//! fragments a user must collect and what a full set exchanges into.
//! Presets are read-mostly and soft-deletable; deactivating one stops new
//! accrual and listing but leaves already-held balances valid.

use crate::{CatalogItemId, CategoryId, PresetId, Result, SkinforgeError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a preset's reward is targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresetKind {
    /// Reward is one concrete catalog entry
    Specific,
    /// Reward is drawn from a class of entries (e.g. a price tier)
    ByCategory,
}

impl PresetKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Specific => "Specific",
            Self::ByCategory => "By Category",
        }
    }
}

/// The reward reference a preset resolves to on exchange
///
/// Exactly one reference is populated; the enum makes any other state
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardTarget {
    /// A concrete catalog entry (requires `PresetKind::Specific`)
    CatalogItem(CatalogItemId),
    /// A reward class such as a price tier (requires `PresetKind::ByCategory`)
    Category(CategoryId),
}

impl RewardTarget {
    /// Whether this target is valid for the given preset kind
    pub fn matches_kind(&self, kind: PresetKind) -> bool {
        matches!(
            (self, kind),
            (Self::CatalogItem(_), PresetKind::Specific)
                | (Self::Category(_), PresetKind::ByCategory)
        )
    }
}

/// Enumerated reward domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardCategory {
    Skin,
    Chroma,
    LootBox,
    Icon,
    Bundle,
    Coupon,
    Gold,
    Item,
}

impl RewardCategory {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Skin => "Skin",
            Self::Chroma => "Chroma",
            Self::LootBox => "Loot Box",
            Self::Icon => "Icon",
            Self::Bundle => "Bundle",
            Self::Coupon => "Coupon",
            Self::Gold => "Gold",
            Self::Item => "Item",
        }
    }
}

/// A fragment redemption rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentPreset {
    pub id: PresetId,
    /// Display label
    pub name: String,
    pub kind: PresetKind,
    pub reward_target: RewardTarget,
    pub reward_category: RewardCategory,
    /// Fragments required for one exchange; strictly positive
    pub required_quantity: u64,
    /// `false` means soft-deleted
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FragmentPreset {
    /// Create a new preset, validating the threshold and the
    /// kind/target agreement
    pub fn new(
        name: impl Into<String>,
        kind: PresetKind,
        reward_target: RewardTarget,
        reward_category: RewardCategory,
        required_quantity: u64,
    ) -> Result<Self> {
        if required_quantity == 0 {
            return Err(SkinforgeError::InvalidRequiredQuantity {
                quantity: required_quantity,
            });
        }
        if !reward_target.matches_kind(kind) {
            return Err(SkinforgeError::PresetKindMismatch {
                kind: kind.display_name().to_string(),
            });
        }

        let now = Utc::now();
        Ok(Self {
            id: PresetId::new(),
            name: name.into(),
            kind,
            reward_target,
            reward_category,
            required_quantity,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Update the threshold in place; affects future completion checks only
    pub fn set_required_quantity(&mut self, required_quantity: u64) -> Result<()> {
        if required_quantity == 0 {
            return Err(SkinforgeError::InvalidRequiredQuantity {
                quantity: required_quantity,
            });
        }
        self.required_quantity = required_quantity;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Retarget the reward, validating kind agreement
    pub fn set_reward_target(&mut self, kind: PresetKind, target: RewardTarget) -> Result<()> {
        if !target.matches_kind(kind) {
            return Err(SkinforgeError::PresetKindMismatch {
                kind: kind.display_name().to_string(),
            });
        }
        self.kind = kind;
        self.reward_target = target;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Soft-delete: excluded from new accrual and listing, balances stay valid
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specific_preset(required: u64) -> Result<FragmentPreset> {
        FragmentPreset::new(
            "Battle Academia Ezreal",
            PresetKind::Specific,
            RewardTarget::CatalogItem(CatalogItemId::new()),
            RewardCategory::Skin,
            required,
        )
    }

    #[test]
    fn test_preset_creation() {
        let preset = specific_preset(5).unwrap();
        assert!(preset.active);
        assert_eq!(preset.required_quantity, 5);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let result = specific_preset(0);
        assert!(matches!(
            result,
            Err(SkinforgeError::InvalidRequiredQuantity { quantity: 0 })
        ));
    }

    #[test]
    fn test_kind_target_mismatch_rejected() {
        let result = FragmentPreset::new(
            "Epic tier fragment",
            PresetKind::Specific,
            RewardTarget::Category(CategoryId::new()),
            RewardCategory::Skin,
            3,
        );
        assert!(matches!(
            result,
            Err(SkinforgeError::PresetKindMismatch { .. })
        ));
    }

    #[test]
    fn test_by_category_target() {
        let preset = FragmentPreset::new(
            "Epic tier fragment",
            PresetKind::ByCategory,
            RewardTarget::Category(CategoryId::new()),
            RewardCategory::Skin,
            3,
        )
        .unwrap();
        assert!(preset.reward_target.matches_kind(PresetKind::ByCategory));
    }

    #[test]
    fn test_deactivate() {
        let mut preset = specific_preset(5).unwrap();
        preset.deactivate();
        assert!(!preset.active);
    }

    #[test]
    fn test_threshold_update() {
        let mut preset = specific_preset(5).unwrap();
        preset.set_required_quantity(7).unwrap();
        assert_eq!(preset.required_quantity, 7);
        assert!(preset.set_required_quantity(0).is_err());
    }
}
