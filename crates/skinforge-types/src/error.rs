//! Error types for Skinforge
//!
//! All errors are explicit and carry their context.

use thiserror::Error;

/// Result type for Skinforge operations
pub type Result<T> = std::result::Result<T, SkinforgeError>;

/// Skinforge error types
#[derive(Debug, Clone, Error)]
pub enum SkinforgeError {
    // ========================================================================
    // Amount Errors
    // ========================================================================

    /// Non-positive grant or decrement amount (caller bug, not retriable)
    #[error("Invalid amount: {amount} (must be positive)")]
    InvalidAmount { amount: i64 },

    /// Preset threshold must be strictly positive
    #[error("Invalid required quantity: {quantity} (must be positive)")]
    InvalidRequiredQuantity { quantity: u64 },

    /// Balance overflow during a grant
    #[error("Balance overflow during grant")]
    BalanceOverflow,

    // ========================================================================
    // Preset Errors
    // ========================================================================

    /// Preset not found
    #[error("Preset {preset_id} not found")]
    PresetNotFound { preset_id: String },

    /// Preset is soft-deleted; no new accrual is allowed against it
    #[error("Preset {preset_id} is inactive")]
    PresetInactive { preset_id: String },

    /// Preset kind and reward target disagree at write time
    #[error("Preset kind {kind} does not match its reward target")]
    PresetKindMismatch { kind: String },

    // ========================================================================
    // Ledger Errors
    // ========================================================================

    /// Decrement against a nonexistent ledger row; rows are never created
    /// by a negative adjustment
    #[error("No ledger entry for user {user_id} and preset {preset_id}")]
    LedgerEntryNotFound { user_id: String, preset_id: String },

    /// Exchange attempted below the preset threshold
    #[error("Insufficient fragments: have {have}, need {need}")]
    InsufficientFragments { have: u64, need: u64 },

    // ========================================================================
    // Aggregation Errors
    // ========================================================================

    /// No canonical preset id could be resolved for an inventory entry
    #[error("Unresolvable identity for inventory entry {entry_id}")]
    UnresolvableIdentity { entry_id: String },

    // ========================================================================
    // Reward Errors
    // ========================================================================

    /// Reward collaborator failed after retries; the ledger deduction has
    /// been compensated
    #[error("Reward grant failed for preset {preset_id}: {reason}")]
    RewardGrantFailed { preset_id: String, reason: String },

    // ========================================================================
    // General Errors
    // ========================================================================

    /// Storage error
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl SkinforgeError {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Fragments still missing before an exchange becomes possible
    ///
    /// Only meaningful for `InsufficientFragments`; used by claim surfaces
    /// to render a "need N more" message.
    pub fn fragments_missing(&self) -> Option<u64> {
        match self {
            Self::InsufficientFragments { have, need } => Some(need.saturating_sub(*have)),
            _ => None,
        }
    }

    /// Check if this is a retriable error
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. } | Self::RewardGrantFailed { .. }
        )
    }

    /// Get an error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::InvalidRequiredQuantity { .. } => "INVALID_REQUIRED_QUANTITY",
            Self::BalanceOverflow => "BALANCE_OVERFLOW",
            Self::PresetNotFound { .. } => "PRESET_NOT_FOUND",
            Self::PresetInactive { .. } => "PRESET_INACTIVE",
            Self::PresetKindMismatch { .. } => "PRESET_KIND_MISMATCH",
            Self::LedgerEntryNotFound { .. } => "LEDGER_ENTRY_NOT_FOUND",
            Self::InsufficientFragments { .. } => "INSUFFICIENT_FRAGMENTS",
            Self::UnresolvableIdentity { .. } => "UNRESOLVABLE_IDENTITY",
            Self::RewardGrantFailed { .. } => "REWARD_GRANT_FAILED",
            Self::Storage { .. } => "STORAGE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SkinforgeError::InsufficientFragments { have: 4, need: 5 };
        assert_eq!(err.error_code(), "INSUFFICIENT_FRAGMENTS");
    }

    #[test]
    fn test_fragments_missing() {
        let err = SkinforgeError::InsufficientFragments { have: 2, need: 5 };
        assert_eq!(err.fragments_missing(), Some(3));

        let err = SkinforgeError::BalanceOverflow;
        assert_eq!(err.fragments_missing(), None);
    }

    #[test]
    fn test_retriable_errors() {
        let storage = SkinforgeError::storage("connection reset");
        assert!(storage.is_retriable());

        let invalid = SkinforgeError::InvalidAmount { amount: -1 };
        assert!(!invalid.is_retriable());
    }
}
