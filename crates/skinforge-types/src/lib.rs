//! Skinforge Types - Canonical domain types for the fragment engine
//!
//! This crate contains all foundational types for Skinforge with zero
//! dependencies on other skinforge crates. It defines the type system for:
//!
//! - Identity types (PresetId, UserId, LedgerEntryId, etc.)
//! - Fragment presets (redemption rules: threshold, reward kind and target)
//! - Fragment ledger entries (per-user, per-preset balances)
//! - External inventory entry shapes, including every historical variant
//! - Rewards and exchange outcomes
//!
//! # Invariants
//!
//! 1. A ledger balance is never negative (`balance: u64` by construction,
//!    and no operation in the engine underflows it)
//! 2. At most one ledger entry exists per (user, preset) pair
//! 3. A preset's reward target always agrees with its kind
//! 4. Failure must be explicit - every error carries its context

pub mod error;
pub mod identity;
pub mod inventory;
pub mod ledger;
pub mod preset;
pub mod reward;

pub use error::*;
pub use identity::*;
pub use inventory::*;
pub use ledger::*;
pub use preset::*;
pub use reward::*;

/// Version of the Skinforge types schema
pub const TYPES_VERSION: &str = "0.1.0";
