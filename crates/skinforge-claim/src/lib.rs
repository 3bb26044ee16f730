//! Skinforge Claim - the user-facing redemption orchestrator
//!
//! Drives the claim flows over the operations service:
//!
//! - single claim: a completed fragment group exchanges immediately, an
//!   incomplete one is rejected with how many fragments are still missing
//! - batch claim: multi-select of completed groups plus ordinary items,
//!   one redemption request per selection
//! - reward reveal: the Pending -> Revealing -> Revealed presentation
//!   state machine
//!
//! Client-side gating here is advisory; `exchange` re-verifies the
//! threshold against the ledger under the row lock, so a stale snapshot
//! can reject early but never double-redeem.

pub mod orchestrator;
pub mod reveal;

pub use orchestrator::{
    BatchOutcome, ClaimFailure, ClaimOrchestrator, ClaimResult, ItemClaimer, Selection,
};
pub use reveal::{RevealPhase, RewardReveal};
