//! Skinforge Redeem - the ledger operations service
//!
//! Exposes the three fragment-mutating operations:
//!
//! - `grant` - positive accrual, creating the ledger row lazily
//! - `decrement` - administrative reduction, clamped at zero
//! - `exchange` - the redemption primitive: atomic threshold check and
//!   deduction, followed by the reward-grant call
//!
//! # Concurrency
//!
//! The operations are invoked by independent concurrent request handlers;
//! the stores are the only shared mutable state. Every read-check-write
//! sequence runs under a per-(user, preset) mutex so concurrent calls on
//! the same row cannot lose updates or double-redeem.
//!
//! # Reward boundary
//!
//! The reward-grant call is a separate transactional boundary. The ledger
//! deduction commits first; the reward call runs under a bounded jittered
//! retry, and a final failure re-credits the deducted threshold before the
//! exchange is reported as failed.

pub mod ops;
pub mod retry;
pub mod reward;

pub use ops::LedgerOps;
pub use retry::RetryPolicy;
pub use reward::RewardGranter;
