//! Inventory read API contract
//!
//! The storefront's inventory service owns the data; the engine only reads
//! a snapshot of it per request.

use async_trait::async_trait;
use skinforge_types::{InventoryEntry, Result, UserId};

/// Read access to a user's inventory entries
#[async_trait]
pub trait InventoryReader: Send + Sync {
    async fn entries_for_user(&self, user: &UserId) -> Result<Vec<InventoryEntry>>;
}
