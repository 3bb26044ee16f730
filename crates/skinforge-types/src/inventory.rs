//! External inventory entry shapes
//!
//! The inventory read API is a denormalized, historically-inconsistent
//! projection of ledger and preset state. The same logical field has been
//! written in several shapes over time: `itemId` may be a raw id string, a
//! populated object, or a populated object nesting its own preset
//! reference. These unions model every shape once, at the ingestion
//! boundary, so no call site ever unwraps them ad hoc.

use crate::RewardCategory;
use serde::{Deserialize, Serialize};

/// `itemType` value that marks fragment entries
pub const FRAGMENT_ITEM_TYPE: &str = "FragmentsUser";

/// One entry from the inventory read API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    pub entry_id: String,
    pub item_type: String,
    pub item_id: ItemRef,
    /// Snapshot captured at grant time; may be missing on old rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<EntryDetails>,
    /// Fragment count this row carries; absent means 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

impl InventoryEntry {
    /// Whether this entry belongs to the fragment engine
    pub fn is_fragment(&self) -> bool {
        self.item_type == FRAGMENT_ITEM_TYPE
    }

    /// Row quantity, defaulting to 1 when the field is absent
    pub fn unit_quantity(&self) -> u64 {
        self.quantity.unwrap_or(1)
    }
}

/// The `itemId` field across its historical shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemRef {
    /// Raw id string
    Id(String),
    /// Populated object
    Populated(PopulatedItem),
}

impl ItemRef {
    pub fn as_plain_id(&self) -> Option<&str> {
        match self {
            Self::Id(id) => Some(id),
            Self::Populated(_) => None,
        }
    }

    pub fn as_populated(&self) -> Option<&PopulatedItem> {
        match self {
            Self::Id(_) => None,
            Self::Populated(item) => Some(item),
        }
    }
}

/// A populated `itemId` object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedItem {
    #[serde(rename = "_id")]
    pub id: String,
    /// Nested preset reference some historical writers attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_id: Option<FragmentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_quantity: Option<u64>,
}

/// A nested preset reference: either a raw id or an object with `_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FragmentRef {
    Id(String),
    Object(FragmentRefObject),
}

impl FragmentRef {
    /// The referenced id, whichever shape carries it
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Object(obj) => &obj.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentRefObject {
    #[serde(rename = "_id")]
    pub id: String,
}

/// Grant-time snapshot of preset fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_quantity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_category: Option<RewardCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_id_shape() {
        let entry: InventoryEntry = serde_json::from_value(json!({
            "entryId": "inv_1",
            "itemType": "FragmentsUser",
            "itemId": "8c5b1b1e-46f8-4b51-b9a2-0f6f1a3c9d10"
        }))
        .unwrap();

        assert!(entry.is_fragment());
        assert_eq!(entry.unit_quantity(), 1);
        assert_eq!(
            entry.item_id.as_plain_id(),
            Some("8c5b1b1e-46f8-4b51-b9a2-0f6f1a3c9d10")
        );
    }

    #[test]
    fn test_populated_shape() {
        let entry: InventoryEntry = serde_json::from_value(json!({
            "entryId": "inv_2",
            "itemType": "FragmentsUser",
            "itemId": {
                "_id": "8c5b1b1e-46f8-4b51-b9a2-0f6f1a3c9d10",
                "name": "PROJECT: Vayne",
                "requiredQuantity": 5
            },
            "quantity": 3
        }))
        .unwrap();

        let populated = entry.item_id.as_populated().unwrap();
        assert_eq!(populated.required_quantity, Some(5));
        assert!(populated.fragment_id.is_none());
        assert_eq!(entry.unit_quantity(), 3);
    }

    #[test]
    fn test_nested_fragment_ref_shapes() {
        // The nested reference itself appears both as a raw id and as an
        // object with `_id`
        let entry: InventoryEntry = serde_json::from_value(json!({
            "entryId": "inv_3",
            "itemType": "FragmentsUser",
            "itemId": {
                "_id": "item-row-id",
                "fragmentId": { "_id": "8c5b1b1e-46f8-4b51-b9a2-0f6f1a3c9d10" }
            }
        }))
        .unwrap();
        let populated = entry.item_id.as_populated().unwrap();
        assert_eq!(
            populated.fragment_id.as_ref().map(|f| f.id()),
            Some("8c5b1b1e-46f8-4b51-b9a2-0f6f1a3c9d10")
        );

        let entry: InventoryEntry = serde_json::from_value(json!({
            "entryId": "inv_4",
            "itemType": "FragmentsUser",
            "itemId": {
                "_id": "item-row-id",
                "fragmentId": "8c5b1b1e-46f8-4b51-b9a2-0f6f1a3c9d10"
            }
        }))
        .unwrap();
        let populated = entry.item_id.as_populated().unwrap();
        assert_eq!(
            populated.fragment_id.as_ref().map(|f| f.id()),
            Some("8c5b1b1e-46f8-4b51-b9a2-0f6f1a3c9d10")
        );
    }

    #[test]
    fn test_details_snapshot() {
        let entry: InventoryEntry = serde_json::from_value(json!({
            "entryId": "inv_5",
            "itemType": "FragmentsUser",
            "itemId": "ignored-when-details-present",
            "details": {
                "fragmentId": "8c5b1b1e-46f8-4b51-b9a2-0f6f1a3c9d10",
                "name": "PROJECT: Vayne",
                "requiredQuantity": 5,
                "rewardCategory": "Skin"
            }
        }))
        .unwrap();

        let details = entry.details.unwrap();
        assert_eq!(details.required_quantity, Some(5));
        assert_eq!(details.reward_category, Some(RewardCategory::Skin));
    }
}
