//! Canonical preset id resolution
//!
//! One ordered priority chain, first match wins:
//!
//! 1. `details.fragmentId`
//! 2. a populated `itemId`'s nested `fragmentId` (its `_id` when that
//!    reference is itself an object)
//! 3. a populated `itemId`'s own `_id`
//! 4. `itemId` as a plain id string
//!
//! An entry that yields no reference, or a reference that is not a valid
//! preset id, is unresolvable: it is excluded with a diagnostic, never
//! merged into an unrelated group.

use skinforge_types::{InventoryEntry, ItemRef, PresetId, Result, SkinforgeError};
use tracing::warn;

/// Resolve the canonical preset id for a fragment inventory entry.
///
/// Deterministic: the same entry shape always resolves identically.
pub fn resolve_preset_id(entry: &InventoryEntry) -> Result<PresetId> {
    let raw = match raw_preset_ref(entry) {
        Some(raw) => raw,
        None => {
            warn!(entry = %entry.entry_id, "Inventory entry carries no preset reference");
            return Err(SkinforgeError::UnresolvableIdentity {
                entry_id: entry.entry_id.clone(),
            });
        }
    };

    PresetId::parse(raw).map_err(|_| {
        warn!(
            entry = %entry.entry_id,
            reference = raw,
            "Inventory entry preset reference is not a valid id"
        );
        SkinforgeError::UnresolvableIdentity {
            entry_id: entry.entry_id.clone(),
        }
    })
}

fn raw_preset_ref(entry: &InventoryEntry) -> Option<&str> {
    if let Some(id) = entry.details.as_ref().and_then(|d| d.fragment_id.as_deref()) {
        return Some(id);
    }
    match &entry.item_id {
        ItemRef::Populated(item) => match &item.fragment_id {
            Some(fragment) => Some(fragment.id()),
            None => Some(&item.id),
        },
        ItemRef::Id(id) => Some(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: serde_json::Value) -> InventoryEntry {
        serde_json::from_value(value).unwrap()
    }

    const PRESET_A: &str = "8c5b1b1e-46f8-4b51-b9a2-0f6f1a3c9d10";
    const PRESET_B: &str = "2e7d7a30-5a11-4a43-9f51-7a9f3be4c021";

    #[test]
    fn test_details_take_priority() {
        // details names PRESET_A while the populated object points at
        // PRESET_B; the snapshot wins
        let e = entry(json!({
            "entryId": "inv_1",
            "itemType": "FragmentsUser",
            "itemId": { "_id": "row", "fragmentId": PRESET_B },
            "details": { "fragmentId": PRESET_A }
        }));
        assert_eq!(resolve_preset_id(&e).unwrap(), PresetId::parse(PRESET_A).unwrap());
    }

    #[test]
    fn test_nested_fragment_ref_object() {
        let e = entry(json!({
            "entryId": "inv_2",
            "itemType": "FragmentsUser",
            "itemId": { "_id": "row", "fragmentId": { "_id": PRESET_A } }
        }));
        assert_eq!(resolve_preset_id(&e).unwrap(), PresetId::parse(PRESET_A).unwrap());
    }

    #[test]
    fn test_nested_fragment_ref_string() {
        let e = entry(json!({
            "entryId": "inv_3",
            "itemType": "FragmentsUser",
            "itemId": { "_id": "row", "fragmentId": PRESET_A }
        }));
        assert_eq!(resolve_preset_id(&e).unwrap(), PresetId::parse(PRESET_A).unwrap());
    }

    #[test]
    fn test_populated_without_nested_ref_uses_own_id() {
        let e = entry(json!({
            "entryId": "inv_4",
            "itemType": "FragmentsUser",
            "itemId": { "_id": PRESET_A }
        }));
        assert_eq!(resolve_preset_id(&e).unwrap(), PresetId::parse(PRESET_A).unwrap());
    }

    #[test]
    fn test_plain_id_string() {
        let e = entry(json!({
            "entryId": "inv_5",
            "itemType": "FragmentsUser",
            "itemId": PRESET_A
        }));
        assert_eq!(resolve_preset_id(&e).unwrap(), PresetId::parse(PRESET_A).unwrap());
    }

    #[test]
    fn test_prefixed_id_string() {
        let e = entry(json!({
            "entryId": "inv_6",
            "itemType": "FragmentsUser",
            "itemId": format!("preset_{PRESET_A}")
        }));
        assert_eq!(resolve_preset_id(&e).unwrap(), PresetId::parse(PRESET_A).unwrap());
    }

    #[test]
    fn test_garbage_reference_is_unresolvable() {
        let e = entry(json!({
            "entryId": "inv_7",
            "itemType": "FragmentsUser",
            "itemId": "legacy-mongo-oid-000000000000"
        }));
        assert!(matches!(
            resolve_preset_id(&e),
            Err(SkinforgeError::UnresolvableIdentity { .. })
        ));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let e = entry(json!({
            "entryId": "inv_8",
            "itemType": "FragmentsUser",
            "itemId": { "_id": "row", "fragmentId": { "_id": PRESET_B } },
            "details": {}
        }));
        let first = resolve_preset_id(&e).unwrap();
        let second = resolve_preset_id(&e).unwrap();
        assert_eq!(first, second);
    }
}
