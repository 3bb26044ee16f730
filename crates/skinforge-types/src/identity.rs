//! Identity types for Skinforge
//!
//! All identity types are strongly typed wrappers around UUIDs to prevent
//! accidental mixing of different ID types. Legacy inventory payloads carry
//! ids as bare strings; `parse` accepts both the prefixed and the bare form.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID types with common implementations
macro_rules! define_id_type {
    ($name:ident, $prefix:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parse from a string (with or without prefix)
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                let s = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Get the inner UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Convert to prefixed string
            pub fn to_prefixed_string(&self) -> String {
                format!("{}_{}", $prefix, self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }
    };
}

// Core identity types
define_id_type!(UserId, "user", "Unique identifier for a storefront user");
define_id_type!(PresetId, "preset", "Unique identifier for a fragment preset");

// Ledger identity types
define_id_type!(LedgerEntryId, "entry", "Unique identifier for a fragment ledger entry");
define_id_type!(JournalEntryId, "journal", "Unique identifier for a ledger journal entry");

// Reward identity types
define_id_type!(RewardId, "reward", "Unique identifier for a granted reward");
define_id_type!(CatalogItemId, "item", "Unique identifier for a concrete catalog entry");
define_id_type!(CategoryId, "category", "Unique identifier for a reward category (e.g. a price tier)");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_id_creation() {
        let id = PresetId::new();
        let s = id.to_string();
        assert!(s.starts_with("preset_"));
    }

    #[test]
    fn test_id_parsing() {
        let id = PresetId::new();
        let s = id.to_string();
        let parsed = PresetId::parse(&s).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_bare_uuid_parsing() {
        // Legacy inventory rows carry the raw uuid without a prefix
        let id = PresetId::new();
        let bare = id.as_uuid().to_string();
        let parsed = PresetId::parse(&bare).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_equality() {
        let uuid = Uuid::new_v4();
        let id1 = UserId::from_uuid(uuid);
        let id2 = UserId::from_uuid(uuid);
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(PresetId::parse("not-a-uuid").is_err());
    }
}
