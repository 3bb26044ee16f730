//! Skinforge Inventory - identity resolution and aggregation
//!
//! The inventory read API splits one logical fragment balance across
//! multiple rows (one per grant event) and has written the preset
//! reference in several shapes over the years. This crate normalizes each
//! entry to a canonical preset id, once and centrally, and sums the rows
//! into per-preset groups with a single completion predicate.
//!
//! Everything here is read-only and side-effect-free over a snapshot of
//! the inventory response; it may be recomputed freely and needs no
//! locking.

pub mod aggregate;
pub mod lookup;
pub mod reader;
pub mod resolve;

pub use aggregate::{aggregate_fragments, AggregationOutcome, ExcludedEntry, FragmentGroup};
pub use lookup::PresetLookup;
pub use reader::InventoryReader;
pub use resolve::resolve_preset_id;
