//! Witness condition root type (mirrors `WitnessCondition.cs`).
//!
//! The condition tree itself lives in `neo_core` alongside `WitnessRule`; this
//! module re-exports it for the network crate's message layer and provides
//! the free-standing `is_valid` helper the other condition modules build on.

pub use neo_core::{WitnessCondition, WitnessConditionType};

/// Maximum number of sub-items allowed in an `And`/`Or` condition.
pub const MAX_SUBITEMS: usize = WitnessCondition::MAX_SUBITEMS;
/// Maximum nesting depth allowed for a condition tree.
pub const MAX_NESTING_DEPTH: usize = WitnessCondition::MAX_NESTING_DEPTH;

/// Validates a condition tree against the maximum nesting depth.
pub fn is_valid(condition: &WitnessCondition) -> bool {
    condition.is_valid(MAX_NESTING_DEPTH)
}
