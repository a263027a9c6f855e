//! Called-by-entry witness condition helper (mirrors `CalledByEntryCondition.cs`).

use neo_core::WitnessCondition;

/// Creates a called-by-entry witness condition.
pub fn new() -> WitnessCondition {
    WitnessCondition::CalledByEntry
}

/// Returns `true` if the given condition is `CalledByEntry`.
pub fn is_called_by_entry(condition: &WitnessCondition) -> bool {
    matches!(condition, WitnessCondition::CalledByEntry)
}
