//! Called-by-contract witness condition helper (mirrors `CalledByContractCondition.cs`).

use neo_core::{UInt160, WitnessCondition};

/// Creates a called-by-contract witness condition for the given script hash.
pub fn new(hash: UInt160) -> WitnessCondition {
    WitnessCondition::CalledByContract { hash }
}

/// Extracts the script hash if the condition is `CalledByContract`.
pub fn hash(condition: &WitnessCondition) -> Option<UInt160> {
    match condition {
        WitnessCondition::CalledByContract { hash } => Some(*hash),
        _ => None,
    }
}
