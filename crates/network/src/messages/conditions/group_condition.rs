//! Group witness condition helper (mirrors `GroupCondition.cs`).

use neo_core::WitnessCondition;

/// Creates a group witness condition using a serialized EC point.
pub fn new(group: Vec<u8>) -> WitnessCondition {
    WitnessCondition::Group { group }
}

/// Extracts the group bytes if the condition is `Group`.
pub fn group_bytes(condition: &WitnessCondition) -> Option<&[u8]> {
    match condition {
        WitnessCondition::Group { group } => Some(group.as_slice()),
        _ => None,
    }
}
