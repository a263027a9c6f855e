//! Witness condition type identifiers (mirrors `WitnessConditionType.cs`).

pub use neo_core::WitnessConditionType;
