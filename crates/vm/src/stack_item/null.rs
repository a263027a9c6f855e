//! Null stack item implementation for the Neo Virtual Machine.
//!
//! This module provides the Null stack item implementation used in the Neo VM.

use crate::stack_item::stack_item_type::StackItemType;
use std::sync::Arc;

/// Represents a null value in the VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Null;

impl Null {
    /// Creates a new null value.
    pub fn new() -> Self {
        Self
    }

    /// Gets the type of the stack item.
    pub fn stack_item_type(&self) -> StackItemType {
        StackItemType::Any
    }

    /// Converts the null to a boolean.
    pub fn to_boolean(&self) -> bool {
        false
    }

    /// Converts the null to a byte array.
    pub fn to_bytes(&self) -> Vec<u8> {
        Vec::new()
    }

    /// Creates a deep copy of the null.
    pub fn deep_copy(&self) -> Self {
        Self
    }
}
