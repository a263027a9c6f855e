//! Fallback handling for capability types not recognised by this port.

use super::node_capability::{NodeCapability, MAX_UNKNOWN_CAPABILITY_DATA};
use super::node_capability_type::NodeCapabilityType;

/// Wraps an already-classified unknown capability type with its raw payload.
pub fn unknown(capability_type: NodeCapabilityType, data: Vec<u8>) -> NodeCapability {
    let mut data = data;
    data.truncate(MAX_UNKNOWN_CAPABILITY_DATA);
    NodeCapability {
        capability_type,
        data,
    }
}

/// Builds an unknown capability directly from its wire type byte and payload.
pub fn unknown_from_byte(type_byte: u8, data: Vec<u8>) -> NodeCapability {
    unknown(NodeCapabilityType::from_byte(type_byte), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_from_byte_preserves_payload() {
        let capability = unknown_from_byte(0xAA, vec![1, 2, 3]);
        assert_eq!(capability.capability_type, NodeCapabilityType::Unknown(0xAA));
        assert_eq!(capability.data, vec![1, 2, 3]);
    }

    #[test]
    fn unknown_truncates_oversized_payload() {
        let huge = vec![0u8; MAX_UNKNOWN_CAPABILITY_DATA + 10];
        let capability = unknown(NodeCapabilityType::Unknown(0xF1), huge);
        assert_eq!(capability.data.len(), MAX_UNKNOWN_CAPABILITY_DATA);
    }
}
