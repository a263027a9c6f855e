//! Node capability descriptor (mirrors `NodeCapability.cs`).

use super::node_capability_type::NodeCapabilityType;
use serde::{Deserialize, Serialize};

/// Maximum length accepted for an unrecognised capability's payload.
///
/// Unknown capabilities are still relayed in a version handshake so that
/// future capability types degrade gracefully, but their payload is bounded
/// to keep a malicious peer from inflating the handshake.
pub const MAX_UNKNOWN_CAPABILITY_DATA: usize = 1024;

/// A single capability advertised by a node during the version handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCapability {
    /// Type of the capability.
    pub capability_type: NodeCapabilityType,
    /// Capability-specific payload (e.g. a port number or start height).
    pub data: Vec<u8>,
}

impl NodeCapability {
    /// Creates a TCP server capability advertising the given port.
    pub fn tcp_server(port: u16) -> Self {
        Self {
            capability_type: NodeCapabilityType::TcpServer,
            data: port.to_le_bytes().to_vec(),
        }
    }

    /// Creates a WebSocket server capability advertising the given port.
    pub fn ws_server(port: u16) -> Self {
        Self {
            capability_type: NodeCapabilityType::WsServer,
            data: port.to_le_bytes().to_vec(),
        }
    }

    /// Creates a full node capability advertising the node's chain height.
    pub fn full_node(start_height: u32) -> Self {
        Self {
            capability_type: NodeCapabilityType::FullNode,
            data: start_height.to_le_bytes().to_vec(),
        }
    }

    /// Creates an archival node capability.
    pub fn archival_node() -> Self {
        Self {
            capability_type: NodeCapabilityType::ArchivalNode,
            data: Vec::new(),
        }
    }

    /// Creates a disable-compression capability.
    pub fn disable_compression() -> Self {
        Self {
            capability_type: NodeCapabilityType::DisableCompression,
            data: Vec::new(),
        }
    }

    /// Returns the port advertised by this capability, if it is a server capability.
    pub fn port(&self) -> Option<u16> {
        match self.capability_type {
            NodeCapabilityType::TcpServer | NodeCapabilityType::WsServer => {
                let bytes: [u8; 2] = self.data.get(0..2)?.try_into().ok()?;
                Some(u16::from_le_bytes(bytes))
            }
            _ => None,
        }
    }

    /// Returns the size of this capability when serialized: one type byte,
    /// one length-prefix varint byte, plus the payload.
    pub fn size(&self) -> usize {
        1 + 1 + self.data.len()
    }
}
