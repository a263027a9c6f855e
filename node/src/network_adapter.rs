//! Adapts [`neo_network::P2pNode`] to the narrow [`NetworkService`] surface
//! consensus needs to gossip its messages.

use neo_consensus::{Error as ConsensusError, NetworkService, Result as ConsensusResult};
use neo_core::{UInt160, Witness};
use neo_network::messages::{ExtensiblePayload, NetworkMessage, ProtocolMessage};
use neo_network::{NetworkCommand, P2pNode};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct NetworkAdapter {
    p2p: Arc<P2pNode>,
    commands: mpsc::Sender<NetworkCommand>,
    magic: u32,
    sender: UInt160,
}

impl NetworkAdapter {
    pub fn new(
        p2p: Arc<P2pNode>,
        commands: mpsc::Sender<NetworkCommand>,
        magic: u32,
        sender: UInt160,
    ) -> Self {
        Self {
            p2p,
            commands,
            magic,
            sender,
        }
    }

    fn wrap(&self, message: Vec<u8>) -> NetworkMessage {
        let payload = ExtensiblePayload::consensus(0, u32::MAX, self.sender, message, Witness::empty());
        NetworkMessage::new(self.magic, ProtocolMessage::Extensible { payload })
    }
}

#[async_trait::async_trait]
impl NetworkService for NetworkAdapter {
    async fn broadcast_consensus_message(&self, message: Vec<u8>) -> ConsensusResult<()> {
        self.p2p
            .broadcast_message(self.wrap(message))
            .await
            .map_err(|e| ConsensusError::Generic(e.to_string()))
    }

    async fn send_consensus_message(&self, peer_id: &str, message: Vec<u8>) -> ConsensusResult<()> {
        let peer: SocketAddr = peer_id
            .parse()
            .map_err(|e| ConsensusError::Generic(format!("invalid peer address {peer_id}: {e}")))?;
        self.commands
            .send(NetworkCommand::SendMessage {
                peer,
                message: self.wrap(message),
            })
            .await
            .map_err(|e| ConsensusError::Generic(e.to_string()))
    }

    async fn get_connected_peers(&self) -> ConsensusResult<Vec<String>> {
        Ok(self
            .p2p
            .get_connected_peer_addresses()
            .await
            .into_iter()
            .map(|addr| addr.to_string())
            .collect())
    }

    async fn is_connected(&self) -> bool {
        !self.p2p.get_connected_peer_addresses().await.is_empty()
    }
}
