//! Adapts [`neo_ledger::Blockchain`] to the narrow [`LedgerService`] surface
//! consensus needs, so the consensus crate never has to depend on the full
//! ledger crate directly.

use neo_consensus::{Error as ConsensusError, LedgerService, Result as ConsensusResult};
use neo_core::{Block, Transaction, UInt256};
use neo_cryptography::ECPoint;
use neo_ledger::Blockchain;
use std::sync::Arc;

pub struct LedgerAdapter {
    blockchain: Arc<Blockchain>,
    standby_validators: Vec<Vec<u8>>,
}

impl LedgerAdapter {
    pub fn new(blockchain: Arc<Blockchain>, standby_validators: Vec<Vec<u8>>) -> Self {
        Self {
            blockchain,
            standby_validators,
        }
    }

    fn decode_validators(&self) -> ConsensusResult<Vec<ECPoint>> {
        self.standby_validators
            .iter()
            .map(|bytes| {
                ECPoint::from_bytes(bytes)
                    .map_err(|e| ConsensusError::Generic(format!("invalid validator key: {e}")))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl LedgerService for LedgerAdapter {
    async fn get_block(&self, height: u32) -> ConsensusResult<Option<Block>> {
        self.blockchain
            .get_block(height)
            .await
            .map_err(|e| ConsensusError::Generic(e.to_string()))
    }

    async fn get_block_by_hash(&self, hash: &UInt256) -> ConsensusResult<Option<Block>> {
        self.blockchain
            .get_block_by_hash(hash)
            .await
            .map_err(|e| ConsensusError::Generic(e.to_string()))
    }

    async fn get_current_height(&self) -> ConsensusResult<u32> {
        Ok(self.blockchain.get_height().await)
    }

    async fn add_block(&self, block: Block) -> ConsensusResult<()> {
        self.blockchain
            .persist_block(&block)
            .await
            .map_err(|e| ConsensusError::Generic(e.to_string()))
    }

    async fn get_transaction(&self, hash: &UInt256) -> ConsensusResult<Option<Transaction>> {
        self.blockchain
            .get_transaction(hash)
            .await
            .map_err(|e| ConsensusError::Generic(e.to_string()))
    }

    async fn contains_transaction(&self, hash: &UInt256) -> ConsensusResult<bool> {
        self.blockchain
            .contains_transaction(hash)
            .await
            .map_err(|e| ConsensusError::Generic(e.to_string()))
    }

    async fn get_next_block_validators(&self) -> ConsensusResult<Vec<ECPoint>> {
        // The committee election native contract determines the live
        // validator set; until the node consults it through an
        // application engine invocation, the configured standby
        // committee acts as the validator set, which is correct for any
        // network that has not yet run its first committee election.
        self.decode_validators()
    }

    async fn get_validators(&self, _height: u32) -> ConsensusResult<Vec<ECPoint>> {
        self.decode_validators()
    }

    async fn validate_transaction(&self, transaction: &Transaction) -> ConsensusResult<bool> {
        self.blockchain
            .validate_transaction(transaction)
            .await
            .map_err(|e| ConsensusError::Generic(e.to_string()))
    }
}
