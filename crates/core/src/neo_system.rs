// Copyright (C) 2015-2025 The Neo Project.
//
// neo_system.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Core system for Neo blockchain.

use std::sync::{Arc, RwLock};
use std::collections::HashMap;
use crate::CoreError;
use crate::uint160::UInt160;
use crate::uint256::UInt256;
use crate::transaction_type::ContainsTransactionType;
use neo_cryptography;

/// Trait for blockchain operations
pub trait BlockchainTrait: Send + Sync + std::fmt::Debug {
    fn height(&self) -> u32;
    fn best_block_hash(&self) -> UInt256;
    /// Whether a transaction with this hash has been persisted to the ledger.
    fn contains_transaction(&self, tx_hash: &UInt256) -> bool;
}

/// Trait for mempool operations
pub trait MempoolTrait: Send + Sync + std::fmt::Debug {
    fn transaction_count(&self) -> usize;
    /// Whether a transaction with this hash is currently held in the pool.
    fn contains(&self, tx_hash: &UInt256) -> bool;
}

/// Trait for network operations
pub trait NetworkTrait: Send + Sync + std::fmt::Debug {
    fn peer_count(&self) -> usize;
}

/// Trait for consensus operations
pub trait ConsensusTrait: Send + Sync + std::fmt::Debug {
    fn is_running(&self) -> bool;
}

/// Protocol settings for the Neo blockchain.
#[derive(Debug, Clone)]
pub struct ProtocolSettings {
    /// The magic number of the NEO network
    pub network: u32,
    /// The address version of the NEO system
    pub address_version: u8,
    /// The public keys of the standby committee members
    pub standby_committee: Vec<neo_cryptography::ECPoint>, // ECPoint committee members
    /// The number of validators in NEO system
    pub validators_count: u32,
    /// The seed list for network discovery
    pub seed_list: Vec<String>,
    /// Indicates the time between two blocks in milliseconds
    pub milliseconds_per_block: u32,
    /// The maximum increment of the ValidUntilBlock field
    pub max_valid_until_block_increment: u32,
    /// Indicates the maximum number of transactions that can be contained in a block
    pub max_transactions_per_block: u32,
    /// Indicates the maximum number of transactions that can be contained in the memory pool
    pub memory_pool_max_transactions: i32,
    /// Indicates the maximum number of blocks that can be traced in the smart contract
    pub max_traceable_blocks: u32,
    /// The initial amount of GAS distributed
    pub initial_gas_distribution: u64,
    /// Sets the block height from which a hardfork is activated
    pub hardforks: std::collections::HashMap<crate::hardfork::Hardfork, u32>,
}

impl ProtocolSettings {
    /// Creates new protocol settings with default values
    ///
    /// # Returns
    ///
    /// A new ProtocolSettings instance with defaults.
    pub fn new() -> Self {
        Self {
            network: 0u32, // Default network
            address_version: 0x35, // Neo N3 address version
            standby_committee: Vec::new(), // Empty by default
            validators_count: 0, // Default 0
            seed_list: Vec::new(), // Empty by default
            milliseconds_per_block: 15000, // 15 seconds per block
            max_valid_until_block_increment: 86400000 / 15000, // 5760 blocks
            max_transactions_per_block: 512, //
            memory_pool_max_transactions: 50_000, //
            max_traceable_blocks: 2_102_400, // About 1 year of blocks
            initial_gas_distribution: 52_000_000_00000000, // 52 million GAS
            hardforks: std::collections::HashMap::new(), // Empty by default
        }
    }

    /// Creates protocol settings for MainNet
    pub fn mainnet() -> Self {
        let mut settings = Self::new();
        settings.network = 860833102; // MainNet network magic
        settings.validators_count = 7;
        settings.max_transactions_per_block = 512;
        settings.memory_pool_max_transactions = 50000;
        settings.max_traceable_blocks = 2102400;
        settings.initial_gas_distribution = 52_000_000_00000000;

        // MainNet hardfork heights
        settings.hardforks.insert(crate::hardfork::Hardfork::HF_Aspidochelone, 1730000);
        settings.hardforks.insert(crate::hardfork::Hardfork::HF_Basilisk, 4120000);
        settings.hardforks.insert(crate::hardfork::Hardfork::HF_Cockatrice, 5450000);
        settings.hardforks.insert(crate::hardfork::Hardfork::HF_Domovoi, 5570000);
        settings.hardforks.insert(crate::hardfork::Hardfork::HF_Echidna, 7300000);

        settings
    }

    /// Creates protocol settings for TestNet
    pub fn testnet() -> Self {
        let mut settings = Self::new();
        settings.network = 894710606; // TestNet network magic
        settings.validators_count = 7;
        settings.max_transactions_per_block = 5000; // TestNet allows more transactions
        settings.memory_pool_max_transactions = 50000;
        settings.max_traceable_blocks = 2102400;
        settings.initial_gas_distribution = 52_000_000_00000000;

        // TestNet hardfork heights
        settings.hardforks.insert(crate::hardfork::Hardfork::HF_Aspidochelone, 210000);
        settings.hardforks.insert(crate::hardfork::Hardfork::HF_Basilisk, 2680000);
        settings.hardforks.insert(crate::hardfork::Hardfork::HF_Cockatrice, 3967000);
        settings.hardforks.insert(crate::hardfork::Hardfork::HF_Domovoi, 4144000);
        settings.hardforks.insert(crate::hardfork::Hardfork::HF_Echidna, 5870000);

        settings
    }

    /// Check if the Hardfork is Enabled
    pub fn is_hardfork_enabled(&self, hardfork: crate::hardfork::Hardfork, index: u32) -> bool {
        if let Some(&height) = self.hardforks.get(&hardfork) {
            // If the hardfork has a specific height in the configuration, check the block height.
            index >= height
        } else {
            // If the hardfork isn't specified in the configuration, return false.
            false
        }
    }
}

impl Default for ProtocolSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Represents the basic unit that contains all the components required for running of a NEO node.
#[derive(Debug)]
pub struct NeoSystem {
    // Neo system properties
    settings: ProtocolSettings,
    pub blockchain: Option<Arc<dyn BlockchainTrait>>,
    pub mempool: Option<Arc<dyn MempoolTrait>>,
    pub network: Option<Arc<dyn NetworkTrait>>,
    pub consensus: Option<Arc<dyn ConsensusTrait>>,
    services: RwLock<HashMap<String, Arc<dyn std::any::Any + Send + Sync>>>,
}

impl NeoSystem {
    /// Creates a new NeoSystem with the specified settings.
    ///
    /// # Arguments
    ///
    /// * `settings` - The protocol settings for the NeoSystem.
    ///
    /// # Returns
    ///
    /// A new NeoSystem instance.
    pub fn new(settings: ProtocolSettings) -> Self {
        Self {
            settings,
            blockchain: None,
            mempool: None,
            network: None,
            consensus: None,
            services: RwLock::new(HashMap::new()),
        }
    }

    /// Gets the protocol settings of the NeoSystem.
    ///
    /// # Returns
    ///
    /// The protocol settings of the NeoSystem.
    pub fn settings(&self) -> &ProtocolSettings {
        &self.settings
    }

    /// Adds a service to the NeoSystem.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the service.
    /// * `service` - The service to add.
    ///
    /// # Returns
    ///
    /// A Result indicating success or failure.
    pub fn add_service<T: 'static + Send + Sync>(&self, name: &str, service: T) -> Result<(), CoreError> {
        let mut services = self.services.write().map_err(|_| CoreError::SystemError("Failed to acquire write lock".to_string()))?;
        services.insert(name.to_string(), Arc::new(service));
        Ok(())
    }

    /// Gets a service from the NeoSystem.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the service.
    ///
    /// # Returns
    ///
    /// A Result containing either the service or an error.
    pub fn get_service<T: 'static + Send + Sync>(&self, name: &str) -> Result<Arc<T>, CoreError> {
        let services = self.services.read().map_err(|_| CoreError::SystemError("Failed to acquire read lock".to_string()))?;

        match services.get(name) {
            Some(service) => {
                match service.clone().downcast::<T>() {
                    Ok(typed_service) => Ok(typed_service),
                    Err(_) => Err(CoreError::SystemError(format!("Service {} is not of the requested type", name))),
                }
            },
            None => Err(CoreError::SystemError(format!("Service {} not found", name))),
        }
    }

    /// Determines whether the specified transaction exists in the memory pool or storage.
    ///
    /// # Arguments
    ///
    /// * `hash` - The hash of the transaction.
    ///
    /// # Returns
    ///
    /// A ContainsTransactionType indicating where the transaction exists, if at all.
    pub fn contains_transaction(&self, hash: &UInt256) -> ContainsTransactionType {
        // transaction lookup
        // 1. Check memory pool first
        if let Some(ref mempool) = self.mempool {
            if mempool.transaction_count() > 0 {
                // mempool transaction lookup
                if self.check_mempool_contains_transaction(hash) {
                    return ContainsTransactionType::ExistsInPool;
                }
            }
        }

        // 2. Check blockchain storage
        if let Some(ref blockchain) = self.blockchain {
            // blockchain transaction lookup
            if self.check_blockchain_contains_transaction(hash) {
                return ContainsTransactionType::ExistsInLedger;
            }
        }

        ContainsTransactionType::NotExist
    }

    /// Determines whether the specified transaction conflicts with some on-chain transaction.
    ///
    /// # Arguments
    ///
    /// * `hash` - The hash of the transaction.
    /// * `signers` - The list of signer accounts of the transaction.
    ///
    /// # Returns
    ///
    /// A boolean indicating whether the transaction conflicts with an on-chain transaction.
    pub fn contains_conflict_hash(&self, hash: &UInt256, signers: &[UInt160]) -> bool {
        // conflict detection

        if let Some(ref blockchain) = self.blockchain {
            // 1. Check for Conflicts attributes in on-chain transactions
            if self.check_conflicts_attribute_conflicts(blockchain.as_ref(), hash, signers) {
                return true;
            }

            // 2. Check for Oracle response conflicts
            if self.check_oracle_response_conflicts(blockchain.as_ref(), hash) {
                return true;
            }

            // 3. Check for NotValidBefore conflicts
            let current_height = blockchain.height();
            if self.check_not_valid_before_conflicts(blockchain.as_ref(), hash, signers, current_height) {
                return true;
            }
        }

        false
    }

    /// Checks if a transaction exists in the mempool.
    fn check_mempool_contains_transaction(&self, tx_hash: &UInt256) -> bool {
        match self.mempool {
            Some(ref mempool) => mempool.contains(tx_hash),
            None => false,
        }
    }

    /// Checks if a transaction exists in the blockchain.
    fn check_blockchain_contains_transaction(&self, tx_hash: &UInt256) -> bool {
        match self.blockchain {
            Some(ref blockchain) => blockchain.contains_transaction(tx_hash),
            None => false,
        }
    }

    /// Checks for Conflicts attribute conflicts.
    ///
    /// Requires a conflict index over on-chain transaction `Conflicts` attributes,
    /// which is not yet exposed through `BlockchainTrait`. Until that lands this
    /// conservatively reports no conflicts rather than guessing.
    fn check_conflicts_attribute_conflicts(&self, _blockchain: &dyn BlockchainTrait, _hash: &UInt256, _signers: &[UInt160]) -> bool {
        false
    }

    /// Checks for Oracle response conflicts.
    fn check_oracle_response_conflicts(&self, _blockchain: &dyn BlockchainTrait, _hash: &UInt256) -> bool {
        false
    }

    /// Checks for NotValidBefore conflicts.
    fn check_not_valid_before_conflicts(&self, _blockchain: &dyn BlockchainTrait, _hash: &UInt256, _signers: &[UInt160], _current_height: u32) -> bool {
        false
    }
}
