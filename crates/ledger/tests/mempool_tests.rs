//!

use neo_core::{Signer, Transaction, UInt160, UInt256, Witness, WitnessScope};
use neo_ledger::mempool::{MemoryPool, MempoolConfig, RemovalReason, TryAddResult};

#[cfg(test)]
#[allow(dead_code)]
mod mempool_tests {
    use super::*;

    fn make_tx(nonce: u32, network_fee: i64) -> Transaction {
        let mut tx = Transaction::new();
        tx.set_nonce(nonce);
        tx.set_script(vec![0x40]);
        tx.set_network_fee(network_fee);
        tx.set_valid_until_block(999999);
        tx.add_signer(Signer {
            account: UInt160::from_bytes(&[1u8; 20]).unwrap(),
            scopes: WitnessScope::CalledByEntry,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        });
        tx.add_witness(Witness::default());
        tx
    }

    /// Test mempool creation and configuration
    #[test]
    fn test_mempool_creation_compatibility() {
        let config = MempoolConfig {
            max_transactions: 50000,
            max_memory_usage: 100 * 1024 * 1024,
            transaction_timeout: 120,
            min_fee_per_byte: 1,
            enable_replacement: true,
            max_transaction_size: 102400,
        };

        let mempool = MemoryPool::new(config.clone());

        let stats = mempool.get_stats();
        assert_eq!(stats.transaction_count, 0);
        assert_eq!(mempool.count(), 0);
    }

    /// Test transaction addition
    #[test]
    fn test_transaction_addition_compatibility() {
        let config = MempoolConfig {
            min_fee_per_byte: 1,
            ..MempoolConfig::default()
        };
        let mempool = MemoryPool::new(config);

        let tx = make_tx(1, 1000000);
        let tx_hash = tx.hash().unwrap();

        let result = mempool.try_add(tx.clone(), false);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), TryAddResult::Added);

        assert_eq!(mempool.count(), 1);
        assert!(mempool.contains(&tx_hash));

        // Duplicate rejection
        let duplicate_result = mempool.try_add(tx, false);
        assert_eq!(duplicate_result.unwrap(), TryAddResult::AlreadyExists);
    }

    /// Test fee-based prioritization
    #[test]
    fn test_fee_prioritization_compatibility() {
        let config = MempoolConfig {
            min_fee_per_byte: 1,
            ..MempoolConfig::default()
        };
        let mempool = MemoryPool::new(config);

        let size = make_tx(0, 0).size() as i64;

        let low_fee_tx = make_tx(1, 10 * size);
        let high_fee_tx = make_tx(2, 100 * size);
        let medium_fee_tx = make_tx(3, 50 * size);

        mempool.try_add(low_fee_tx.clone(), false).unwrap();
        mempool.try_add(high_fee_tx.clone(), false).unwrap();
        mempool.try_add(medium_fee_tx.clone(), false).unwrap();

        let sorted = mempool.get_sorted_transactions(10);

        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted[0].hash().unwrap(), high_fee_tx.hash().unwrap());
        assert_eq!(sorted[1].hash().unwrap(), medium_fee_tx.hash().unwrap());
        assert_eq!(sorted[2].hash().unwrap(), low_fee_tx.hash().unwrap());
    }

    /// Test capacity limits and fee-based eviction
    #[test]
    fn test_capacity_limits_compatibility() {
        let config = MempoolConfig {
            max_transactions: 100,
            min_fee_per_byte: 1,
            ..MempoolConfig::default()
        };
        let mempool = MemoryPool::new(config);

        let size = make_tx(0, 0).size() as i64;

        for i in 0..100 {
            let tx = make_tx(i, 10 * size);
            mempool.try_add(tx, false).unwrap();
        }

        assert_eq!(mempool.count(), 100);

        // Fee too low to evict anything: rejected.
        let low_fee_tx = make_tx(101, 2 * size);
        let result = mempool.try_add(low_fee_tx, false);
        assert_eq!(result.unwrap(), TryAddResult::InsufficientFee);

        // Fee high enough to evict the lowest entry.
        let high_fee_tx = make_tx(102, 1000 * size);
        let high_fee_hash = high_fee_tx.hash().unwrap();
        let result = mempool.try_add(high_fee_tx, false);
        assert_eq!(result.unwrap(), TryAddResult::Added);

        assert_eq!(mempool.count(), 100);
        assert!(mempool.contains(&high_fee_hash));
    }

    /// Test transaction removal
    #[test]
    fn test_transaction_removal_compatibility() {
        let config = MempoolConfig {
            min_fee_per_byte: 1,
            ..MempoolConfig::default()
        };
        let mempool = MemoryPool::new(config);

        let tx1 = make_tx(1, 10000);
        let tx2 = make_tx(2, 20000);
        let tx3 = make_tx(3, 30000);

        mempool.try_add(tx1.clone(), false).unwrap();
        mempool.try_add(tx2.clone(), false).unwrap();
        mempool.try_add(tx3.clone(), false).unwrap();

        assert_eq!(mempool.count(), 3);

        let removed = mempool.try_remove(&tx2.hash().unwrap()).unwrap();
        assert!(removed.is_some());
        assert_eq!(mempool.count(), 2);
        assert!(!mempool.contains(&tx2.hash().unwrap()));

        // Removing a non-existent transaction is a no-op.
        let not_removed = mempool.try_remove(&UInt256::zero()).unwrap();
        assert!(not_removed.is_none());
        assert_eq!(mempool.count(), 2);
    }

    /// Test transaction expiry rejection on add
    #[test]
    fn test_transaction_expiry_compatibility() {
        let config = MempoolConfig {
            min_fee_per_byte: 1,
            ..MempoolConfig::default()
        };
        let mempool = MemoryPool::new(config);
        mempool.set_current_height(200);

        let mut expired_tx = make_tx(1, 10000);
        expired_tx.set_valid_until_block(100);
        let result = mempool.try_add(expired_tx, false);
        assert_eq!(result.unwrap(), TryAddResult::Expired);
        assert_eq!(mempool.count(), 0);

        let mut valid_tx = make_tx(2, 10000);
        valid_tx.set_valid_until_block(300);
        let result = mempool.try_add(valid_tx, false);
        assert_eq!(result.unwrap(), TryAddResult::Added);
        assert_eq!(mempool.count(), 1);
    }

    /// Test invalidating transactions from a sender
    #[test]
    fn test_invalidate_transactions_from_sender_compatibility() {
        let config = MempoolConfig {
            min_fee_per_byte: 1,
            ..MempoolConfig::default()
        };
        let mempool = MemoryPool::new(config);
        let sender = UInt160::from_bytes(&[1u8; 20]).unwrap();

        for i in 0..3 {
            let tx = make_tx(i, 10000);
            mempool.try_add(tx, false).unwrap();
        }
        assert_eq!(mempool.count(), 3);

        let invalidated = mempool.invalidate_transactions_from_sender(&sender).unwrap();
        assert_eq!(invalidated.len(), 3);
        assert_eq!(mempool.count(), 0);
    }

    /// Test mempool updates when a block is persisted
    #[test]
    fn test_update_for_block_persisted_compatibility() {
        let config = MempoolConfig {
            min_fee_per_byte: 1,
            ..MempoolConfig::default()
        };
        let mempool = MemoryPool::new(config);

        let tx1 = make_tx(1, 10000);
        let tx2 = make_tx(2, 20000);
        mempool.try_add(tx1.clone(), false).unwrap();
        mempool.try_add(tx2.clone(), false).unwrap();
        assert_eq!(mempool.count(), 2);

        mempool
            .update_for_block_persisted(&[tx1.hash().unwrap()])
            .unwrap();

        assert_eq!(mempool.count(), 1);
        assert!(!mempool.contains(&tx1.hash().unwrap()));
        assert!(mempool.contains(&tx2.hash().unwrap()));
    }

    /// Test clearing the pool
    #[test]
    fn test_clear_pool_compatibility() {
        let config = MempoolConfig {
            min_fee_per_byte: 1,
            ..MempoolConfig::default()
        };
        let mempool = MemoryPool::new(config);

        for i in 0..5 {
            let tx = make_tx(i, 10000);
            mempool.try_add(tx, false).unwrap();
        }
        assert_eq!(mempool.count(), 5);

        mempool.clear().unwrap();
        assert_eq!(mempool.count(), 0);
        assert_eq!(mempool.get_stats().transaction_count, 0);
    }

    /// Test edge cases
    #[test]
    fn test_mempool_edge_cases_compatibility() {
        let config = MempoolConfig {
            min_fee_per_byte: 1,
            ..MempoolConfig::default()
        };
        let mempool = MemoryPool::new(config);

        // Empty script is rejected by the default verifier.
        let mut empty_script_tx = make_tx(1, 10000);
        empty_script_tx.set_script(vec![]);
        let result = mempool.try_add(empty_script_tx, false).unwrap();
        assert_eq!(result, TryAddResult::InvalidTransaction);

        // Transaction with many signers is otherwise accepted.
        let mut multi_signer_tx = make_tx(2, 1000000);
        for i in 0..15 {
            multi_signer_tx.add_signer(Signer {
                account: UInt160::from_bytes(&[i as u8; 20]).unwrap(),
                scopes: WitnessScope::CalledByEntry,
                allowed_contracts: Vec::new(),
                allowed_groups: Vec::new(),
                rules: Vec::new(),
            });
            multi_signer_tx.add_witness(Witness::default());
        }
        let result = mempool.try_add(multi_signer_tx, false);
        assert_eq!(result.unwrap(), TryAddResult::Added);

        assert_eq!(mempool.count(), 1);
        let limited = mempool.get_sorted_transactions(1);
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_removal_reason_variants_compatibility() {
        // Sanity check that the removal reasons used across the pool's eviction
        // and expiry paths are distinct and comparable.
        assert_ne!(RemovalReason::CapacityExceeded, RemovalReason::Expired);
        assert_ne!(RemovalReason::BlockPersisted, RemovalReason::Invalid);
    }
}
