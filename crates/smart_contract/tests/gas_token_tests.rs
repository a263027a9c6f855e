
use neo_core::{UInt160, UInt256};
use neo_cryptography::ECPoint;
use neo_smart_contract::{
    ApplicationEngine, Block, Contract, GasToken, NativeContract, NeoToken, StorageItem,
    StorageKey, TriggerType,
};
use neo_vm::StackItem;
use std::str::FromStr;

// ============================================================================
// Test basic GAS token properties
// ============================================================================

#[test]
fn test_check_name() {
    let gas = GasToken::new();
    assert_eq!(gas.name(), "GasToken");
}

#[test]
fn test_check_symbol() {
    let gas = GasToken::new();
    assert_eq!(gas.symbol(), "GAS");
}

#[test]
fn test_check_decimals() {
    let gas = GasToken::new();
    assert_eq!(gas.decimals(), 8);
}

// ============================================================================
// Test balance, transfer, and burn operations
// ============================================================================

#[tokio::test]
async fn test_check_balance_of_transfer_and_burn() {
    let mut engine = create_test_engine(1000);
    let gas = GasToken::new();
    let neo = NeoToken::new();

    // Get addresses
    let from = Contract::get_bft_address(&get_standby_validators());
    let to = UInt160::zero();

    // Check initial supply
    let supply = gas.total_supply(&engine);
    assert_eq!(supply, 5200000050000000); // Initial supply + NEO holder rewards

    // Check unclaimed GAS
    let unclaimed = neo.calculate_unclaimed_gas(&engine, &from, 1000);
    assert_eq!(unclaimed, 50000000000); // 0.5 * 1000 * 100000000

    // Transfer NEO (which triggers GAS claim)
    let success = neo.transfer(&mut engine, from, to, 0, true);
    assert!(success);

    // Test null parameter handling
    let result =
        std::panic::catch_unwind(|| neo.transfer(&mut engine, from, UInt160::zero(), 0, true));
    assert!(result.is_ok());

    let result =
        std::panic::catch_unwind(|| neo.transfer(&mut engine, UInt160::zero(), to, 0, false));
    assert!(result.is_err());

    // Check balances after NEO transfer
    assert_eq!(neo.balance_of(&engine, from), 100000000);
    assert_eq!(neo.balance_of(&engine, to), 0);

    assert_eq!(gas.balance_of(&engine, from), 52000500_00000000);
    assert_eq!(gas.balance_of(&engine, to), 0);

    // Check unclaimed GAS is now zero
    let unclaimed = neo.calculate_unclaimed_gas(&engine, &from, 1000);
    assert_eq!(unclaimed, 0);

    // Check supply after claim
    let supply = gas.total_supply(&engine);
    assert_eq!(supply, 5200050050000000);

    // Test GAS transfers

    // Should fail - not signed
    let success = gas.transfer(&mut engine, from, to, 52000500_00000000, false);
    assert!(!success);

    // Should fail - more than balance
    let success = gas.transfer(&mut engine, from, to, 52000500_00000001, true);
    assert!(!success);

    // Should succeed - transfer all balance
    let success = gas.transfer(&mut engine, from, to, 52000500_00000000, true);
    assert!(success);

    // Check balances after transfer
    assert_eq!(gas.balance_of(&engine, to), 52000500_00000000);
    assert_eq!(gas.balance_of(&engine, from), 0);

    // Test burn operations

    // Should fail - negative amount
    let result = gas.burn(&mut engine, to, -1).await;
    assert!(result.is_err());

    // Should fail - more than balance
    let result = gas.burn(&mut engine, to, 52000500_00000001).await;
    assert!(result.is_err());

    // Should succeed - burn 1 GAS
    let result = gas.burn(&mut engine, to, 1).await;
    assert!(result.is_ok());
    assert_eq!(gas.balance_of(&engine, to), 5200049999999999);

    // Should succeed - burn all remaining
    let result = gas.burn(&mut engine, to, 5200049999999999).await;
    assert!(result.is_ok());
    assert_eq!(gas.balance_of(&engine, to), 0);

    // Test bad inputs

    // Negative amount
    let result = std::panic::catch_unwind(|| gas.transfer(&mut engine, from, to, -1, true));
    assert!(result.is_err());

    // Invalid address length (19 bytes)
    let bad_address = vec![0u8; 19];
    let result =
        std::panic::catch_unwind(|| gas.transfer(&mut engine, bad_address.clone(), to, 1, false));
    assert!(result.is_err());

    let result =
        std::panic::catch_unwind(|| gas.transfer(&mut engine, from, bad_address, 1, false));
    assert!(result.is_err());
}

// ============================================================================
// Test initial distribution
// ============================================================================

/// Test initial GAS distribution
#[test]
fn test_initial_distribution() {
    let engine = create_test_engine(0);
    let gas = GasToken::new();

    // Check initial supply
    let total_supply = gas.total_supply(&engine);
    assert_eq!(total_supply, 3000000000000000); // 30 million GAS with 8 decimals

    // Check that validators have initial GAS
    let validators = get_standby_validators();
    let validator_address = Contract::get_bft_address(&validators);
    let balance = gas.balance_of(&engine, validator_address);
    assert!(balance > 0);
}

// ============================================================================
// Test GAS generation from NEO
// ============================================================================

/// Test GAS generation calculation
#[test]
fn test_gas_generation() {
    let mut engine = create_test_engine(0);
    let neo = NeoToken::new();

    // Give account some NEO
    let account = UInt160::from_str("0x1234567890123456789012345678901234567890").unwrap();
    neo.mint(&mut engine, account, 100_000_000, false); // 100 million NEO

    // Fast forward 100 blocks
    engine.set_block_index(100);

    // Calculate unclaimed GAS
    let unclaimed = neo.calculate_unclaimed_gas(&engine, &account, 100);

    // Should have generated some GAS
    assert!(unclaimed > 0);

    // GAS per block = 0.5 (before reduction)
    // 100 blocks * 0.5 GAS/block * 100 million NEO / total NEO
    let expected_gas_per_neo = 50_00000000; // 50 GAS with 8 decimals
    assert_eq!(unclaimed, expected_gas_per_neo);
}

// ============================================================================
// Test storage key creation
// ============================================================================

#[test]
fn test_create_storage_key() {
    // Test with uint key
    let key1 = create_storage_key(0x20, 12345u32);
    assert_eq!(key1.key[0], 0x20);
    let value = u32::from_le_bytes([key1.key[1], key1.key[2], key1.key[3], key1.key[4]]);
    assert_eq!(value, 12345);

    // Test with byte array key
    let key2 = create_storage_key(0x14, &[0x01, 0x02, 0x03]);
    assert_eq!(key2.key[0], 0x14);
    assert_eq!(&key2.key[1..], &[0x01, 0x02, 0x03]);

    // Test with no key
    let key3 = create_storage_key(0x15, &[]);
    assert_eq!(key3.key.len(), 1);
    assert_eq!(key3.key[0], 0x15);
}

// ============================================================================
// Helper functions
// ============================================================================

fn create_test_engine(block_index: u32) -> ApplicationEngine {
    let mut engine = ApplicationEngine::create(TriggerType::Application, None);

    // Set up block
    let block = Block {
        index: block_index,
        timestamp: 0,
        prev_hash: UInt256::zero(),
        merkle_root: UInt256::zero(),
        next_consensus: UInt160::zero(),
        witness: Default::default(),
        consensus_data: Default::default(),
        transactions: vec![],
    };
    engine.set_persisting_block(block);

    // Initialize hash index state
    let storage_key = StorageKey::new(NativeContract::ledger_id(), vec![12]);
    let hash_index_state = HashIndexState {
        hash: UInt256::zero(),
        index: block_index.saturating_sub(1),
    };
    engine.add_storage_item(storage_key, StorageItem::new(hash_index_state.to_bytes()));

    engine
}

fn get_standby_validators() -> Vec<ECPoint> {
    // Return test standby validators
    vec![
        ECPoint::from_hex("03b209fd4f53a7170ea4444e0cb0a6bb6a53c2bd016926989cf85f9b0fba17a70c")
.unwrap(),
        ECPoint::from_hex("02df48f60e8f3e01c48ff40b9b7f1310d7a8b2a193188befe1c2e3df740e895093")
.unwrap(),
        ECPoint::from_hex("03b8d9d5771d8f513aa0869b9cc8d50986403b78c6da36890638c3d46a5adce04a")
.unwrap(),
    ]
}

fn create_storage_key(prefix: u8, key: u32) -> StorageKey {
    let mut buffer = vec![prefix];
    buffer.extend_from_slice(&key.to_le_bytes());
    StorageKey::new(0, buffer)
}

fn create_storage_key(prefix: u8, key: &[u8]) -> StorageKey {
    let mut buffer = vec![prefix];
    buffer.extend_from_slice(key);
    StorageKey::new(0, buffer)
}

// ============================================================================
// Implementation stubs
// ============================================================================

struct HashIndexState {
    hash: UInt256,
    index: u32,
}

impl HashIndexState {
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.hash.to_bytes());
        bytes.extend_from_slice(&self.index.to_le_bytes());
        bytes
    }
}

impl ApplicationEngine {
    fn create(_trigger: TriggerType, _container: Option<()>) -> Self {
        unimplemented!("ApplicationEngine::create stub")
    }

    fn set_persisting_block(&mut self, _block: Block) {
        unimplemented!("set_persisting_block stub")
    }

    fn set_block_index(&mut self, _index: u32) {
        unimplemented!("set_block_index stub")
    }

    fn add_storage_item(&mut self, _key: StorageKey, _item: StorageItem) {
        unimplemented!("add_storage_item stub")
    }
}

impl GasToken {
    fn total_supply(&self, _engine: &ApplicationEngine) -> u64 {
        unimplemented!("total_supply stub")
    }

    fn balance_of(&self, _engine: &ApplicationEngine, _account: UInt160) -> u64 {
        unimplemented!("balance_of stub")
    }

    fn transfer(
        &self,
        _engine: &mut ApplicationEngine,
        _from: UInt160,
        _to: UInt160,
        _amount: i64,
        _has_signature: bool,
    ) -> bool {
        unimplemented!("transfer stub")
    }

    async fn burn(
        &self,
        _engine: &mut ApplicationEngine,
        _account: UInt160,
        _amount: i64,
    ) -> Result<(), String> {
        unimplemented!("burn stub")
    }
}

impl NeoToken {
    fn transfer(
        &self,
        _engine: &mut ApplicationEngine,
        _from: UInt160,
        _to: UInt160,
        _amount: u64,
        _has_signature: bool,
    ) -> bool {
        unimplemented!("transfer stub")
    }

    fn balance_of(&self, _engine: &ApplicationEngine, _account: UInt160) -> u64 {
        unimplemented!("balance_of stub")
    }

    fn calculate_unclaimed_gas(
        &self,
        _engine: &ApplicationEngine,
        _account: &UInt160,
        _end_block: u32,
    ) -> u64 {
        unimplemented!("calculate_unclaimed_gas stub")
    }

    fn mint(
        &self,
        _engine: &mut ApplicationEngine,
        _account: UInt160,
        _amount: u64,
        _call_on_payment: bool,
    ) {
        unimplemented!("mint stub")
    }
}

impl Contract {
    fn get_bft_address(_validators: &[ECPoint]) -> UInt160 {
        unimplemented!("get_bft_address stub")
    }
}

impl StorageKey {
    fn new(_contract_id: i32, _key: Vec<u8>) -> Self {
        unimplemented!("StorageKey::new stub")
    }
}

impl StorageItem {
    fn new(_value: Vec<u8>) -> Self {
        unimplemented!("StorageItem::new stub")
    }
}

impl NativeContract {
    fn ledger_id() -> i32 {
        unimplemented!("ledger_id stub")
    }
}

impl FromStr for UInt160 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") {
            let bytes = hex::decode(&s[2..]).map_err(|e| e.to_string())?;
            if bytes.len() != 20 {
                return Err("Invalid UInt160 length".to_string());
            }
            let mut arr = [0u8; 20];
            arr.copy_from_slice(&bytes);
            Ok(UInt160::from_bytes(arr))
        } else {
            Err("Invalid UInt160 format".to_string())
        }
    }
}

impl ECPoint {
    fn from_hex(hex: &str) -> Result<Self, String> {
        let bytes = hex::decode(hex).map_err(|e| e.to_string())?;
        Self::from_bytes(&bytes).map_err(|e| e.to_string())
    }
}
