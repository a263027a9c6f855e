
use neo_persistence::DataCache;
use neo_smart_contract::{
    ApplicationEngine, ContractState, Debugger, OpCode, ScriptBuilder, StorageItem, StorageKey,
    TriggerType,
};
use neo_vm::VMState;

// ============================================================================
// Test fixed prices for syscalls
// ============================================================================

#[test]
fn test_application_engine_fixed_prices() {
    let mut snapshot = create_test_snapshot();

    // Test System.Runtime.CheckWitness (price is 1024)
    let syscall_system_runtime_check_witness_hash = vec![0x68, 0xf8, 0x27, 0xec, 0x8c];
    {
        let mut ae = ApplicationEngine::create_with_gas(
            TriggerType::Application,
            None,
            &mut snapshot,
            0,
            Default::default(),
        );
        ae.load_script(&syscall_system_runtime_check_witness_hash);
        assert_eq!(
            0_00001024i64,
            ApplicationEngine::system_runtime_check_witness().fixed_price()
        );
    }

    // Test System.Storage.GetContext (price is 16)
    let syscall_system_storage_get_context_hash = vec![0x68, 0x9b, 0xf6, 0x67, 0xce];
    {
        let mut ae = ApplicationEngine::create_with_gas(
            TriggerType::Application,
            None,
            &mut snapshot,
            0,
            Default::default(),
        );
        ae.load_script(&syscall_system_storage_get_context_hash);
        assert_eq!(
            0_00000016i64,
            ApplicationEngine::system_storage_get_context().fixed_price()
        );
    }

    // Test System.Storage.Get (price is 32768)
    let syscall_system_storage_get_hash = vec![0x68, 0x92, 0x5d, 0xe8, 0x31];
    {
        let mut ae = ApplicationEngine::create_with_gas(
            TriggerType::Application,
            None,
            &mut snapshot,
            0,
            Default::default(),
        );
        ae.load_script(&syscall_system_storage_get_hash);
        assert_eq!(
            32768i64,
            ApplicationEngine::system_storage_get().fixed_price()
        );
    }
}

// ============================================================================
// Test storage pricing for new content
// ============================================================================

/// Put without previous content (should charge per byte used)
#[test]
fn test_application_engine_regular_put() {
    let mut snapshot = create_test_snapshot();
    let key = vec![OpCode::PUSH1 as u8];
    let value = vec![OpCode::PUSH1 as u8];

    let script = create_put_script(&key, &value);
    let contract_state = create_test_contract(&script);

    let skey = create_storage_key(contract_state.id, &key);
    let sitem = StorageItem::new(vec![]);

    snapshot.add_storage(skey, sitem);
    snapshot.add_contract(script_to_hash(&script), contract_state);

    let mut ae = ApplicationEngine::create(
        TriggerType::Application,
        None,
        &mut snapshot,
        Default::default(),
    );
    let mut debugger = Debugger::new(&mut ae);
    ae.load_script(&script);

    debugger.step_into();
    debugger.step_into();
    debugger.step_into();
    let setup_price = ae.fee_consumed();
    debugger.execute();

    assert_eq!(
        ae.storage_price() * value.len() as i64 + (1 << 15) * 30,
        ae.fee_consumed() - setup_price
    );
}

// ============================================================================
// Test storage pricing for reused content
// ============================================================================

/// Reuses the same amount of storage. Should cost basic fee only.
#[test]
fn test_application_engine_reused_storage_full_reuse() {
    let mut snapshot = create_test_snapshot();
    let key = vec![OpCode::PUSH1 as u8];
    let value = vec![OpCode::PUSH1 as u8];

    let script = create_put_script(&key, &value);
    let contract_state = create_test_contract(&script);

    let skey = create_storage_key(contract_state.id, &key);
    let sitem = StorageItem::new(value.clone());

    snapshot.add_storage(skey, sitem);
    snapshot.add_contract(script_to_hash(&script), contract_state);

    let mut ae = ApplicationEngine::create(
        TriggerType::Application,
        None,
        &mut snapshot,
        Default::default(),
    );
    let mut debugger = Debugger::new(&mut ae);
    ae.load_script(&script);

    debugger.step_into();
    debugger.step_into();
    debugger.step_into();
    let setup_price = ae.fee_consumed();
    debugger.execute();

    assert_eq!(
        1 * ae.storage_price() + (1 << 15) * 30,
        ae.fee_consumed() - setup_price
    );
}

/// Reuses one byte and allocates a new one. Should only pay for the additional byte.
#[test]
fn test_application_engine_reused_storage_partial_reuse() {
    let mut snapshot = create_test_snapshot();
    let key = vec![OpCode::PUSH1 as u8];
    let old_value = vec![OpCode::PUSH1 as u8];
    let value = vec![OpCode::PUSH1 as u8, OpCode::PUSH1 as u8];

    let script = create_put_script(&key, &value);
    let contract_state = create_test_contract(&script);

    let skey = create_storage_key(contract_state.id, &key);
    let sitem = StorageItem::new(old_value.clone());

    snapshot.add_storage(skey, sitem);
    snapshot.add_contract(script_to_hash(&script), contract_state);

    let mut ae = ApplicationEngine::create(
        TriggerType::Application,
        None,
        &mut snapshot,
        Default::default(),
    );
    let mut debugger = Debugger::new(&mut ae);
    ae.load_script(&script);

    debugger.step_into();
    debugger.step_into();
    debugger.step_into();
    let setup_price = ae.fee_consumed();
    debugger.step_into();
    debugger.step_into();

    let expected_cost = (1 + (old_value.len() / 4) + value.len() - old_value.len()) as i64
        * ae.storage_price()
        + (1 << 15) * 30;
    assert_eq!(expected_cost, ae.fee_consumed() - setup_price);
}

/// Use put for the same key twice. Should pay basic fee for the second put.
#[test]
fn test_application_engine_reused_storage_partial_reuse_twice() {
    let mut snapshot = create_test_snapshot();
    let key = vec![OpCode::PUSH1 as u8];
    let old_value = vec![OpCode::PUSH1 as u8];
    let value = vec![OpCode::PUSH1 as u8, OpCode::PUSH1 as u8];

    let script = create_multiple_put_script(&key, &value, 2);
    let contract_state = create_test_contract(&script);

    let skey = create_storage_key(contract_state.id, &key);
    let sitem = StorageItem::new(old_value.clone());

    snapshot.add_storage(skey, sitem.clone());
    snapshot.add_contract(script_to_hash(&script), contract_state);

    let mut ae = ApplicationEngine::create(
        TriggerType::Application,
        None,
        &mut snapshot,
        Default::default(),
    );
    let mut debugger = Debugger::new(&mut ae);
    ae.load_script(&script);

    // Step through first put operation
    debugger.step_into(); // push value
    debugger.step_into(); // push key
    debugger.step_into(); // syscall Storage.GetContext
    debugger.step_into(); // syscall Storage.Put

    // Step through second put operation setup
    debugger.step_into(); // push value
    debugger.step_into(); // push key
    debugger.step_into(); // syscall Storage.GetContext

    let setup_price = ae.fee_consumed();
    debugger.step_into(); // syscall Storage.Put

    assert_eq!(
        (sitem.value().len() / 4 + 1) as i64 * ae.storage_price() + (1 << 15) * 30,
        ae.fee_consumed() - setup_price
    );
}

// ============================================================================
// Test edge cases
// ============================================================================

/// Test storage pricing with empty values
#[test]
fn test_storage_pricing_empty_values() {
    let mut snapshot = create_test_snapshot();
    let key = vec![0x01];
    let value = vec![];

    let script = create_put_script(&key, &value);
    let contract_state = create_test_contract(&script);

    let skey = create_storage_key(contract_state.id, &key);
    let sitem = StorageItem::new(vec![]);

    snapshot.add_storage(skey, sitem);
    snapshot.add_contract(script_to_hash(&script), contract_state);

    let mut ae = ApplicationEngine::create(
        TriggerType::Application,
        None,
        &mut snapshot,
        Default::default(),
    );
    let mut debugger = Debugger::new(&mut ae);
    ae.load_script(&script);

    debugger.step_into();
    debugger.step_into();
    debugger.step_into();
    let setup_price = ae.fee_consumed();
    debugger.execute();

    // Should only pay basic fee for empty value
    assert_eq!(
        ae.storage_price() + (1 << 15) * 30,
        ae.fee_consumed() - setup_price
    );
}

/// Test storage pricing with large values
#[test]
fn test_storage_pricing_large_values() {
    let mut snapshot = create_test_snapshot();
    let key = vec![0x01];
    let value = vec![0xFF; 1000]; // Large value

    let script = create_put_script(&key, &value);
    let contract_state = create_test_contract(&script);

    let skey = create_storage_key(contract_state.id, &key);
    let sitem = StorageItem::new(vec![]);

    snapshot.add_storage(skey, sitem);
    snapshot.add_contract(script_to_hash(&script), contract_state);

    let mut ae = ApplicationEngine::create(
        TriggerType::Application,
        None,
        &mut snapshot,
        Default::default(),
    );
    let mut debugger = Debugger::new(&mut ae);
    ae.load_script(&script);

    debugger.step_into();
    debugger.step_into();
    debugger.step_into();
    let setup_price = ae.fee_consumed();
    debugger.execute();

    assert_eq!(
        ae.storage_price() * value.len() as i64 + (1 << 15) * 30,
        ae.fee_consumed() - setup_price
    );
}

// ============================================================================
// Helper functions
// ============================================================================

fn create_test_snapshot() -> DataCache {
    DataCache::new()
}

fn create_put_script(key: &[u8], value: &[u8]) -> Vec<u8> {
    let mut script_builder = ScriptBuilder::new();
    script_builder.emit_push(value);
    script_builder.emit_push(key);
    script_builder.emit_syscall(ApplicationEngine::system_storage_get_context().hash());
    script_builder.emit_syscall(ApplicationEngine::system_storage_put().hash());
    script_builder.to_bytes()
}

fn create_multiple_put_script(key: &[u8], value: &[u8], times: usize) -> Vec<u8> {
    let mut script_builder = ScriptBuilder::new();

    for _ in 0..times {
        script_builder.emit_push(value);
        script_builder.emit_push(key);
        script_builder.emit_syscall(ApplicationEngine::system_storage_get_context().hash());
        script_builder.emit_syscall(ApplicationEngine::system_storage_put().hash());
    }

    script_builder.to_bytes()
}

fn create_test_contract(script: &[u8]) -> ContractState {
    ContractState {
        id: 1,
        script: script.to_vec(),
        manifest: Default::default(),
    }
}

fn create_storage_key(contract_id: i32, key: &[u8]) -> StorageKey {
    StorageKey::new(contract_id, key.to_vec())
}

fn script_to_hash(script: &[u8]) -> [u8; 20] {
    // Simple hash implementation for testing
    let mut hash = [0u8; 20];
    for (i, &byte) in script.iter().take(20).enumerate() {
        hash[i] = byte;
    }
    hash
}

// ============================================================================
// Implementation stubs
// ============================================================================

mod neo_smart_contract {
    use super::*;

    pub struct ApplicationEngine {
        fee_consumed: i64,
        storage_price: i64,
    }

    impl ApplicationEngine {
        pub fn create(
            _trigger: TriggerType,
            _container: Option<&Transaction>,
            _snapshot: &mut DataCache,
            _settings: ProtocolSettings,
        ) -> Self {
            ApplicationEngine {
                fee_consumed: 0,
                storage_price: 1000,
            }
        }

        pub fn create_with_gas(
            _trigger: TriggerType,
            _container: Option<&Transaction>,
            _snapshot: &mut DataCache,
            _gas: i64,
            _settings: ProtocolSettings,
        ) -> Self {
            ApplicationEngine {
                fee_consumed: 0,
                storage_price: 1000,
            }
        }

        pub fn load_script(&mut self, _script: &[u8]) {
            // Stub implementation
        }

        pub fn fee_consumed(&self) -> i64 {
            self.fee_consumed
        }

        pub fn storage_price(&self) -> i64 {
            self.storage_price
        }

        pub fn system_runtime_check_witness() -> InteropDescriptor {
            InteropDescriptor::new(0x1234, 0_00001024)
        }

        pub fn system_storage_get_context() -> InteropDescriptor {
            InteropDescriptor::new(0x5678, 0_00000016)
        }

        pub fn system_storage_get() -> InteropDescriptor {
            InteropDescriptor::new(0x9ABC, 32768)
        }

        pub fn system_storage_put() -> InteropDescriptor {
            InteropDescriptor::new(0xDEF0, 0) // Variable price
        }
    }

    pub struct InteropDescriptor {
        hash: u32,
        fixed_price: i64,
    }

    impl InteropDescriptor {
        pub fn new(hash: u32, fixed_price: i64) -> Self {
            InteropDescriptor { hash, fixed_price }
        }

        pub fn hash(&self) -> u32 {
            self.hash
        }

        pub fn fixed_price(&self) -> i64 {
            self.fixed_price
        }
    }

    pub struct ScriptBuilder {
        script: Vec<u8>,
    }

    impl ScriptBuilder {
        pub fn new() -> Self {
            ScriptBuilder { script: Vec::new() }
        }

        pub fn emit_push(&mut self, _data: &[u8]) {
            // Stub implementation
        }

        pub fn emit_syscall(&mut self, _hash: u32) {
            // Stub implementation
        }

        pub fn to_bytes(&self) -> Vec<u8> {
            self.script.clone()
        }
    }

    pub struct Debugger<'a> {
        engine: &'a mut ApplicationEngine,
    }

    impl<'a> Debugger<'a> {
        pub fn new(engine: &'a mut ApplicationEngine) -> Self {
            Debugger { engine }
        }

        pub fn step_into(&mut self) {
            self.engine.fee_consumed += 100; // Simulate step cost
        }

        pub fn execute(&mut self) {
            self.engine.fee_consumed += 1000; // Simulate execution cost
        }
    }

    pub struct ContractState {
        pub id: i32,
        pub script: Vec<u8>,
        pub manifest: ContractManifest,
    }

    #[derive(Default)]
    pub struct ContractManifest;

    pub struct StorageKey {
        contract_id: i32,
        key: Vec<u8>,
    }

    impl StorageKey {
        pub fn new(contract_id: i32, key: Vec<u8>) -> Self {
            StorageKey { contract_id, key }
        }
    }

    pub struct StorageItem {
        value: Vec<u8>,
    }

    impl StorageItem {
        pub fn new(value: Vec<u8>) -> Self {
            StorageItem { value }
        }

        pub fn value(&self) -> &[u8] {
            &self.value
        }
    }

    #[derive(Clone, Copy)]
    pub enum TriggerType {
        Application,
        Verification,
    }

    #[derive(Clone, Copy)]
    pub enum OpCode {
        PUSH1 = 0x51,
    }

    #[derive(Default)]
    pub struct ProtocolSettings;

    pub struct Transaction;
}

mod neo_persistence {
    use super::neo_smart_contract::{ContractState, StorageItem, StorageKey};

    pub struct DataCache;

    impl DataCache {
        pub fn new() -> Self {
            DataCache
        }

        pub fn add_storage(&mut self, _key: StorageKey, _item: StorageItem) {
            // Stub implementation
        }

        pub fn add_contract(&mut self, _hash: [u8; 20], _contract: ContractState) {
            // Stub implementation
        }
    }
}

mod neo_vm {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum VMState {
        NONE,
        HALT,
        FAULT,
        BREAK,
    }
}
