
use neo_core::{UInt160, UInt256};
use neo_cryptography::{ECCurve, ECPoint, KeyPair};
use neo_persistence::DataCache;
use neo_smart_contract::{
    ApplicationEngine, CallFlags, Contract, Helper, MethodToken, NefFile, PolicyContract, Script,
    ScriptBuilder, TriggerType,
};
use neo_vm::VMState;
use neo_wallets::{Transaction, Witness};
use rand::Rng;

// ============================================================================
// Test contract hash calculation
// ============================================================================

#[test]
fn test_get_contract_hash() {
    let nef = NefFile {
        compiler: "test".to_string(),
        source: String::new(),
        tokens: vec![],
        script: vec![1, 2, 3],
        checksum: 0,
    };
    let nef_checksum = NefFile::compute_checksum(&nef);

    // Test with zero sender
    let hash1 = Helper::get_contract_hash(&UInt160::zero(), nef_checksum, "");
    assert_eq!(
        "0x9b9628e4f1611af90e761eea8cc21372380c74b6",
        hash1.to_string()
    );

    // Test with specific sender
    let sender = UInt160::parse("0xa400ff00ff00ff00ff00ff00ff00ff00ff00ff01").unwrap();
    let hash2 = Helper::get_contract_hash(&sender, nef_checksum, "");
    assert_eq!(
        "0x66eec404d86b918d084e62a29ac9990e3b6f4286",
        hash2.to_string()
    );
}

// ============================================================================
// Test multi-signature contract detection
// ============================================================================

#[test]
fn test_is_multi_sig_contract() {
    // Test case 1: Invalid multi-sig script
    let case1 = vec![
        0, 2, 12, 33, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221,
        221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221, 221,
        12, 33, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
        255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
        0,
    ];
    assert!(!Helper::is_multi_sig_contract(&case1));

    // Test case 2: Another invalid multi-sig script
    let case2 = vec![
        18, 12, 33, 2, 111, 240, 59, 148, 146, 65, 206, 29, 173, 212, 53, 25, 230, 150, 14, 10,
        133, 180, 26, 105, 160, 92, 50, 129, 3, 170, 43, 206, 21, 148, 202, 22, 12, 33, 2, 111,
        240, 59, 148, 146, 65, 206, 29, 173, 212, 53, 25, 230, 150, 14, 10, 133, 180, 26, 105, 160,
        92, 50, 129, 3, 170, 43, 206, 21, 148, 202, 22, 18,
    ];
    assert!(!Helper::is_multi_sig_contract(&case2));
}

#[test]
fn test_is_multi_sig_contract_wrong_curve() {
    // Points on Koblitz curve that can't be restored on Secp256r1
    let pubs = vec![
        ECPoint::parse("047b4e72ae854b6a0955b3e02d92651ab7fa641a936066776ad438f95bb674a269a63ff98544691663d91a6cfcd215831f01bfb7a226363a6c5c67ef14541dba07", ECCurve::Secp256k1),
        ECPoint::parse("040486468683c112125978ffe876245b2006bfe739aca8539b67335079262cb27ad0dedc9e5583f99b61c6f46bf80b97eaec3654b87add0e5bd7106c69922a229d", ECCurve::Secp256k1),
        ECPoint::parse("040d26fc2ad3b1aae20f040b5f83380670f8ef5c2b2ac921ba3bdd79fd0af0525177715fd4370b1012ddd10579698d186ab342c223da3e884ece9cab9b6638c7bb", ECCurve::Secp256k1),
        ECPoint::parse("04a114d72fe2997cdac67427b6f39ea08ed46213c8bb6a461bbac2a6212cf43fb510f8adf59b0b087a7859f96d0288e5e94800eab8388f30f03f92b2e4d807dfce", ECCurve::Secp256k1),
    ];

    let m = 3;

    // Script with wrong curve points
    let bad_script = Contract::create_multi_sig_redeem_script(m, &pubs);

    // Should fail when enforcing point decoding
    let (is_multi_sig, _, _) = Helper::is_multi_sig_contract_with_points(&bad_script);
    assert!(!is_multi_sig);

    // Should pass when not enforcing point decoding
    assert!(Helper::is_multi_sig_contract(&bad_script));

    // Exclude the first special point
    let good_pubs = &pubs[1..];
    let good_script = Contract::create_multi_sig_redeem_script(m, good_pubs);

    // Both methods should return true
    let (is_multi_sig, _, _) = Helper::is_multi_sig_contract_with_points(&good_script);
    assert!(is_multi_sig);
    assert!(Helper::is_multi_sig_contract(&good_script));
}

#[test]
fn test_is_signature_contract_wrong_curve() {
    // Special point on Koblitz curve
    let pub_key = ECPoint::parse(
        "047b4e72ae854b6a0955b3e02d92651ab7fa641a936066776ad438f95bb674a269a63ff98544691663d91a6cfcd215831f01bfb7a226363a6c5c67ef14541dba07",
        ECCurve::Secp256k1,
    );
    let script = Contract::create_signature_redeem_script(&pub_key);

    // Should pass since it doesn't perform ECPoint decoding
    assert!(Helper::is_signature_contract(&script));
}

// ============================================================================
// Test contract cost calculations
// ============================================================================

#[test]
fn test_signature_contract_cost() {
    let mut snapshot = create_test_snapshot();
    let key = create_test_key();
    let contract = Contract::create_signature_contract(&key.public_key());

    let mut tx = create_test_transaction();
    tx.signers[0].account = contract.script_hash();

    // Create invocation script with signature
    let mut invocation_script = ScriptBuilder::new();
    let signature = sign_transaction(&tx, &key);
    invocation_script.emit_push(signature);

    tx.witnesses = vec![Witness {
        invocation_script: invocation_script.to_bytes(),
        verification_script: contract.script.clone(),
    }];

    // Create application engine
    let mut engine = ApplicationEngine::create(
        TriggerType::Verification,
        Some(&tx),
        &mut snapshot,
        Default::default(),
    );

    engine.load_script(&contract.script);
    engine.load_script_with_config(&Script::new(invocation_script.to_bytes(), true), |state| {
        state.call_flags = CallFlags::None
    });

    assert_eq!(VMState::HALT, engine.execute());
    assert!(engine.result_stack.pop().get_boolean());

    let expected_cost =
        Helper::signature_contract_cost() * PolicyContract::default_exec_fee_factor();
    assert_eq!(expected_cost, engine.fee_consumed);
}

#[test]
fn test_multi_signature_contract_cost() {
    let mut snapshot = create_test_snapshot();
    let key = create_test_key();
    let contract = Contract::create_multi_sig_contract(1, &[key.public_key()]);

    let mut tx = create_test_transaction();
    tx.signers[0].account = contract.script_hash();

    // Create invocation script with signature
    let mut invocation_script = ScriptBuilder::new();
    let signature = sign_transaction(&tx, &key);
    invocation_script.emit_push(signature);

    // Create application engine
    let mut engine = ApplicationEngine::create(
        TriggerType::Verification,
        Some(&tx),
        &mut snapshot,
        Default::default(),
    );

    engine.load_script(&contract.script);
    engine.load_script_with_config(&Script::new(invocation_script.to_bytes(), true), |state| {
        state.call_flags = CallFlags::None
    });

    assert_eq!(VMState::HALT, engine.execute());
    assert!(engine.result_stack.pop().get_boolean());

    let expected_cost =
        Helper::multi_signature_contract_cost(1, 1) * PolicyContract::default_exec_fee_factor();
    assert_eq!(expected_cost, engine.fee_consumed);
}

// ============================================================================
// Test edge cases and additional scenarios
// ============================================================================

/// Test contract hash with different manifest names
#[test]
fn test_get_contract_hash_with_manifest() {
    let nef = NefFile {
        compiler: "test".to_string(),
        source: String::new(),
        tokens: vec![],
        script: vec![1, 2, 3, 4, 5],
        checksum: 0,
    };
    let nef_checksum = NefFile::compute_checksum(&nef);

    let sender = UInt160::zero();

    // Test with different manifest names
    let hash1 = Helper::get_contract_hash(&sender, nef_checksum, "");
    let hash2 = Helper::get_contract_hash(&sender, nef_checksum, "TestContract");
    let hash3 = Helper::get_contract_hash(&sender, nef_checksum, "AnotherContract");

    // All should be different
    assert_ne!(hash1, hash2);
    assert_ne!(hash2, hash3);
    assert_ne!(hash1, hash3);
}

/// Test signature contract detection with various scripts
#[test]
fn test_is_signature_contract_variations() {
    let key = create_test_key();

    // Valid signature contract
    let valid_script = Contract::create_signature_redeem_script(&key.public_key());
    assert!(Helper::is_signature_contract(&valid_script));

    // Invalid scripts
    let invalid_scripts = vec![
        vec![],                 // Empty script
        vec![0x01, 0x02, 0x03], // Random bytes
        vec![0x0C, 0x21],       // Incomplete push
    ];

    for script in invalid_scripts {
        assert!(!Helper::is_signature_contract(&script));
    }
}

/// Test multi-sig contract with various configurations
#[test]
fn test_multi_sig_contract_configurations() {
    let keys = (0..5).map(|_| create_test_key()).collect::<Vec<_>>();
    let public_keys = keys.iter().map(|k| k.public_key()).collect::<Vec<_>>();

    // Test different m-of-n configurations
    let test_cases = vec![(1, 1), (1, 3), (2, 3), (3, 5)];

    for (m, n) in test_cases {
        let script = Contract::create_multi_sig_redeem_script(m, &public_keys[..n]);
        assert!(Helper::is_multi_sig_contract(&script));

        // Test cost calculation
        let cost = Helper::multi_signature_contract_cost(m, n);
        assert!(cost > 0);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn create_test_snapshot() -> DataCache {
    DataCache::new()
}

fn create_test_key() -> KeyPair {
    let mut rng = rand::thread_rng();
    let private_key: [u8; 32] = rng.gen();
    KeyPair::new(private_key)
}

fn create_test_transaction() -> Transaction {
    Transaction::new()
}

fn sign_transaction(_tx: &Transaction, _key: &KeyPair) -> Vec<u8> {
    // Stub implementation
    vec![0u8; 64]
}

// ============================================================================
// Implementation stubs
// ============================================================================

mod neo_smart_contract {
    use super::*;

    pub struct Helper;

    impl Helper {
        pub fn get_contract_hash(
            _sender: &UInt160,
            _nef_checksum: u32,
            _manifest: &str,
        ) -> UInt160 {
            unimplemented!("get_contract_hash stub")
        }

        pub fn is_multi_sig_contract(_script: &[u8]) -> bool {
            unimplemented!("is_multi_sig_contract stub")
        }

        pub fn is_multi_sig_contract_with_points(_script: &[u8]) -> (bool, usize, Vec<ECPoint>) {
            unimplemented!("is_multi_sig_contract_with_points stub")
        }

        pub fn is_signature_contract(_script: &[u8]) -> bool {
            unimplemented!("is_signature_contract stub")
        }

        pub fn signature_contract_cost() -> i64 {
            unimplemented!("signature_contract_cost stub")
        }

        pub fn multi_signature_contract_cost(_m: usize, _n: usize) -> i64 {
            unimplemented!("multi_signature_contract_cost stub")
        }
    }

    pub struct NefFile {
        pub compiler: String,
        pub source: String,
        pub tokens: Vec<MethodToken>,
        pub script: Vec<u8>,
        pub checksum: u32,
    }

    impl NefFile {
        pub fn compute_checksum(_nef: &NefFile) -> u32 {
            unimplemented!("compute_checksum stub")
        }
    }

    pub struct Contract;

    impl Contract {
        pub fn create_signature_contract(_pubkey: &ECPoint) -> ContractInfo {
            unimplemented!("create_signature_contract stub")
        }

        pub fn create_multi_sig_contract(_m: usize, _pubkeys: &[ECPoint]) -> ContractInfo {
            unimplemented!("create_multi_sig_contract stub")
        }

        pub fn create_signature_redeem_script(_pubkey: &ECPoint) -> Vec<u8> {
            unimplemented!("create_signature_redeem_script stub")
        }

        pub fn create_multi_sig_redeem_script(_m: usize, _pubkeys: &[ECPoint]) -> Vec<u8> {
            unimplemented!("create_multi_sig_redeem_script stub")
        }
    }

    pub struct ContractInfo {
        pub script: Vec<u8>,
    }

    impl ContractInfo {
        pub fn script_hash(&self) -> UInt160 {
            unimplemented!("script_hash stub")
        }
    }

    pub struct MethodToken;

    pub struct ApplicationEngine;

    impl ApplicationEngine {
        pub fn create(
            _trigger: TriggerType,
            _container: Option<&Transaction>,
            _snapshot: &mut DataCache,
            _settings: ProtocolSettings,
        ) -> Self {
            unimplemented!("create stub")
        }

        pub fn load_script(&mut self, _script: &[u8]) {
            unimplemented!("load_script stub")
        }

        pub fn load_script_with_config<F>(&mut self, _script: &Script, _config: F)
        where
            F: FnOnce(&mut ExecutionState),
        {
            unimplemented!("load_script_with_config stub")
        }

        pub fn execute(&mut self) -> VMState {
            unimplemented!("execute stub")
        }

        pub fn result_stack(&mut self) -> &mut ExecutionStack {
            unimplemented!("result_stack stub")
        }

        pub fn fee_consumed(&self) -> i64 {
            unimplemented!("fee_consumed stub")
        }
    }

    pub struct Script {
        data: Vec<u8>,
        push_only: bool,
    }

    impl Script {
        pub fn new(data: Vec<u8>, push_only: bool) -> Self {
            Script { data, push_only }
        }
    }

    pub struct ScriptBuilder {
        script: Vec<u8>,
    }

    impl ScriptBuilder {
        pub fn new() -> Self {
            ScriptBuilder { script: Vec::new() }
        }

        pub fn emit_push(&mut self, _data: Vec<u8>) {
            unimplemented!("emit_push stub")
        }

        pub fn to_bytes(&self) -> Vec<u8> {
            self.script.clone()
        }
    }

    pub struct ExecutionStack;

    impl ExecutionStack {
        pub fn pop(&mut self) -> StackItem {
            unimplemented!("pop stub")
        }
    }

    pub struct StackItem;

    impl StackItem {
        pub fn get_boolean(&self) -> bool {
            unimplemented!("get_boolean stub")
        }
    }

    pub struct ExecutionState {
        pub call_flags: CallFlags,
    }

    pub struct PolicyContract;

    impl PolicyContract {
        pub fn default_exec_fee_factor() -> i64 {
            unimplemented!("default_exec_fee_factor stub")
        }
    }

    #[derive(Clone, Copy)]
    pub enum TriggerType {
        Application,
        Verification,
    }

    #[derive(Clone, Copy)]
    pub enum CallFlags {
        None,
        All,
    }

    #[derive(Default)]
    pub struct ProtocolSettings;
}

mod neo_wallets {
    use neo_core::UInt160;

    pub struct Transaction {
        pub signers: Vec<Signer>,
        pub witnesses: Vec<Witness>,
    }

    impl Transaction {
        pub fn new() -> Self {
            Transaction {
                signers: vec![Signer::default()],
                witnesses: vec![],
            }
        }
    }

    #[derive(Default)]
    pub struct Signer {
        pub account: UInt160,
    }

    pub struct Witness {
        pub invocation_script: Vec<u8>,
        pub verification_script: Vec<u8>,
    }
}

mod neo_persistence {
    pub struct DataCache;

    impl DataCache {
        pub fn new() -> Self {
            DataCache
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

mod neo_cryptography {
    #[derive(Clone)]
    pub struct KeyPair {
        private_key: [u8; 32],
    }

    impl KeyPair {
        pub fn new(private_key: [u8; 32]) -> Self {
            KeyPair { private_key }
        }

        pub fn public_key(&self) -> ECPoint {
            ECPoint::default()
        }
    }

    #[derive(Default, Clone)]
    pub struct ECPoint {
        data: Vec<u8>,
    }

    impl ECPoint {
        pub fn parse(_s: &str, _curve: ECCurve) -> Self {
            ECPoint::default()
        }
    }

    #[derive(Clone, Copy)]
    pub enum ECCurve {
        Secp256r1,
        Secp256k1,
    }
}
