
use neo_core::{UInt160, UInt256};
use neo_cryptography::ECPoint;
use neo_smart_contract::manifest::contract_abi::{ContractParameter, ContractParameterType};
use neo_vm::stack_item::{StackItem, StackItemType};
use serde_json::{json, Value};
use std::collections::HashMap;

// ============================================================================
// ContractParameterValue - A value container
// ============================================================================

/// A contract parameter value container
#[derive(Debug, Clone, PartialEq)]
pub struct ContractParameterValue {
    pub parameter_type: ContractParameterType,
    pub value: ParameterValue,
}

/// The actual value stored in a contract parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Signature(Vec<u8>),
    Boolean(bool),
    Integer(i64),
    Hash160(UInt160),
    Hash256(UInt256),
    ByteArray(Vec<u8>),
    PublicKey(ECPoint),
    String(String),
    Array(Vec<ContractParameterValue>),
    Map(Vec<(ContractParameterValue, ContractParameterValue)>),
    InteropInterface(Box<dyn std::any::Any>),
    Void,
}

impl ContractParameterValue {
    /// Creates a new contract parameter with default value for the given type
    pub fn new(parameter_type: ContractParameterType) -> Result<Self, String> {
        let value = match parameter_type {
            ContractParameterType::Signature => ParameterValue::Signature(vec![0u8; 64]),
            ContractParameterType::Boolean => ParameterValue::Boolean(false),
            ContractParameterType::Integer => ParameterValue::Integer(0),
            ContractParameterType::Hash160 => ParameterValue::Hash160(UInt160::zero()),
            ContractParameterType::Hash256 => ParameterValue::Hash256(UInt256::zero()),
            ContractParameterType::ByteArray => ParameterValue::ByteArray(Vec::new()),
            ContractParameterType::PublicKey => {
                // Use secp256r1 generator point as default
                ParameterValue::PublicKey(
                    ECPoint::from_bytes(&[
                        0x04, // Uncompressed format
                        0x6b, 0x17, 0xd1, 0xf2, 0xe1, 0x2c, 0x42, 0x47, 0xf8, 0xbc, 0xe6, 0xe5,
                        0x63, 0xa4, 0x40, 0xf2, 0x77, 0x03, 0x7d, 0x81, 0x2d, 0xeb, 0x33, 0xa0,
                        0xf4, 0xa1, 0x39, 0x45, 0xd8, 0x98, 0xc2, 0x96, 0x4f, 0xe3, 0x42, 0xe2,
                        0xfe, 0x1a, 0x7f, 0x9b, 0x8e, 0xe7, 0xeb, 0x4a, 0x7c, 0x0f, 0x9e, 0x16,
                        0x2b, 0xce, 0x33, 0x57, 0x6b, 0x31, 0x5e, 0xce, 0xcb, 0xb6, 0x40, 0x68,
                        0x37, 0xbf, 0x51, 0xf5,
                    ])
.unwrap(),
                )
            }
            ContractParameterType::String => ParameterValue::String(String::new()),
            ContractParameterType::Array => ParameterValue::Array(Vec::new()),
            ContractParameterType::Map => ParameterValue::Map(Vec::new()),
            ContractParameterType::Void => {
                return Err("Cannot create parameter of type Void".to_string());
            }
            _ => return Err(format!("Unsupported parameter type: {:?}", parameter_type)),
        };

        Ok(Self {
            parameter_type,
            value,
        })
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> Value {
        match &self.value {
            ParameterValue::Signature(sig) => json!({
                "type": "Signature",
                "value": hex::encode(sig)
            }),
            ParameterValue::Boolean(b) => json!({
                "type": "Boolean",
                "value": b
            }),
            ParameterValue::Integer(i) => json!({
                "type": "Integer",
                "value": i.to_string()
            }),
            ParameterValue::Hash160(h) => json!({
                "type": "Hash160",
                "value": h.to_string()
            }),
            ParameterValue::Hash256(h) => json!({
                "type": "Hash256",
                "value": h.to_string()
            }),
            ParameterValue::ByteArray(bytes) => json!({
                "type": "ByteArray",
                "value": hex::encode(bytes)
            }),
            ParameterValue::PublicKey(pk) => json!({
                "type": "PublicKey",
                "value": hex::encode(pk.to_bytes())
            }),
            ParameterValue::String(s) => json!({
                "type": "String",
                "value": s
            }),
            ParameterValue::Array(arr) => json!({
                "type": "Array",
                "value": arr.iter().map(|p| p.to_json()).collect::<Vec<_>>()
            }),
            ParameterValue::Map(map) => json!({
                "type": "Map",
                "value": map.iter().map(|(k, v)| {
                    json!({
                        "key": k.to_json(),
                        "value": v.to_json()
                    })
                }).collect::<Vec<_>>()
            }),
            ParameterValue::InteropInterface(_) => json!({
                "type": "InteropInterface",
                "value": null
            }),
            ParameterValue::Void => json!({
                "type": "Void",
                "value": null
            }),
        }
    }

    /// Create from JSON representation
    pub fn from_json(json: &Value) -> Result<Self, String> {
        let type_str = json["type"].as_str().ok_or("Missing type field")?;

        let parameter_type = match type_str {
            "Signature" => ContractParameterType::Signature,
            "Boolean" => ContractParameterType::Boolean,
            "Integer" => ContractParameterType::Integer,
            "Hash160" => ContractParameterType::Hash160,
            "Hash256" => ContractParameterType::Hash256,
            "ByteArray" => ContractParameterType::ByteArray,
            "PublicKey" => ContractParameterType::PublicKey,
            "String" => ContractParameterType::String,
            "Array" => ContractParameterType::Array,
            "Map" => ContractParameterType::Map,
            "InteropInterface" => ContractParameterType::InteropInterface,
            "Void" => ContractParameterType::Void,
            _ => return Err(format!("Unknown parameter type: {}", type_str)),
        };

        let value = match parameter_type {
            ContractParameterType::Signature => {
                let hex_str = json["value"].as_str().ok_or("Invalid signature value")?;
                ParameterValue::Signature(hex::decode(hex_str).map_err(|e| e.to_string())?)
            }
            ContractParameterType::Boolean => {
                ParameterValue::Boolean(json["value"].as_bool().ok_or("Invalid boolean value")?)
            }
            ContractParameterType::Integer => {
                let value_str = json["value"].as_str().ok_or("Invalid integer value")?;
                ParameterValue::Integer(
                    value_str
.parse()
.map_err(|e: std::num::ParseIntError| e.to_string())?,
                )
            }
            ContractParameterType::Hash160 => {
                let value_str = json["value"].as_str().ok_or("Invalid Hash160 value")?;
                ParameterValue::Hash160(UInt160::from_str(value_str).map_err(|e| e.to_string())?)
            }
            ContractParameterType::Hash256 => {
                let value_str = json["value"].as_str().ok_or("Invalid Hash256 value")?;
                ParameterValue::Hash256(UInt256::from_str(value_str).map_err(|e| e.to_string())?)
            }
            ContractParameterType::ByteArray => {
                let hex_str = json["value"].as_str().ok_or("Invalid byte array value")?;
                ParameterValue::ByteArray(hex::decode(hex_str).map_err(|e| e.to_string())?)
            }
            ContractParameterType::PublicKey => {
                let hex_str = json["value"].as_str().ok_or("Invalid public key value")?;
                let bytes = hex::decode(hex_str).map_err(|e| e.to_string())?;
                ParameterValue::PublicKey(ECPoint::from_bytes(&bytes).map_err(|e| e.to_string())?)
            }
            ContractParameterType::String => ParameterValue::String(
                json["value"]
.as_str()
.ok_or("Invalid string value")?
.to_string(),
            ),
            ContractParameterType::Array => {
                let arr = json["value"].as_array().ok_or("Invalid array value")?;
                let params: Result<Vec<_>, _> = arr.iter().map(Self::from_json).collect();
                ParameterValue::Array(params?)
            }
            ContractParameterType::Map => {
                let arr = json["value"].as_array().ok_or("Invalid map value")?;
                let mut map = Vec::new();
                for item in arr {
                    let key = Self::from_json(&item["key"])?;
                    let value = Self::from_json(&item["value"])?;
                    map.push((key, value));
                }
                ParameterValue::Map(map)
            }
            _ => {
                return Err(format!(
                    "Unsupported type for deserialization: {:?}",
                    parameter_type
                ))
            }
        };

        Ok(Self {
            parameter_type,
            value,
        })
    }
}

// ============================================================================
// Test implementations to support missing types
// ============================================================================

use std::str::FromStr;

impl FromStr for UInt160 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Simple implementation for testing
        if s.starts_with("0x") {
            let bytes = hex::decode(&s[2..]).map_err(|e| e.to_string())?;
            if bytes.len() != 20 {
                return Err("Invalid UInt160 length".to_string());
            }
            let mut arr = [0u8; 20];
            arr.copy_from_slice(&bytes);
            Ok(UInt160::from_bytes(arr))
        } else {
            Ok(UInt160::zero())
        }
    }
}

impl FromStr for UInt256 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Simple implementation for testing
        if s.starts_with("0x") {
            let bytes = hex::decode(&s[2..]).map_err(|e| e.to_string())?;
            if bytes.len() != 32 {
                return Err("Invalid UInt256 length".to_string());
            }
            let mut arr = [0u8; 32];
            arr.copy_from_slice(&bytes);
            Ok(UInt256::from_bytes(arr))
        } else {
            Ok(UInt256::zero())
        }
    }
}

// ============================================================================
// ============================================================================

#[test]
fn test_generator1() {
    // Default constructor test
    let contract_parameter = ContractParameterValue::new(ContractParameterType::Integer).unwrap();
    assert_eq!(
        contract_parameter.parameter_type,
        ContractParameterType::Integer
    );
    match contract_parameter.value {
        ParameterValue::Integer(0) => {}
        _ => panic!("Expected Integer(0)"),
    }
}

#[test]
fn test_generator2() {
    // Test Signature type
    let param1 = ContractParameterValue::new(ContractParameterType::Signature).unwrap();
    match &param1.value {
        ParameterValue::Signature(sig) => {
            assert_eq!(sig.len(), 64);
            assert_eq!(sig, &vec![0u8; 64]);
        }
        _ => panic!("Expected Signature"),
    }

    // Test Boolean type
    let param2 = ContractParameterValue::new(ContractParameterType::Boolean).unwrap();
    match param2.value {
        ParameterValue::Boolean(false) => {}
        _ => panic!("Expected Boolean(false)"),
    }

    // Test Integer type
    let param3 = ContractParameterValue::new(ContractParameterType::Integer).unwrap();
    match param3.value {
        ParameterValue::Integer(0) => {}
        _ => panic!("Expected Integer(0)"),
    }

    // Test Hash160 type
    let param4 = ContractParameterValue::new(ContractParameterType::Hash160).unwrap();
    match param4.value {
        ParameterValue::Hash160(hash) => {
            assert_eq!(hash, UInt160::zero());
        }
        _ => panic!("Expected Hash160"),
    }

    // Test Hash256 type
    let param5 = ContractParameterValue::new(ContractParameterType::Hash256).unwrap();
    match param5.value {
        ParameterValue::Hash256(hash) => {
            assert_eq!(hash, UInt256::zero());
        }
        _ => panic!("Expected Hash256"),
    }

    // Test ByteArray type
    let param6 = ContractParameterValue::new(ContractParameterType::ByteArray).unwrap();
    match &param6.value {
        ParameterValue::ByteArray(bytes) => {
            assert!(bytes.is_empty());
        }
        _ => panic!("Expected ByteArray"),
    }

    // Test PublicKey type
    let param7 = ContractParameterValue::new(ContractParameterType::PublicKey).unwrap();
    match &param7.value {
        ParameterValue::PublicKey(_pk) => {
            // Should be secp256r1 generator point
        }
        _ => panic!("Expected PublicKey"),
    }

    // Test String type
    let param8 = ContractParameterValue::new(ContractParameterType::String).unwrap();
    match &param8.value {
        ParameterValue::String(s) => {
            assert_eq!(s, "");
        }
        _ => panic!("Expected String"),
    }

    // Test Array type
    let param9 = ContractParameterValue::new(ContractParameterType::Array).unwrap();
    match &param9.value {
        ParameterValue::Array(arr) => {
            assert_eq!(arr.len(), 0);
        }
        _ => panic!("Expected Array"),
    }

    // Test Map type
    let param10 = ContractParameterValue::new(ContractParameterType::Map).unwrap();
    match &param10.value {
        ParameterValue::Map(map) => {
            assert_eq!(map.len(), 0);
        }
        _ => panic!("Expected Map"),
    }

    // Test Void type (should fail)
    assert!(ContractParameterValue::new(ContractParameterType::Void).is_err());
}

#[test]
fn test_from_and_to_json() {
    // Test Signature
    let param1 = ContractParameterValue::new(ContractParameterType::Signature).unwrap();
    let json1 = param1.to_json();
    let from_json1 = ContractParameterValue::from_json(&json1).unwrap();
    assert_eq!(param1, from_json1);

    // Test Boolean
    let param2 = ContractParameterValue::new(ContractParameterType::Boolean).unwrap();
    let json2 = param2.to_json();
    let from_json2 = ContractParameterValue::from_json(&json2).unwrap();
    assert_eq!(param2, from_json2);

    // Test Integer
    let param3 = ContractParameterValue::new(ContractParameterType::Integer).unwrap();
    let json3 = param3.to_json();
    let from_json3 = ContractParameterValue::from_json(&json3).unwrap();
    assert_eq!(param3, from_json3);

    // Test Hash160
    let param4 = ContractParameterValue::new(ContractParameterType::Hash160).unwrap();
    let json4 = param4.to_json();
    let from_json4 = ContractParameterValue::from_json(&json4).unwrap();
    assert_eq!(param4, from_json4);

    // Test Hash256
    let param5 = ContractParameterValue::new(ContractParameterType::Hash256).unwrap();
    let json5 = param5.to_json();
    let from_json5 = ContractParameterValue::from_json(&json5).unwrap();
    assert_eq!(param5, from_json5);

    // Test ByteArray
    let param6 = ContractParameterValue::new(ContractParameterType::ByteArray).unwrap();
    let json6 = param6.to_json();
    let from_json6 = ContractParameterValue::from_json(&json6).unwrap();
    assert_eq!(param6, from_json6);

    // Test String
    let param7 = ContractParameterValue::new(ContractParameterType::String).unwrap();
    let json7 = param7.to_json();
    let from_json7 = ContractParameterValue::from_json(&json7).unwrap();
    assert_eq!(param7, from_json7);

    // Test Array
    let param8 = ContractParameterValue::new(ContractParameterType::Array).unwrap();
    let json8 = param8.to_json();
    let from_json8 = ContractParameterValue::from_json(&json8).unwrap();
    match (&param8.value, &from_json8.value) {
        (ParameterValue::Array(a1), ParameterValue::Array(a2)) => {
            assert_eq!(a1.len(), a2.len());
        }
        _ => panic!("Expected arrays"),
    }

    // Test Map
    let param9 = ContractParameterValue::new(ContractParameterType::Map).unwrap();
    let json9 = param9.to_json();
    let from_json9 = ContractParameterValue::from_json(&json9).unwrap();
    match (&param9.value, &from_json9.value) {
        (ParameterValue::Map(m1), ParameterValue::Map(m2)) => {
            assert_eq!(m1.len(), m2.len());
        }
        _ => panic!("Expected maps"),
    }
}

/// Test parameter type validation
#[test]
fn test_parameter_type_validation() {
    // Test all valid parameter types can be created (except Void)
    let types = vec![
        ContractParameterType::Any,
        ContractParameterType::Boolean,
        ContractParameterType::Integer,
        ContractParameterType::ByteArray,
        ContractParameterType::String,
        ContractParameterType::Hash160,
        ContractParameterType::Hash256,
        ContractParameterType::PublicKey,
        ContractParameterType::Signature,
        ContractParameterType::Array,
        ContractParameterType::Map,
        ContractParameterType::InteropInterface,
    ];

    for param_type in types {
        if param_type != ContractParameterType::Any
            && param_type != ContractParameterType::InteropInterface
        {
            let result = ContractParameterValue::new(param_type.clone());
            assert!(
                result.is_ok(),
                "Failed to create parameter of type {:?}",
                param_type
            );
        }
    }
}

/// Test complex nested structures
#[test]
fn test_complex_nested_structures() {
    // Create an array containing different types
    let mut array = ContractParameterValue::new(ContractParameterType::Array).unwrap();
    if let ParameterValue::Array(ref mut arr) = array.value {
        arr.push(ContractParameterValue::new(ContractParameterType::Integer).unwrap());
        arr.push(ContractParameterValue::new(ContractParameterType::String).unwrap());
        arr.push(ContractParameterValue::new(ContractParameterType::Boolean).unwrap());
    }

    // Test JSON serialization round-trip
    let json = array.to_json();
    let from_json = ContractParameterValue::from_json(&json).unwrap();

    match (&array.value, &from_json.value) {
        (ParameterValue::Array(a1), ParameterValue::Array(a2)) => {
            assert_eq!(a1.len(), a2.len());
            assert_eq!(a1.len(), 3);
        }
        _ => panic!("Expected arrays"),
    }
}

/// Test map operations
#[test]
fn test_map_operations() {
    let mut map = ContractParameterValue::new(ContractParameterType::Map).unwrap();

    if let ParameterValue::Map(ref mut m) = map.value {
        // Add key-value pairs
        let key1 = ContractParameterValue {
            parameter_type: ContractParameterType::String,
            value: ParameterValue::String("key1".to_string()),
        };
        let value1 = ContractParameterValue {
            parameter_type: ContractParameterType::Integer,
            value: ParameterValue::Integer(100),
        };
        m.push((key1, value1));

        let key2 = ContractParameterValue {
            parameter_type: ContractParameterType::String,
            value: ParameterValue::String("key2".to_string()),
        };
        let value2 = ContractParameterValue {
            parameter_type: ContractParameterType::Boolean,
            value: ParameterValue::Boolean(true),
        };
        m.push((key2, value2));
    }

    // Test JSON serialization
    let json = map.to_json();
    let from_json = ContractParameterValue::from_json(&json).unwrap();

    match (&map.value, &from_json.value) {
        (ParameterValue::Map(m1), ParameterValue::Map(m2)) => {
            assert_eq!(m1.len(), m2.len());
            assert_eq!(m1.len(), 2);
        }
        _ => panic!("Expected maps"),
    }
}

/// Test parameter value modifications
#[test]
fn test_parameter_value_modifications() {
    // Test modifying integer value
    let mut param = ContractParameterValue::new(ContractParameterType::Integer).unwrap();
    if let ParameterValue::Integer(ref mut val) = param.value {
        *val = 42;
    }
    match param.value {
        ParameterValue::Integer(42) => {}
        _ => panic!("Expected Integer(42)"),
    }

    // Test modifying string value
    let mut param = ContractParameterValue::new(ContractParameterType::String).unwrap();
    if let ParameterValue::String(ref mut val) = param.value {
        *val = "Hello, Neo!".to_string();
    }
    match &param.value {
        ParameterValue::String(s) => assert_eq!(s, "Hello, Neo!"),
        _ => panic!("Expected String"),
    }

    // Test modifying boolean value
    let mut param = ContractParameterValue::new(ContractParameterType::Boolean).unwrap();
    if let ParameterValue::Boolean(ref mut val) = param.value {
        *val = true;
    }
    match param.value {
        ParameterValue::Boolean(true) => {}
        _ => panic!("Expected Boolean(true)"),
    }
}

/// Test edge cases
#[test]
fn test_edge_cases() {
    // Test empty byte array
    let mut param = ContractParameterValue::new(ContractParameterType::ByteArray).unwrap();
    if let ParameterValue::ByteArray(ref mut bytes) = param.value {
        assert!(bytes.is_empty());
        bytes.extend_from_slice(&[1, 2, 3, 4, 5]);
    }
    match &param.value {
        ParameterValue::ByteArray(bytes) => assert_eq!(bytes, &[1, 2, 3, 4, 5]),
        _ => panic!("Expected ByteArray"),
    }

    // Test large integer values
    let mut param = ContractParameterValue::new(ContractParameterType::Integer).unwrap();
    if let ParameterValue::Integer(ref mut val) = param.value {
        *val = i64::MAX;
    }
    match param.value {
        ParameterValue::Integer(val) => assert_eq!(val, i64::MAX),
        _ => panic!("Expected Integer"),
    }

    // Test nested arrays
    let mut outer_array = ContractParameterValue::new(ContractParameterType::Array).unwrap();
    let inner_array = ContractParameterValue::new(ContractParameterType::Array).unwrap();

    if let ParameterValue::Array(ref mut arr) = outer_array.value {
        arr.push(inner_array);
    }

    let json = outer_array.to_json();
    let from_json = ContractParameterValue::from_json(&json).unwrap();

    match &from_json.value {
        ParameterValue::Array(arr) => {
            assert_eq!(arr.len(), 1);
            match &arr[0].value {
                ParameterValue::Array(inner) => assert_eq!(inner.len(), 0),
                _ => panic!("Expected inner array"),
            }
        }
        _ => panic!("Expected outer array"),
    }
}
