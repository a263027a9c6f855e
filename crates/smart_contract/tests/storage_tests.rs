
use neo_smart_contract::{StorageItem, StorageKey};
use std::collections::HashMap;

// ============================================================================
// Test StorageKey implicit conversions
// ============================================================================

#[test]
fn test_implicit() {
    // Test data
    let key_data = vec![0x00, 0x00, 0x00, 0x00, 0x12];

    // Test implicit conversions
    let key_a = StorageKey::from_bytes(&key_data);
    let key_b = StorageKey::from_memory(&key_data);
    let key_c = StorageKey::from_span(&key_data);

    assert_eq!(0, key_a.id());
    assert_eq!(key_a.id(), key_b.id());
    assert_eq!(key_b.id(), key_c.id());

    assert_eq!(vec![0x12], key_a.key().to_vec());
    assert_eq!(key_a.key().to_vec(), key_b.key().to_vec());
    assert_eq!(key_b.key().to_vec(), key_c.key().to_vec());
}

// ============================================================================
// Test StorageKey functionality
// ============================================================================

#[test]
fn test_storage_key() {
    // Test data
    let key_data = vec![0x00, 0x00, 0x00, 0x00, 0x12];

    // Test implicit conversion from byte[] to StorageKey
    let storage_key_from_array = StorageKey::from_bytes(&key_data);
    assert_eq!(0, storage_key_from_array.id());
    assert_eq!(
        key_data[4..].to_vec(),
        storage_key_from_array.key().to_vec()
    );

    // Test implicit conversion from ReadOnlyMemory<byte> to StorageKey
    let storage_key_from_memory = StorageKey::from_memory(&key_data);
    assert_eq!(0, storage_key_from_memory.id());
    assert_eq!(
        key_data[4..].to_vec(),
        storage_key_from_memory.key().to_vec()
    );

    // Test CreateSearchPrefix method
    let prefix = vec![0xAA];
    let search_prefix = StorageKey::create_search_prefix(0, &prefix);
    let mut expected_prefix = Vec::new();
    expected_prefix.extend_from_slice(&0i32.to_le_bytes());
    expected_prefix.extend_from_slice(&prefix);
    assert_eq!(expected_prefix, search_prefix);

    // Test Equals method
    let storage_key1 = StorageKey::new(0, key_data[4..].to_vec());
    let storage_key2 = StorageKey::new(0, key_data[4..].to_vec());
    let storage_key_different_id = StorageKey::new(1, key_data[4..].to_vec());
    let storage_key_different_key = StorageKey::new(0, vec![0x04]);

    assert_eq!(storage_key1, storage_key2);
    assert_ne!(storage_key1, storage_key_different_id);
    assert_ne!(storage_key1, storage_key_different_key);

    // Test memory isolation
    // Make sure we create copies of the memory in StorageKey class
    // WE DO NOT WANT DATA REFERENCED TO OVER THE MEMORY REGION
    let mut data_copy = vec![0xff, 0xff, 0xff, 0xfe, 0xff];
    let mut storage_key2 = StorageKey::from_bytes(&data_copy);
    assert_eq!(vec![0xff], storage_key2.key().to_vec());
    assert_ne!(storage_key1, storage_key2);

    // Modify the original data
    data_copy.copy_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x01]);
    // StorageKey should still have the original value (data isolation)
    assert_eq!(vec![0xff], storage_key2.key().to_vec());

    // This shows data isn't referenced
    let original_key = storage_key1.key().to_vec();
    // Modifying data_copy shouldn't affect storage_key1
    assert_ne!(original_key, data_copy[4..].to_vec());
}

// ============================================================================
// Test StorageItem functionality
// ============================================================================

#[test]
fn test_storage_item() {
    // Test data
    let key_data = vec![0x00, 0x00, 0x00, 0x00, 0x12];
    let big_integer = 1234567890i64;

    // Test implicit conversion from byte[] to StorageItem
    let storage_item_from_array = StorageItem::from_bytes(key_data.clone());
    assert_eq!(key_data, storage_item_from_array.value().to_vec());

    // Test implicit conversion from BigInteger to StorageItem
    let storage_item_from_big_integer = StorageItem::from_big_integer(big_integer);
    assert_eq!(big_integer, storage_item_from_big_integer.to_big_integer());
}

// ============================================================================
// Test edge cases and additional functionality
// ============================================================================

/// Test StorageKey with empty data
#[test]
fn test_storage_key_empty() {
    let empty_data = vec![0x00, 0x00, 0x00, 0x00];
    let storage_key = StorageKey::from_bytes(&empty_data);

    assert_eq!(0, storage_key.id());
    assert_eq!(Vec::<u8>::new(), storage_key.key().to_vec());
}

/// Test StorageKey with large ID
#[test]
fn test_storage_key_large_id() {
    let data = vec![0xFF, 0xFF, 0xFF, 0x7F, 0x12, 0x34]; // Max positive i32
    let storage_key = StorageKey::from_bytes(&data);

    assert_eq!(0x7FFFFFFF, storage_key.id());
    assert_eq!(vec![0x12, 0x34], storage_key.key().to_vec());
}

/// Test StorageKey with negative ID
#[test]
fn test_storage_key_negative_id() {
    let data = vec![0xFF, 0xFF, 0xFF, 0xFF, 0x12, 0x34]; // -1 as i32
    let storage_key = StorageKey::from_bytes(&data);

    assert_eq!(-1, storage_key.id());
    assert_eq!(vec![0x12, 0x34], storage_key.key().to_vec());
}

/// Test StorageItem with various data types
#[test]
fn test_storage_item_types() {
    // Test with empty array
    let empty_item = StorageItem::from_bytes(vec![]);
    assert_eq!(Vec::<u8>::new(), empty_item.value().to_vec());

    // Test with single byte
    let single_byte_item = StorageItem::from_bytes(vec![0xFF]);
    assert_eq!(vec![0xFF], single_byte_item.value().to_vec());

    // Test with large array
    let large_data = vec![0x42; 1000];
    let large_item = StorageItem::from_bytes(large_data.clone());
    assert_eq!(large_data, large_item.value().to_vec());

    // Test with zero big integer
    let zero_item = StorageItem::from_big_integer(0);
    assert_eq!(0, zero_item.to_big_integer());

    // Test with negative big integer
    let negative_item = StorageItem::from_big_integer(-42);
    assert_eq!(-42, negative_item.to_big_integer());

    // Test with large positive big integer
    let large_positive = 9223372036854775807i64; // i64::MAX
    let large_item = StorageItem::from_big_integer(large_positive);
    assert_eq!(large_positive, large_item.to_big_integer());
}

/// Test StorageKey search prefix functionality
#[test]
fn test_storage_key_search_prefix() {
    // Test with empty prefix
    let empty_prefix = StorageKey::create_search_prefix(42, &[]);
    assert_eq!(42i32.to_le_bytes().to_vec(), empty_prefix);

    // Test with single byte prefix
    let single_prefix = StorageKey::create_search_prefix(100, &[0xAB]);
    let mut expected = Vec::new();
    expected.extend_from_slice(&100i32.to_le_bytes());
    expected.push(0xAB);
    assert_eq!(expected, single_prefix);

    // Test with multi-byte prefix
    let multi_prefix = StorageKey::create_search_prefix(-1, &[0x01, 0x02, 0x03]);
    let mut expected = Vec::new();
    expected.extend_from_slice(&(-1i32).to_le_bytes());
    expected.extend_from_slice(&[0x01, 0x02, 0x03]);
    assert_eq!(expected, multi_prefix);
}

/// Test StorageKey and StorageItem in HashMap
#[test]
fn test_storage_in_hashmap() {
    let mut storage_map: HashMap<StorageKey, StorageItem> = HashMap::new();

    let key1 = StorageKey::new(1, vec![0x01]);
    let key2 = StorageKey::new(1, vec![0x02]);
    let key3 = StorageKey::new(2, vec![0x01]); // Same key data, different ID

    let item1 = StorageItem::from_bytes(vec![0xAA]);
    let item2 = StorageItem::from_bytes(vec![0xBB]);
    let item3 = StorageItem::from_bytes(vec![0xCC]);

    storage_map.insert(key1.clone(), item1.clone());
    storage_map.insert(key2.clone(), item2.clone());
    storage_map.insert(key3.clone(), item3.clone());

    assert_eq!(3, storage_map.len());
    assert_eq!(Some(&item1), storage_map.get(&key1));
    assert_eq!(Some(&item2), storage_map.get(&key2));
    assert_eq!(Some(&item3), storage_map.get(&key3));
}

// ============================================================================
// Implementation stubs
// ============================================================================

mod neo_smart_contract {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct StorageKey {
        id: i32,
        key: Vec<u8>,
    }

    impl StorageKey {
        pub fn new(id: i32, key: Vec<u8>) -> Self {
            StorageKey { id, key }
        }

        pub fn from_bytes(data: &[u8]) -> Self {
            if data.len() < 4 {
                panic!("Data too short for StorageKey");
            }

            let id = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
            let key = data[4..].to_vec();

            StorageKey { id, key }
        }

        pub fn from_memory(data: &[u8]) -> Self {
            Self::from_bytes(data)
        }

        pub fn from_span(data: &[u8]) -> Self {
            Self::from_bytes(data)
        }

        pub fn create_search_prefix(id: i32, prefix: &[u8]) -> Vec<u8> {
            let mut result = Vec::new();
            result.extend_from_slice(&id.to_le_bytes());
            result.extend_from_slice(prefix);
            result
        }

        pub fn id(&self) -> i32 {
            self.id
        }

        pub fn key(&self) -> &[u8] {
            &self.key
        }
    }

    impl Hash for StorageKey {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.id.hash(state);
            self.key.hash(state);
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct StorageItem {
        value: Vec<u8>,
    }

    impl StorageItem {
        pub fn from_bytes(data: Vec<u8>) -> Self {
            StorageItem { value: data }
        }

        pub fn from_big_integer(value: i64) -> Self {
            // Convert i64 to little-endian bytes
            let bytes = value.to_le_bytes().to_vec();
            StorageItem { value: bytes }
        }

        pub fn value(&self) -> &[u8] {
            &self.value
        }

        pub fn to_big_integer(&self) -> i64 {
            // Convert little-endian bytes back to i64
            if self.value.len() >= 8 {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&self.value[..8]);
                i64::from_le_bytes(bytes)
            } else {
                // Handle shorter byte arrays
                let mut bytes = [0u8; 8];
                bytes[..self.value.len()].copy_from_slice(&self.value);
                i64::from_le_bytes(bytes)
            }
        }
    }
}
