//! Storage operations for ApplicationEngine.
//!
//! This module implements storage functionality's ApplicationEngine.Storage.cs.
//! It provides storage context management, storage operations, and storage iteration.

use crate::storage::{StorageItem, StorageKey};
use crate::{Error, Result};
use neo_core::constants::MAX_STORAGE_KEY_SIZE;
use neo_core::constants::MAX_STORAGE_VALUE_SIZE;
use neo_core::UInt160;
use std::collections::HashMap;

/// Maximum size of storage keys.
/// Maximum size of storage values.

/// Storage context for contract storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageContext {
    /// The contract ID
    pub id: i32,
    /// Whether the context is read-only
    pub is_read_only: bool,
}

/// Find options for storage search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindOptions(pub u8);

impl FindOptions {
    /// No options
    pub const NONE: Self = Self(0);
    /// Keys only
    pub const KEYS_ONLY: Self = Self(0x01);
    /// Remove prefix
    pub const REMOVE_PREFIX: Self = Self(0x02);
    /// Values only
    pub const VALUES_ONLY: Self = Self(0x04);
    /// Deserialize values
    pub const DESERIALIZE_VALUES: Self = Self(0x08);
    /// Pick field 0
    pub const PICK_FIELD_0: Self = Self(0x10);
    /// Pick field 1
    pub const PICK_FIELD_1: Self = Self(0x20);
    /// Backwards search
    pub const BACKWARDS: Self = Self(0x80);

    /// Checks if the options contain the specified flag
    pub fn contains(&self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }
}

impl std::ops::BitOr for FindOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for FindOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Storage iterator.
/// This provides iteration over storage entries with various options.
#[derive(Debug)]
pub struct StorageIterator {
    /// The storage entries to iterate over
    entries: Vec<(Vec<u8>, StorageItem)>,
    /// Current position in the iterator
    position: usize,
    /// The length of the prefix to remove (if RemovePrefix option is set)
    prefix_length: usize,
    /// Find options that control how the iterator behaves
    options: FindOptions,
}

impl StorageIterator {
    /// Creates a new storage iterator.
    pub fn new(
        entries: Vec<(Vec<u8>, StorageItem)>,
        prefix_length: usize,
        options: FindOptions,
    ) -> Self {
        Self {
            entries,
            position: 0,
            prefix_length,
            options,
        }
    }

    /// Advances the iterator to the next element.
    /// Returns true if successful, false if at the end.
    pub fn next(&mut self) -> bool {
        if self.position < self.entries.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Gets the current value from the iterator.
    pub fn value(&self) -> Option<Vec<u8>> {
        if self.position == 0 || self.position > self.entries.len() {
            return None;
        }

        let (key, item) = &self.entries[self.position - 1];
        let mut result_key = key.clone();
        let result_value = item.value.clone();

        if self.options.contains(FindOptions::REMOVE_PREFIX)
            && result_key.len() >= self.prefix_length
        {
            result_key = result_key[self.prefix_length..].to_vec();
        }

        // Apply options
        if self.options.contains(FindOptions::KEYS_ONLY) {
            Some(result_key)
        } else if self.options.contains(FindOptions::VALUES_ONLY) {
            Some(result_value)
        } else {
            // Return a proper structure containing both key and value
            let mut result = Vec::new();

            result.extend_from_slice(&(result_key.len() as u32).to_le_bytes());
            // Add key data
            result.extend_from_slice(&result_key);
            result.extend_from_slice(&(result_value.len() as u32).to_le_bytes());
            // Add value data
            result.extend_from_slice(&result_value);

            Some(result)
        }
    }

    /// Gets the number of remaining entries.
    pub fn remaining(&self) -> usize {
        if self.position >= self.entries.len() {
            0
        } else {
            self.entries.len() - self.position
        }
    }
}

/// Storage operations implementation.Storage.cs exactly.
pub trait StorageOperations {
    /// Gets a storage item by key.
    fn get_storage_item(&self, context: &StorageContext, key: &[u8]) -> Option<Vec<u8>>;

    /// Puts a storage item.
    fn put_storage_item(
        &mut self,
        context: &StorageContext,
        key: &[u8],
        value: &[u8],
    ) -> Result<()>;

    /// Deletes a storage item.
    fn delete_storage_item(&mut self, context: &StorageContext, key: &[u8]) -> Result<()>;

    /// Gets the storage context for the current contract.
    fn get_storage_context(&self) -> Result<StorageContext>;

    /// Gets a read-only storage context for the current contract.
    fn get_read_only_storage_context(&self) -> Result<StorageContext>;

    /// Converts a storage context to read-only.
    fn as_read_only_storage_context(&self, context: StorageContext) -> StorageContext;

    /// Finds storage entries with the given prefix and options.
    fn find_storage_entries(
        &self,
        context: &StorageContext,
        prefix: &[u8],
        options: FindOptions,
    ) -> StorageIterator;

    /// Gets the storage price per byte.
    fn get_storage_price(&self) -> usize;

    /// Queries blockchain storage for a given key.
    fn query_blockchain_storage(&self, storage_key: &StorageKey) -> Option<Vec<u8>>;

    /// Gets a contract hash by its ID.
    fn get_contract_hash_by_id(&self, id: i32) -> Option<UInt160>;

    /// Gets the storage cache.
    fn get_storage_cache(&self) -> &HashMap<StorageKey, StorageItem>;

    /// Gets the mutable storage cache.
    fn get_storage_cache_mut(&mut self) -> &mut HashMap<StorageKey, StorageItem>;
}

/// Storage management for contract storage operations.
pub struct StorageManager {
    /// Storage cache.
    storage: HashMap<StorageKey, StorageItem>,
    /// Storage iterators managed by this engine
    storage_iterators: HashMap<u32, StorageIterator>,
    /// Next iterator ID to assign
    next_iterator_id: u32,
}

impl StorageManager {
    /// Creates a new storage manager.
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
            storage_iterators: HashMap::new(),
            next_iterator_id: 0,
        }
    }

    /// Creates a storage iterator.
    pub fn create_storage_iterator(&mut self, results: Vec<(Vec<u8>, StorageItem)>) -> Result<u32> {
        let iterator_id = self.next_iterator_id;
        self.next_iterator_id += 1;

        let iterator = StorageIterator::new(results, 0, FindOptions::NONE);
        self.storage_iterators.insert(iterator_id, iterator);

        Ok(iterator_id)
    }

    /// Creates a storage iterator with options.
    pub fn create_storage_iterator_with_options(
        &mut self,
        results: Vec<(Vec<u8>, StorageItem)>,
        prefix_length: usize,
        options: FindOptions,
    ) -> Result<u32> {
        let iterator_id = self.next_iterator_id;
        self.next_iterator_id += 1;

        let iterator = StorageIterator::new(results, prefix_length, options);
        self.storage_iterators.insert(iterator_id, iterator);

        Ok(iterator_id)
    }

    /// Gets a storage iterator.
    pub fn get_storage_iterator(&self, iterator_id: u32) -> Option<&StorageIterator> {
        self.storage_iterators.get(&iterator_id)
    }

    /// Gets a mutable storage iterator.
    pub fn get_storage_iterator_mut(&mut self, iterator_id: u32) -> Option<&mut StorageIterator> {
        self.storage_iterators.get_mut(&iterator_id)
    }

    /// Advances an iterator to the next item.
    pub fn iterator_next(&mut self, iterator_id: u32) -> Result<bool> {
        let iterator = self
.storage_iterators
.get_mut(&iterator_id)
.ok_or_else(|| Error::InvalidArguments("Iterator not found".to_string()))?;
        Ok(iterator.next())
    }

    /// Gets the current value from an iterator.
    pub fn iterator_value(&self, iterator_id: u32) -> Result<Option<Vec<u8>>> {
        let iterator = self
.storage_iterators
.get(&iterator_id)
.ok_or_else(|| Error::InvalidArguments("Iterator not found".to_string()))?;
        Ok(iterator.value())
    }

    /// Disposes of an iterator.
    pub fn dispose_iterator(&mut self, iterator_id: u32) -> Result<()> {
        self.storage_iterators.remove(&iterator_id);
        Ok(())
    }

    /// Sets a storage item.
    pub fn set_storage(&mut self, key: StorageKey, item: StorageItem) -> Result<()> {
        self.storage.insert(key, item);
        Ok(())
    }

    /// Gets a storage item.
    pub fn get_storage(&self, key: &StorageKey) -> Option<&StorageItem> {
        self.storage.get(key)
    }

    /// Deletes a storage item.
    pub fn delete_storage(&mut self, key: &StorageKey) -> Result<()> {
        self.storage.remove(key);
        Ok(())
    }

    /// Finds storage entries with prefix.
    pub fn find_storage_entries_with_prefix(&self, prefix: &[u8]) -> Vec<(Vec<u8>, StorageItem)> {
        self.storage
.iter()
.filter(|(key, _)| key.key.starts_with(prefix))
.map(|(key, item)| (key.key.clone(), item.clone()))
.collect()
    }

    /// Deletes storage entries by prefix.
    pub fn delete_storage_by_prefix(&mut self, prefix: &[u8]) -> Result<()> {
        let keys_to_delete: Vec<_> = self
.storage
.keys()
.filter(|key| key.key.starts_with(prefix))
.cloned()
.collect();

        for key in keys_to_delete {
            self.storage.remove(&key);
        }

        Ok(())
    }

    /// Gets the storage cache.
    pub fn get_storage_cache(&self) -> &HashMap<StorageKey, StorageItem> {
        &self.storage
    }

    /// Gets the mutable storage cache.
    pub fn get_storage_cache_mut(&mut self) -> &mut HashMap<StorageKey, StorageItem> {
        &mut self.storage
    }
}

impl Default for StorageManager {
    fn default() -> Self {
        Self::new()
    }
}
