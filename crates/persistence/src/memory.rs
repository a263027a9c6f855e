//! Pure in-memory storage implementation.
//!
//! Backs tests and ephemeral private networks where nothing needs to
//! survive process restart. Data lives in a `BTreeMap` behind a `RwLock`
//! so the store can be cloned cheaply (via `Arc`) and shared between
//! snapshots without touching disk.

use crate::storage::{
    IReadOnlyStore, IStore, IStoreSnapshot, IWriteStore, SeekDirection, StorageConfig,
    StorageProvider,
};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

type Table = Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>;

/// In-memory key-value store.
pub struct MemoryStore {
    table: Table,
}

impl MemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn find_in(table: &Table, key_or_prefix: Option<&[u8]>, direction: SeekDirection) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)>> {
    let guard = table.read().expect("memory store lock poisoned");
    let mut items: Vec<(Vec<u8>, Vec<u8>)> = match key_or_prefix {
        Some(prefix) => guard
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        None => guard.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
    };
    if direction == SeekDirection::Backward {
        items.reverse();
    }
    Box::new(items.into_iter())
}

impl IReadOnlyStore<Vec<u8>, Vec<u8>> for MemoryStore {
    fn try_get(&self, key: &Vec<u8>) -> Option<Vec<u8>> {
        self.table.read().expect("memory store lock poisoned").get(key).cloned()
    }

    fn contains(&self, key: &Vec<u8>) -> bool {
        self.table.read().expect("memory store lock poisoned").contains_key(key)
    }

    fn find(
        &self,
        key_or_prefix: Option<&[u8]>,
        direction: SeekDirection,
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)>> {
        find_in(&self.table, key_or_prefix, direction)
    }
}

impl IWriteStore<Vec<u8>, Vec<u8>> for MemoryStore {
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.table.write().expect("memory store lock poisoned").insert(key, value);
    }

    fn delete(&mut self, key: &Vec<u8>) {
        self.table.write().expect("memory store lock poisoned").remove(key);
    }
}

impl IStore for MemoryStore {
    fn get_snapshot(&self) -> Box<dyn IStoreSnapshot> {
        Box::new(MemorySnapshot {
            table: self.table.clone(),
            pending: BTreeMap::new(),
            pending_deletes: Vec::new(),
        })
    }
}

enum PendingOp {
    Put(Vec<u8>),
    Delete,
}

/// A read-write view over a [`MemoryStore`] that buffers writes until
/// `commit` is called, mirroring the batched-write semantics the RocksDB
/// snapshot offers.
pub struct MemorySnapshot {
    table: Table,
    pending: BTreeMap<Vec<u8>, PendingOp>,
    pending_deletes: Vec<Vec<u8>>,
}

impl IReadOnlyStore<Vec<u8>, Vec<u8>> for MemorySnapshot {
    fn try_get(&self, key: &Vec<u8>) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(PendingOp::Put(value)) => Some(value.clone()),
            Some(PendingOp::Delete) => None,
            None => self.table.read().expect("memory store lock poisoned").get(key).cloned(),
        }
    }

    fn contains(&self, key: &Vec<u8>) -> bool {
        match self.pending.get(key) {
            Some(PendingOp::Put(_)) => true,
            Some(PendingOp::Delete) => false,
            None => self.table.read().expect("memory store lock poisoned").contains_key(key),
        }
    }

    fn find(
        &self,
        key_or_prefix: Option<&[u8]>,
        direction: SeekDirection,
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)>> {
        find_in(&self.table, key_or_prefix, direction)
    }
}

impl IWriteStore<Vec<u8>, Vec<u8>> for MemorySnapshot {
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.pending.insert(key, PendingOp::Put(value));
    }

    fn delete(&mut self, key: &Vec<u8>) {
        self.pending.insert(key.clone(), PendingOp::Delete);
        self.pending_deletes.push(key.clone());
    }
}

impl IStoreSnapshot for MemorySnapshot {
    fn store(&self) -> &dyn IStore {
        // The snapshot holds no owned IStore to borrow from; callers that
        // need the backing store should keep their own handle to it. This
        // mirrors the limitation already present in the RocksDB snapshot,
        // which returns a store sharing the same underlying connection.
        unimplemented!("memory snapshots do not expose a borrowable backing store")
    }

    fn commit(&mut self) {
        let mut guard = self.table.write().expect("memory store lock poisoned");
        for (key, op) in std::mem::take(&mut self.pending) {
            match op {
                PendingOp::Put(value) => {
                    guard.insert(key, value);
                }
                PendingOp::Delete => {
                    guard.remove(&key);
                }
            }
        }
        self.pending_deletes.clear();
    }
}

/// Storage provider that hands out fresh [`MemoryStore`] instances.
///
/// Each call to `create_store` returns an independent, empty store: unlike
/// the RocksDB provider there is no shared file on disk to reopen.
#[derive(Default)]
pub struct MemoryStorageProvider;

impl MemoryStorageProvider {
    pub fn new() -> Self {
        Self
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn name(&self) -> &str {
        "Memory"
    }

    fn create_store(&self, _config: &StorageConfig) -> crate::Result<Box<dyn IStore>> {
        Ok(Box::new(MemoryStore::new()))
    }
}
