//! RocksDB storage implementation.
//!
//! This module provides a RocksDB-based storage implementation that matches

use crate::storage::{
    IReadOnlyStore, IStore, IStoreSnapshot, IWriteStore, SeekDirection, StorageConfig,
    StorageProvider,
};
use rocksdb::{Direction, IteratorMode, Options, WriteBatch, DB};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// RocksDB store implementation
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Creates a new RocksDB store
    pub fn new(path: &str) -> crate::Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path)
.map_err(|e| crate::Error::Database(format!("Failed to open RocksDB: {}", e)))?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl IReadOnlyStore<Vec<u8>, Vec<u8>> for RocksDbStore {
    fn try_get(&self, key: &Vec<u8>) -> Option<Vec<u8>> {
        match self.db.get(key) {
            Ok(value) => value,
            Err(e) => {
                // Log database read errors instead of silently ignoring them
                error!("Failed to read key from RocksDB: {}", e);
                None
            }
        }
    }

    fn contains(&self, key: &Vec<u8>) -> bool {
        match self.db.get(key) {
            Ok(value) => value.is_some(),
            Err(e) => {
                // Log database read errors instead of silently ignoring them
                error!("Failed to check key existence in RocksDB: {}", e);
                false
            }
        }
    }

    fn find(
        &self,
        key_or_prefix: Option<&[u8]>,
        direction: SeekDirection,
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)>> {
        let db = self.db.clone();
        let prefix = key_or_prefix.map(|p| p.to_vec());

        let iter_mode = match (prefix.as_ref(), direction) {
            (Some(prefix), SeekDirection::Forward) => {
                IteratorMode::From(prefix, Direction::Forward)
            }
            (Some(prefix), SeekDirection::Backward) => {
                IteratorMode::From(prefix, Direction::Reverse)
            }
            (None, SeekDirection::Forward) => IteratorMode::Start,
            (None, SeekDirection::Backward) => IteratorMode::End,
        };

        let items: Vec<(Vec<u8>, Vec<u8>)> = db
.iterator(iter_mode)
.map(|result| {
                let (key, value) = result.expect("Operation failed");
                (key.to_vec(), value.to_vec())
            })
.filter(|(key, _)| {
                if let Some(ref prefix) = prefix {
                    key.starts_with(prefix)
                } else {
                    true
                }
            })
.collect();

        Box::new(items.into_iter())
    }
}

impl IWriteStore<Vec<u8>, Vec<u8>> for RocksDbStore {
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        if let Err(e) = self.db.put(key, value) {
            log::debug!("Failed to put key-value pair: {}", e);
        }
    }

    fn delete(&mut self, key: &Vec<u8>) {
        if let Err(e) = self.db.delete(key) {
            log::debug!("Failed to delete key: {}", e);
        }
    }
}

impl IStore for RocksDbStore {
    fn get_snapshot(&self) -> Box<dyn IStoreSnapshot> {
        Box::new(RocksDbSnapshot::new(self.db.clone()))
    }
}

/// RocksDB snapshot implementation with write batching
pub struct RocksDbSnapshot {
    db: Arc<DB>,
    batch: WriteBatch,
    // Create a dummy store that we can return a reference to
    store_instance: Box<RocksDbStore>,
}

impl RocksDbSnapshot {
    pub fn new(db: Arc<DB>) -> Self {
        // Create a store instance that shares the same DB
        let store_instance = Box::new(RocksDbStore { db: db.clone() });

        Self {
            db,
            batch: WriteBatch::default(),
            store_instance,
        }
    }
}

impl IReadOnlyStore<Vec<u8>, Vec<u8>> for RocksDbSnapshot {
    fn try_get(&self, key: &Vec<u8>) -> Option<Vec<u8>> {
        // snapshot read implementation
        match self.db.get(key) {
            Ok(value) => value,
            Err(e) => {
                // Log database read errors instead of silently ignoring them
                error!("Failed to read key from RocksDB snapshot: {}", e);
                None
            }
        }
    }

    fn contains(&self, key: &Vec<u8>) -> bool {
        match self.db.get(key) {
            Ok(value) => value.is_some(),
            Err(e) => {
                // Log database read errors instead of silently ignoring them
                error!("Failed to check key existence in RocksDB: {}", e);
                false
            }
        }
    }

    fn find(
        &self,
        key_or_prefix: Option<&[u8]>,
        direction: SeekDirection,
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)>> {
        let db = self.db.clone();
        let prefix = key_or_prefix.map(|p| p.to_vec());

        let iter_mode = match (prefix.as_ref(), direction) {
            (Some(prefix), SeekDirection::Forward) => {
                IteratorMode::From(prefix, Direction::Forward)
            }
            (Some(prefix), SeekDirection::Backward) => {
                IteratorMode::From(prefix, Direction::Reverse)
            }
            (None, SeekDirection::Forward) => IteratorMode::Start,
            (None, SeekDirection::Backward) => IteratorMode::End,
        };

        let items: Vec<(Vec<u8>, Vec<u8>)> = db
.iterator(iter_mode)
.map(|result| {
                let (key, value) = result.expect("Operation failed");
                (key.to_vec(), value.to_vec())
            })
.filter(|(key, _)| {
                if let Some(ref prefix) = prefix {
                    key.starts_with(prefix)
                } else {
                    true
                }
            })
.collect();

        Box::new(items.into_iter())
    }
}

impl IWriteStore<Vec<u8>, Vec<u8>> for RocksDbSnapshot {
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.batch.put(key, value);
    }

    fn delete(&mut self, key: &Vec<u8>) {
        self.batch.delete(key);
    }
}

impl IStoreSnapshot for RocksDbSnapshot {
    fn store(&self) -> &dyn IStore {
        // Return a reference to our internal store instance
        // This store shares the same DB connection
        self.store_instance.as_ref()
    }

    fn commit(&mut self) {
        match self.db.write(std::mem::take(&mut self.batch)) {
            Ok(()) => {
                debug!("Snapshot batch committed successfully");
            }
            Err(e) => {
                error!("Failed to commit snapshot batch: {}", e);
                // In production, this should be handled gracefully rather than crashing
                warn!("Snapshot batch commit failed - storage operation incomplete");

                // 1. Retry the batch commit
                // 2. Mark the snapshot operation as failed
                // 3. Trigger recovery procedures
                // 4. Alert monitoring systems
                // 5. Continue execution in degraded mode
            }
        }
    }
}

/// RocksDB storage provider (matches test expectations)
pub struct RocksDbStorageProvider;

impl RocksDbStorageProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RocksDbStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageProvider for RocksDbStorageProvider {
    fn name(&self) -> &str {
        "RocksDB"
    }

    fn create_store(&self, config: &StorageConfig) -> crate::Result<Box<dyn IStore>> {
        let path = config.path.to_string_lossy();
        let store = RocksDbStore::new(&path)?;
        Ok(Box::new(store))
    }
}
