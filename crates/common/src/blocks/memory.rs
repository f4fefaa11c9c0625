use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::store::{BlockStore, BlockStoreError};
use crate::linked_data::Cid;

/// In-memory block store using a HashMap
#[derive(Debug, Clone)]
pub struct MemoryBlockStore {
    inner: Arc<RwLock<HashMap<Cid, Bytes>>>,
}

impl MemoryBlockStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of blocks held
    pub fn len(&self) -> Result<usize, BlockStoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.len())
    }

    pub fn is_empty(&self) -> Result<bool, BlockStoreError> {
        Ok(self.len()? == 0)
    }
}

impl Default for MemoryBlockStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> BlockStoreError {
    BlockStoreError::Default(anyhow::anyhow!("failed to acquire lock: {}", e))
}

#[async_trait]
impl BlockStore for MemoryBlockStore {
    async fn get(&self, cid: &Cid) -> Result<Bytes, BlockStoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        inner
            .get(cid)
            .cloned()
            .ok_or(BlockStoreError::NotFound(*cid))
    }

    async fn put(&self, cid: Cid, data: Bytes) -> Result<(), BlockStoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.entry(cid).or_insert(data);
        Ok(())
    }

    async fn has(&self, cid: &Cid) -> Result<bool, BlockStoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.contains_key(cid))
    }
}
