use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

use crate::dag::Node;
use crate::linked_data::{BlockEncoded, Cid, CodecError};

#[derive(Debug, thiserror::Error)]
pub enum BlockStoreError {
    #[error("block store error: {0}")]
    Default(#[from] anyhow::Error),
    #[error("block not found: {0}")]
    NotFound(Cid),
    #[error("block store i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// A content addressed block store.
///  Blocks are opaque bytes keyed by the CID the caller
///  computed for them.
#[async_trait]
pub trait BlockStore: Send + Sync + Debug + 'static {
    /// Get a block as bytes
    ///
    /// # Returns
    /// * `Err(BlockStoreError::NotFound)` - No block is stored under `cid`
    async fn get(&self, cid: &Cid) -> Result<Bytes, BlockStoreError>;

    /// Store a block under `cid`. Storing the same block twice is a no-op.
    async fn put(&self, cid: Cid, data: Bytes) -> Result<(), BlockStoreError>;

    /// Check whether a block is present
    async fn has(&self, cid: &Cid) -> Result<bool, BlockStoreError>;

    /// Get and decode a DAG-CBOR node
    async fn get_node(&self, cid: &Cid) -> Result<Node, BlockStoreError> {
        let data = self.get(cid).await?;
        Ok(Node::decode(&data)?)
    }

    /// Encode a node as DAG-CBOR, store it, and return its CID
    async fn put_node(&self, node: &Node) -> Result<Cid, BlockStoreError> {
        let (cid, data) = node.to_block()?;
        self.put(cid, Bytes::from(data)).await?;
        Ok(cid)
    }
}
