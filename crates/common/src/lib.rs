/**
 * Content-addressed block storage.
 *  - The `BlockStore` trait every graph walk reads through
 *  - In-memory and on-disk implementations
 */
pub mod blocks;
/**
 * DAG nodes and the graph resolver that walks
 *  named links from a root CID down to a terminal node.
 */
pub mod dag;
/**
 * Internal wrapper around IPLD, renamed to
 *  something a little more down-to-earth.
 * Handles DAG-CBOR encoding and CID computation
 *  for linked data.
 */
pub mod linked_data;
/**
 * Mutable naming layer. Maps `/ipns/<key>` names
 *  onto paths in the immutable content namespace.
 */
pub mod namesys;
/**
 * Logical paths: `/ipfs/<cid>/...` and `/ipns/<key>/...`
 */
pub mod path;
/**
 * Composes the naming layer with the graph resolver.
 *  This is the entry point most callers want.
 */
pub mod resolve;

pub mod prelude {
    pub use crate::blocks::{BlockStore, BlockStoreError, FsBlockStore, MemoryBlockStore};
    pub use crate::dag::{DagResolver, GraphResolver, Node, NodeError, ResolverError};
    pub use crate::linked_data::{Cid, CidError, Link, LinkedData};
    pub use crate::namesys::{MemoryNameSystem, NameSystem, NamesysError};
    pub use crate::path::{Namespace, Path, PathError};
    pub use crate::resolve::{resolve, resolve_to_cid, Host, ResolveError};
}
