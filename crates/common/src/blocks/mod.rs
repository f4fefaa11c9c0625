//! Block storage
//!
//! - **[`BlockStore`]**: async get/put/has over CID-keyed blocks, plus
//!   DAG-CBOR node helpers
//! - **[`MemoryBlockStore`]**: HashMap-backed, shared between clones
//! - **[`FsBlockStore`]**: one file per block in a directory

mod fs;
mod memory;
mod store;

pub use fs::FsBlockStore;
pub use memory::MemoryBlockStore;
pub use store::{BlockStore, BlockStoreError};
