//! Linked data primitives
//!
//! Everything stored in a [`BlockStore`](crate::blocks::BlockStore) is a block of
//! DAG-CBOR bytes addressed by a CIDv1 over its sha2-256 digest:
//!
//! ```text
//! Node { links: { "docs": Link(bafy..) } }  --encode-->  bytes  --sha2-256-->  bafy..
//! ```

mod codec;
mod link;

pub use cid::Cid;
pub use cid::Error as CidError;
pub use ipld_core::ipld::Ipld as LinkedData;

pub use codec::{cid_for, BlockEncoded, Codec, CodecError, DagCborCodec};
pub use link::Link;

/// Multicodec for DAG-CBOR encoded blocks
pub const DAG_CBOR_CODEC: u64 = 0x71;
/// Multicodec for raw, unstructured blocks
pub const RAW_CODEC: u64 = 0x55;
/// Multihash code for sha2-256
pub const SHA2_256_CODE: u64 = 0x12;
