//! The immutable object graph
//!
//! - **[`Node`]**: a block holding named [`Link`](crate::linked_data::Link)s
//!   and an optional payload
//! - **[`GraphResolver`]**: the capability the resolution core consumes,
//!   walking `/ipfs/<cid>/a/b` down to the node at `b`
//! - **[`DagResolver`]**: a `GraphResolver` over any
//!   [`BlockStore`](crate::blocks::BlockStore)
//!
//! ```text
//! /ipfs/<root>/docs/readme
//!
//!   root ---docs---> docs node ---readme---> readme node
//! ```

mod node;
mod resolver;

pub use node::{Node, NodeError};
pub use resolver::{DagResolver, GraphResolver, ResolverError};
