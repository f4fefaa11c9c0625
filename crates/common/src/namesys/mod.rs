//! The mutable naming layer
//!
//! A [`NameSystem`] turns `/ipns/<key>` into whatever path `<key>` is
//! currently bound to. Callers that have no naming layer simply do not
//! configure one; see [`resolve`](crate::resolve::resolve).

mod memory;
mod provider;

pub use memory::{validate_key, MemoryNameSystem};
pub use provider::{NameSystem, NamesysError};
