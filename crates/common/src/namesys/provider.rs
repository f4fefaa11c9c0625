use std::fmt::Debug;

use async_trait::async_trait;

use crate::path::{Path, PathError};

#[derive(Debug, thiserror::Error)]
pub enum NamesysError {
    /// Unhandled error from the backing naming service
    #[error("unhandled name system error: {0}")]
    Default(#[from] anyhow::Error),
    /// Nothing is published under the name
    #[error("could not resolve name: {0}")]
    NotFound(String),
    /// The name is not something this name system can look up
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    /// A record was found but does not hold a usable path
    #[error("invalid record for {name}: {source}")]
    InvalidRecord {
        name: String,
        #[source]
        source: PathError,
    },
}

/// Resolves names in the mutable naming namespace.
///  How a name system finds its answer (local table, DHT,
///  DNS, signed records) is its own business.
#[async_trait]
pub trait NameSystem: Send + Sync + Debug {
    /// Resolve a normalized `/ipns/<key>` name to a fresh path
    ///
    /// # Arguments
    /// * `name` - The name to resolve, usually `/ipns/<key>`
    ///
    /// # Returns
    /// * `Ok(Path)` - The path the name currently points at
    /// * `Err(NamesysError::NotFound)` - Nothing is published under the name
    async fn resolve(&self, name: &str) -> Result<Path, NamesysError>;
}
