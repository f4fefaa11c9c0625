use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::provider::{NameSystem, NamesysError};
use crate::path::{Namespace, Path};

/// In-memory name system: a table of key -> path bindings
///  that can be repointed at any time.
#[derive(Debug, Clone, Default)]
pub struct MemoryNameSystem {
    inner: Arc<RwLock<BTreeMap<String, Path>>>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> NamesysError {
    NamesysError::Default(anyhow::anyhow!("failed to acquire lock: {}", e))
}

/// Split `/ipns/<key>/rest..` (or a bare `<key>/rest..`) into
///  the key and the segments below it.
fn split_name(name: &str) -> Result<(String, Vec<String>), NamesysError> {
    let invalid = || NamesysError::InvalidName(name.to_string());
    let path = Path::new(name).map_err(|_| invalid())?;
    let segments = if name.starts_with('/') {
        if path.namespace() != Namespace::Ipns {
            return Err(invalid());
        }
        &path.segments()[1..]
    } else {
        path.segments()
    };
    let (key, rest) = segments.split_first().ok_or_else(invalid)?;
    Ok((key.clone(), rest.to_vec()))
}

/// Check that `key` can be bound: non-empty and a single path segment
pub fn validate_key(key: &str) -> Result<(), NamesysError> {
    if key.is_empty() || key.contains('/') {
        return Err(NamesysError::InvalidName(key.to_string()));
    }
    Ok(())
}

impl MemoryNameSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `path`, returning the previous binding if any
    pub fn publish(&self, key: &str, path: Path) -> Result<Option<Path>, NamesysError> {
        validate_key(key)?;
        let mut inner = self.inner.write().map_err(poisoned)?;
        tracing::debug!("MemoryNameSystem::publish: {} -> {}", key, path);
        Ok(inner.insert(key.to_string(), path))
    }

    /// Remove the binding for `key`
    pub fn unpublish(&self, key: &str) -> Result<Option<Path>, NamesysError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Ok(inner.remove(key))
    }

    /// All current bindings, ordered by key
    pub fn list(&self) -> Result<Vec<(String, Path)>, NamesysError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .iter()
            .map(|(key, path)| (key.clone(), path.clone()))
            .collect())
    }
}

#[async_trait]
impl NameSystem for MemoryNameSystem {
    async fn resolve(&self, name: &str) -> Result<Path, NamesysError> {
        let (key, rest) = split_name(name)?;
        let target = {
            let inner = self.inner.read().map_err(poisoned)?;
            inner
                .get(&key)
                .cloned()
                .ok_or_else(|| NamesysError::NotFound(name.to_string()))?
        };
        tracing::debug!("MemoryNameSystem::resolve: {} -> {}", name, target);

        if rest.is_empty() {
            return Ok(target);
        }
        let segments = target.segments().iter().chain(rest.iter());
        Path::from_segments(segments).map_err(|source| NamesysError::InvalidRecord {
            name: name.to_string(),
            source,
        })
    }
}
