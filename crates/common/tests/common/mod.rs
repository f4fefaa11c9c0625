//! Shared test doubles for resolution tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use common::blocks::{BlockStore, MemoryBlockStore};
use common::dag::{DagResolver, GraphResolver, Node, ResolverError};
use common::linked_data::{cid_for, Cid, LinkedData, RAW_CODEC};
use common::namesys::{MemoryNameSystem, NameSystem, NamesysError};
use common::path::Path;
use common::resolve::Host;

/// Install a test subscriber so `RUST_LOG=debug cargo test` shows resolution steps
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn some_cid(seed: &str) -> Cid {
    cid_for(RAW_CODEC, seed.as_bytes()).unwrap()
}

/// Name system that answers from a fixed table and records every lookup
#[derive(Debug, Default)]
pub struct RecordingNameSystem {
    answers: HashMap<String, Path>,
    fail_with: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

impl RecordingNameSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, path: &str) -> Self {
        self.answers
            .insert(name.to_string(), Path::new(path).unwrap());
        self
    }

    /// Every lookup fails with an opaque provider error carrying `message`
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NameSystem for RecordingNameSystem {
    async fn resolve(&self, name: &str) -> Result<Path, NamesysError> {
        self.calls.lock().unwrap().push(name.to_string());
        if let Some(message) = &self.fail_with {
            return Err(NamesysError::Default(anyhow::anyhow!(message.clone())));
        }
        self.answers
            .get(name)
            .cloned()
            .ok_or_else(|| NamesysError::NotFound(name.to_string()))
    }
}

/// Graph resolver that hands back a canned node and records every path it saw
#[derive(Debug, Default)]
pub struct RecordingResolver {
    node: Node,
    fail_with: Option<Cid>,
    pub calls: Mutex<Vec<Path>>,
}

impl RecordingResolver {
    pub fn returning(node: Node) -> Self {
        Self {
            node,
            ..Self::default()
        }
    }

    /// Every walk fails as if the block for `cid` were missing
    pub fn missing_block(cid: Cid) -> Self {
        Self {
            fail_with: Some(cid),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.to_string())
            .collect()
    }
}

#[async_trait]
impl GraphResolver for RecordingResolver {
    async fn resolve_path(&self, path: &Path) -> Result<Node, ResolverError> {
        self.calls.lock().unwrap().push(path.clone());
        if let Some(cid) = self.fail_with {
            return Err(ResolverError::BlockStore(
                common::blocks::BlockStoreError::NotFound(cid),
            ));
        }
        Ok(self.node.clone())
    }
}

/// Graph resolver that never finishes
#[derive(Debug, Default)]
pub struct StallingResolver;

#[async_trait]
impl GraphResolver for StallingResolver {
    async fn resolve_path(&self, _path: &Path) -> Result<Node, ResolverError> {
        std::future::pending().await
    }
}

pub fn host(namesys: Option<Arc<dyn NameSystem>>, resolver: Arc<dyn GraphResolver>) -> Host {
    Host::new(namesys, resolver)
}

/// A small published tree:
///
/// ```text
/// root --docs--> docs --readme--> readme("hello")
///      --logo--> logo("png")
/// ```
pub struct TestTree {
    pub store: MemoryBlockStore,
    pub namesys: MemoryNameSystem,
    pub host: Host,
    pub root: Cid,
    pub docs: Cid,
    pub readme: Cid,
    pub logo: Cid,
}

pub async fn setup_tree() -> TestTree {
    init_tracing();
    let store = MemoryBlockStore::new();

    let readme = store
        .put_node(&Node::with_data(LinkedData::String("hello".to_string())))
        .await
        .unwrap();
    let logo = store
        .put_node(&Node::with_data(LinkedData::String("png".to_string())))
        .await
        .unwrap();

    let mut docs_node = Node::new();
    docs_node.insert("readme", readme);
    let docs = store.put_node(&docs_node).await.unwrap();

    let mut root_node = Node::new();
    root_node.insert("docs", docs);
    root_node.insert("logo", logo);
    let root = store.put_node(&root_node).await.unwrap();

    let namesys = MemoryNameSystem::new();
    let host = Host::new(
        Some(Arc::new(namesys.clone())),
        Arc::new(DagResolver::new(store.clone())),
    );

    TestTree {
        store,
        namesys,
        host,
        root,
        docs,
        readme,
        logo,
    }
}
