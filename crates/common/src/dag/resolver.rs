use std::fmt::Debug;

use async_trait::async_trait;

use crate::blocks::{BlockStore, BlockStoreError};
use crate::linked_data::{Cid, CidError};
use crate::path::{Path, PathError, IPFS_NAMESPACE};

use super::node::{Node, NodeError};

#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("invalid root cid {segment:?}: {source}")]
    InvalidRoot {
        segment: String,
        #[source]
        source: CidError,
    },
    #[error("no link named {name:?} under {node}")]
    NoLink { name: String, node: Cid },
    #[error("node error: {0}")]
    Node(#[from] NodeError),
    #[error("block store error: {0}")]
    BlockStore(#[from] BlockStoreError),
}

/// Walks a path rooted in the content namespace down to its terminal node
#[async_trait]
pub trait GraphResolver: Send + Sync + Debug {
    async fn resolve_path(&self, path: &Path) -> Result<Node, ResolverError>;
}

/// [`GraphResolver`] that fetches every hop from a [`BlockStore`]
#[derive(Debug, Clone)]
pub struct DagResolver<B> {
    store: B,
}

impl<B: BlockStore> DagResolver<B> {
    pub fn new(store: B) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    /// Split a path into its root CID and the link names below it.
    ///  A leading `ipfs` marker is dropped; otherwise the first
    ///  segment must itself be the root CID.
    fn split_abs_path(path: &Path) -> Result<(Cid, Vec<String>), ResolverError> {
        let mut parts = path.segments();
        if parts.first().map(String::as_str) == Some(IPFS_NAMESPACE) {
            parts = &parts[1..];
        }
        let (root, rest) = parts.split_first().ok_or(PathError::NoComponents)?;
        let cid = root
            .parse::<Cid>()
            .map_err(|source| ResolverError::InvalidRoot {
                segment: root.clone(),
                source,
            })?;
        Ok((cid, rest.to_vec()))
    }

    /// Resolve a path and return every node along the way,
    ///  root first, terminal node last.
    pub async fn resolve_path_components(&self, path: &Path) -> Result<Vec<Node>, ResolverError> {
        let (root_cid, names) = Self::split_abs_path(path)?;
        tracing::debug!(%path, root = %root_cid, hops = names.len(), "resolving dag path");
        let root = self.store.get_node(&root_cid).await?;
        self.resolve_links(root_cid, root, &names).await
    }

    /// Follow `names` one link at a time starting from `root`
    pub async fn resolve_links(
        &self,
        root_cid: Cid,
        root: Node,
        names: &[String],
    ) -> Result<Vec<Node>, ResolverError> {
        let mut nodes = Vec::with_capacity(names.len() + 1);
        let mut node = root;
        let mut cid = root_cid;
        let mut remaining = names.to_vec();

        while !remaining.is_empty() {
            let (link, rest) = node.resolve_link(&remaining).map_err(|e| match e {
                NodeError::LinkNotFound(name) => ResolverError::NoLink { name, node: cid },
                e => e.into(),
            })?;
            tracing::trace!(name = %remaining[0], from = %cid, to = %link.cid(), "following link");

            let next = self.store.get_node(link.cid()).await?;
            nodes.push(node);
            node = next;
            cid = *link.cid();
            remaining = rest;
        }

        nodes.push(node);
        Ok(nodes)
    }
}

#[async_trait]
impl<B: BlockStore> GraphResolver for DagResolver<B> {
    async fn resolve_path(&self, path: &Path) -> Result<Node, ResolverError> {
        let mut nodes = self.resolve_path_components(path).await?;
        nodes
            .pop()
            .ok_or(ResolverError::Path(PathError::NoComponents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::MemoryBlockStore;
    use crate::linked_data::LinkedData;

    // root --a--> mid --b--> leaf("leaf")
    async fn setup() -> (DagResolver<MemoryBlockStore>, Cid, Cid, Node) {
        let store = MemoryBlockStore::new();
        let leaf = Node::with_data(LinkedData::String("leaf".to_string()));
        let leaf_cid = store.put_node(&leaf).await.unwrap();

        let mut mid = Node::new();
        mid.insert("b", leaf_cid);
        let mid_cid = store.put_node(&mid).await.unwrap();

        let mut root = Node::new();
        root.insert("a", mid_cid);
        let root_cid = store.put_node(&root).await.unwrap();

        (DagResolver::new(store), root_cid, leaf_cid, leaf)
    }

    #[tokio::test]
    async fn test_resolve_path_to_leaf() {
        let (resolver, root, _, leaf) = setup().await;
        let path = Path::from_cid(&root).join("a").unwrap().join("b").unwrap();
        assert_eq!(resolver.resolve_path(&path).await.unwrap(), leaf);
    }

    #[tokio::test]
    async fn test_resolve_root_only() {
        let (resolver, root, _, _) = setup().await;
        let node = resolver.resolve_path(&Path::from_cid(&root)).await.unwrap();
        assert!(node.get_link("a").is_some());
    }

    #[tokio::test]
    async fn test_resolve_without_namespace_marker() {
        let (resolver, root, _, leaf) = setup().await;
        let path = Path::new(&format!("/{}/a/b", root)).unwrap();
        assert_eq!(resolver.resolve_path(&path).await.unwrap(), leaf);
    }

    #[tokio::test]
    async fn test_resolve_path_components() {
        let (resolver, root, _, leaf) = setup().await;
        let path = Path::from_segments(["ipfs", root.to_string().as_str(), "a", "b"]).unwrap();
        let nodes = resolver.resolve_path_components(&path).await.unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[2], leaf);
    }

    #[tokio::test]
    async fn test_missing_link() {
        let (resolver, root, _, _) = setup().await;
        let path = Path::from_cid(&root).join("a").unwrap().join("zzz").unwrap();
        match resolver.resolve_path(&path).await {
            Err(ResolverError::NoLink { name, node }) => {
                assert_eq!(name, "zzz");
                assert_ne!(node, root);
            }
            other => panic!("expected NoLink, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unresolved_ipns_path_is_rejected() {
        let (resolver, _, _, _) = setup().await;
        let path = Path::new("/ipns/alice/a").unwrap();
        assert!(matches!(
            resolver.resolve_path(&path).await,
            Err(ResolverError::InvalidRoot { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_root_block() {
        let resolver = DagResolver::new(MemoryBlockStore::new());
        let (_, _, leaf_cid, _) = setup().await;
        assert!(matches!(
            resolver.resolve_path(&Path::from_cid(&leaf_cid)).await,
            Err(ResolverError::BlockStore(BlockStoreError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_bare_namespace_has_no_components() {
        let (resolver, _, _, _) = setup().await;
        assert!(matches!(
            resolver.resolve_path(&Path::new("/ipfs").unwrap()).await,
            Err(ResolverError::Path(PathError::NoComponents))
        ));
    }
}
