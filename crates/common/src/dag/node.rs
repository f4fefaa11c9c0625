use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::linked_data::{BlockEncoded, DagCborCodec, Link, LinkedData};

/**
 * Nodes
 * =====
 * A node is an immutable block in the object graph.
 *  At a high level it is just a map of names to links,
 *   plus an optional payload of arbitrary linked data.
 *  When traversing the DAG, path segments are just the
 *   names of links in successive nodes.
 * Nodes are always DAG-CBOR encoded; their CID is the
 *  hash of that encoding.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Node {
    links: BTreeMap<String, Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<LinkedData>,
}

#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("link not found: {0}")]
    LinkNotFound(String),
    #[error("end of path, no more links to resolve")]
    EndOfPath,
}

impl BlockEncoded<DagCborCodec> for Node {}

impl Node {
    pub fn new() -> Self {
        Node {
            links: BTreeMap::new(),
            data: None,
        }
    }

    pub fn with_data(data: LinkedData) -> Self {
        Node {
            links: BTreeMap::new(),
            data: Some(data),
        }
    }

    pub fn get_link(&self, name: &str) -> Option<&Link> {
        self.links.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, link: impl Into<Link>) -> Option<Link> {
        self.links.insert(name.into(), link.into())
    }

    pub fn get_links(&self) -> &BTreeMap<String, Link> {
        &self.links
    }

    pub fn data(&self) -> Option<&LinkedData> {
        self.data.as_ref()
    }

    pub fn set_data(&mut self, data: LinkedData) {
        self.data = Some(data);
    }

    pub fn size(&self) -> usize {
        self.links.len()
    }

    /// Resolve the first of `names` against this node's links.
    ///
    /// Returns the link and the names that are still left to walk.
    pub fn resolve_link(&self, names: &[String]) -> Result<(Link, Vec<String>), NodeError> {
        let (first, rest) = names.split_first().ok_or(NodeError::EndOfPath)?;
        let link = self
            .links
            .get(first)
            .ok_or_else(|| NodeError::LinkNotFound(first.clone()))?;
        Ok((link.clone(), rest.to_vec()))
    }
}
