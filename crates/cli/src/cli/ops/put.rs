use clap::Args;

use common::prelude::{BlockStore, BlockStoreError, Cid, LinkedData, Node};

use crate::state::StateError;

/// Parse a `name=cid` link argument
pub fn parse_link(s: &str) -> Result<(String, Cid), String> {
    let (name, cid) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=cid, got {:?}", s))?;
    if name.is_empty() || name.contains('/') {
        return Err(format!("invalid link name {:?}", name));
    }
    let cid = cid
        .parse::<Cid>()
        .map_err(|e| format!("invalid cid {:?}: {}", cid, e))?;
    Ok((name.to_string(), cid))
}

#[derive(Args, Debug, Clone)]
pub struct Put {
    /// Named link to another block, as name=cid (repeatable)
    #[arg(long = "link", value_parser = parse_link)]
    pub links: Vec<(String, Cid)>,

    /// Inline string data to attach to the node
    #[arg(long)]
    pub data: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PutError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    BlockStore(#[from] BlockStoreError),
}

impl Put {
    pub fn node(&self) -> Node {
        let mut node = match &self.data {
            Some(data) => Node::with_data(LinkedData::String(data.clone())),
            None => Node::new(),
        };
        for (name, cid) in &self.links {
            node.insert(name.clone(), *cid);
        }
        node
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Put {
    type Error = PutError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ctx.state()?;
        let store = state.blocks().await?;

        let cid = store.put_node(&self.node()).await?;
        tracing::info!("stored node {} with {} links", cid, self.links.len());
        Ok(cid.to_string())
    }
}
