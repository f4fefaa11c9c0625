use clap::Args;

use common::prelude::{Node, Path, PathError, ResolveError};

use crate::cli::op::{with_timeout, TimedOut};
use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Resolve {
    /// Path to resolve, e.g. /ipns/alice/docs or /ipfs/<cid>/a/b
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveOpError {
    #[error("invalid path: {0}")]
    Path(#[from] PathError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    TimedOut(#[from] TimedOut),
}

/// Render a node as its sorted link table followed by any inline data
pub fn format_node(path: &Path, node: &Node) -> String {
    let mut lines = vec![format!("path: {}", path)];
    if node.get_links().is_empty() {
        lines.push("links: (none)".to_string());
    } else {
        lines.push("links:".to_string());
        for (name, link) in node.get_links() {
            lines.push(format!("  {} -> {}", name, link));
        }
    }
    if let Some(data) = node.data() {
        lines.push(format!("data: {:?}", data));
    }
    lines.join("\n")
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Resolve {
    type Error = ResolveOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let path = Path::parse(&self.path)?;
        let state = ctx.state()?;
        let host = state.host().await?;

        tracing::info!("resolving {}", path);
        let node = with_timeout(&state, host.resolve(&path)).await??;

        Ok(format_node(&path, &node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::linked_data::{cid_for, RAW_CODEC};
    use common::prelude::LinkedData;

    #[test]
    fn test_format_node() {
        let cid = cid_for(RAW_CODEC, b"leaf").unwrap();
        let path = Path::from_cid(&cid);

        let empty = format_node(&path, &Node::new());
        assert_eq!(empty, format!("path: /ipfs/{}\nlinks: (none)", cid));

        let mut node = Node::with_data(LinkedData::String("hi".to_string()));
        node.insert("b", cid);
        node.insert("a", cid);
        let rendered = format_node(&path, &node);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[1], "links:");
        assert_eq!(lines[2], format!("  a -> {}", cid));
        assert_eq!(lines[3], format!("  b -> {}", cid));
        assert!(lines[4].starts_with("data: "));
        assert!(lines[4].contains("hi"));
    }
}
