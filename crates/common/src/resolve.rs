//! Path resolution across both namespaces
//!
//! ```text
//! resolve_to_cid(/ipfs/<cid>)          -> decode <cid>, done
//! resolve_to_cid(/ipns/alice/docs/x)   -> pop "x"
//!   resolve(/ipns/alice/docs)
//!     namesys("/ipns/alice")           -> /ipfs/<root>
//!     graph(/ipfs/<root>/docs)         -> docs node
//!   docs node . link("x")              -> cid
//! ```
//!
//! Only one name substitution is made. If a name system answers with
//! another `/ipns/` path, that path goes to the graph resolver as is.

use std::sync::Arc;

use crate::dag::{GraphResolver, Node, NodeError, ResolverError};
use crate::linked_data::{Cid, CidError};
use crate::namesys::{NameSystem, NamesysError};
use crate::path::{Namespace, Path, PathError};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no name system configured - can't resolve ipns entry")]
    NoNamesys,
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Namesys(#[from] NamesysError),
    #[error(transparent)]
    Resolver(#[from] ResolverError),
    #[error("invalid cid: {0}")]
    Cid(#[from] CidError),
    #[error("no link named {0:?}")]
    NoLink(String),
}

/// Resolve `path` to the node it names.
///
/// `/ipns/<key>/rest..` paths first have `/ipns/<key>` replaced by whatever
/// `namesys` answers, with `rest..` appended. Everything is then handed to
/// `resolver` as a content path.
///
/// # Errors
/// * [`ResolveError::NoNamesys`] - an ipns path was given but `namesys` is `None`
/// * [`ResolveError::Path`] - the ipns path has no key
/// * [`ResolveError::Namesys`] / [`ResolveError::Resolver`] - passed through
///   from the collaborator unchanged
pub async fn resolve<G>(
    namesys: Option<&dyn NameSystem>,
    resolver: &G,
    path: &Path,
) -> Result<Node, ResolveError>
where
    G: GraphResolver + ?Sized,
{
    let path = if path.namespace() == Namespace::Ipns {
        let namesys = namesys.ok_or(ResolveError::NoNamesys)?;

        let segments = path.segments();
        if segments.len() < 2 || segments[1].is_empty() {
            return Err(PathError::NoComponents.into());
        }

        let extensions = &segments[2..];
        let resolvable = Path::from_segments(&segments[..2])?;

        tracing::debug!("resolve: looking up {} in name system", resolvable);
        let resolved = namesys.resolve(&resolvable.to_string()).await?;

        let rewritten = Path::from_segments(resolved.segments().iter().chain(extensions))?;
        tracing::debug!("resolve: {} -> {}", resolvable, rewritten);
        rewritten
    } else {
        path.clone()
    };

    Ok(resolver.resolve_path(&path).await?)
}

/// Something that can resolve paths: an optional naming
///  layer plus a graph resolver.
#[derive(Debug, Clone)]
pub struct Host {
    namesys: Option<Arc<dyn NameSystem>>,
    resolver: Arc<dyn GraphResolver>,
}

impl Host {
    pub fn new(namesys: Option<Arc<dyn NameSystem>>, resolver: Arc<dyn GraphResolver>) -> Self {
        Self { namesys, resolver }
    }

    /// A host with no naming layer; ipns paths fail with
    ///  [`ResolveError::NoNamesys`]
    pub fn without_namesys(resolver: Arc<dyn GraphResolver>) -> Self {
        Self::new(None, resolver)
    }

    pub fn namesys(&self) -> Option<&dyn NameSystem> {
        self.namesys.as_deref()
    }

    pub fn resolver(&self) -> &dyn GraphResolver {
        self.resolver.as_ref()
    }

    /// [`resolve`] with this host's capabilities
    pub async fn resolve(&self, path: &Path) -> Result<Node, ResolveError> {
        resolve(self.namesys(), self.resolver(), path).await
    }

    /// [`resolve_to_cid`] with this host's capabilities
    pub async fn resolve_to_cid(&self, path: &Path) -> Result<Cid, ResolveError> {
        resolve_to_cid(self, path).await
    }
}

/// Resolve `path` to the CID it names.
///
/// A bare `/ipfs/<cid>` is decoded directly without touching either
/// collaborator. Anything else has its last segment split off, the rest
/// resolved with [`resolve`], and the split segment looked up as a link on
/// the resulting node.
pub async fn resolve_to_cid(host: &Host, path: &Path) -> Result<Cid, ResolveError> {
    if path.is_just_a_key() {
        return Ok(path.segments()[1].parse::<Cid>()?);
    }

    let (head, tail) = path.pop_last_segment()?;
    let node = resolve(host.namesys(), host.resolver(), &head).await?;

    // the remainder is always empty for a single name
    let (link, _) = node
        .resolve_link(std::slice::from_ref(&tail))
        .map_err(|e| match e {
            NodeError::LinkNotFound(name) => ResolveError::NoLink(name),
            // a one-name lookup never runs out of path
            NodeError::EndOfPath => ResolveError::NoLink(tail.clone()),
        })?;

    tracing::debug!("resolve_to_cid: {} -> {}", path, link.cid());
    Ok(*link.cid())
}
