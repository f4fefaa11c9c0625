use clap::Args;

use common::prelude::{Path, PathError, ResolveError};

use crate::cli::op::{with_timeout, TimedOut};
use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct ResolveCid {
    /// Path whose target CID should be printed
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CidOpError {
    #[error("invalid path: {0}")]
    Path(#[from] PathError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    TimedOut(#[from] TimedOut),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for ResolveCid {
    type Error = CidOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let path = Path::parse(&self.path)?;
        let state = ctx.state()?;
        let host = state.host().await?;

        let cid = with_timeout(&state, host.resolve_to_cid(&path)).await??;
        Ok(cid.to_string())
    }
}
