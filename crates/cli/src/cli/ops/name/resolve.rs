use clap::Args;

use common::prelude::{NameSystem, NamesysError};

use crate::cli::op::{with_timeout, TimedOut};
use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct NameResolve {
    /// Name to look up, with or without the /ipns/ prefix
    pub key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NameResolveError {
    #[error("name system is disabled in the config")]
    Disabled,
    #[error(transparent)]
    Namesys(#[from] NamesysError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    TimedOut(#[from] TimedOut),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for NameResolve {
    type Error = NameResolveError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ctx.state()?;
        let namesys = state.namesys()?.ok_or(NameResolveError::Disabled)?;

        let name = if self.key.starts_with("/ipns/") {
            self.key.clone()
        } else {
            format!("/ipns/{}", self.key)
        };
        let path = with_timeout(&state, namesys.resolve(&name)).await??;
        Ok(path.to_string())
    }
}
