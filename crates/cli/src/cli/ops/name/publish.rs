use clap::Args;

use common::namesys::validate_key;
use common::prelude::{NamesysError, Path, PathError};

use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Publish {
    /// Name to bind, without the /ipns/ prefix
    pub key: String,

    /// Path the name should point at
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("invalid path: {0}")]
    Path(#[from] PathError),
    #[error(transparent)]
    Namesys(#[from] NamesysError),
    #[error(transparent)]
    State(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Publish {
    type Error = PublishError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let path = Path::parse(&self.path)?;
        validate_key(&self.key)?;

        let mut state = ctx.state()?;
        let previous = state
            .config
            .names
            .insert(self.key.clone(), path.to_string());
        state.save_config()?;

        Ok(match previous {
            Some(previous) => format!("/ipns/{} -> {} (was {})", self.key, path, previous),
            None => format!("/ipns/{} -> {}", self.key, path),
        })
    }
}
