use clap::Args;

use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct List;

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    State(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for List {
    type Error = ListError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ctx.state()?;

        if state.config.names.is_empty() {
            return Ok("No names published".to_string());
        }
        Ok(state
            .config
            .names
            .iter()
            .map(|(key, path)| format!("/ipns/{} -> {}", key, path))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
