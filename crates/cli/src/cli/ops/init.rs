use clap::Args;

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Disable the naming layer (ipns paths will fail to resolve)
    #[arg(long)]
    pub no_namesys: bool,

    /// Upper bound on a single resolution, in seconds
    #[arg(long, default_value_t = 30)]
    pub resolve_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            namesys: !self.no_namesys,
            resolve_timeout_secs: self.resolve_timeout_secs,
            ..AppConfig::default()
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let output = format!(
            "Initialized state directory at: {}\n\
             - Blocks: {}\n\
             - Config: {}\n\
             - Name system: {}\n\
             - Resolve timeout: {}s",
            state.state_dir.display(),
            state.blocks_path.display(),
            state.config_path.display(),
            if state.config.namesys { "enabled" } else { "disabled" },
            state.config.resolve_timeout_secs,
        );

        Ok(output)
    }
}
