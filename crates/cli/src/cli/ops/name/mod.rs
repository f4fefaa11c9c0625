use clap::{Args, Subcommand};

pub mod list;
pub mod publish;
pub mod resolve;

use crate::cli::op::Op;

crate::command_enum! {
    (Publish, publish::Publish),
    (Resolve, resolve::NameResolve),
    (List, list::List),
}

pub type NameCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Name {
    #[command(subcommand)]
    pub command: NameCommand,
}

#[async_trait::async_trait]
impl Op for Name {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
