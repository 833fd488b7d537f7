use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::client::Client;

use super::{ConfigArgs, RunCommand};

/// Check that the authentication server is reachable.
#[derive(Args)]
pub struct PingArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for PingArgs {
    async fn run(&self) -> Result<()> {
        let cfg = self.config.load()?;

        let client = Client::connect(&cfg.server)?;
        let message = client.ping().await?;
        println!("{message}");
        Ok(())
    }
}
