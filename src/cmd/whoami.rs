use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;
use log::info;

use crate::client::Client;
use crate::flow::resolve_profile;
use crate::session::FileStore;

use super::{ConfigArgs, RunCommand};

/// Fetch and display the profile of the logged-in user, using the cached
/// token.
#[derive(Args)]
pub struct WhoamiArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for WhoamiArgs {
    async fn run(&self) -> Result<()> {
        let cfg = self.config.load()?;

        let store = FileStore::new(cfg.get_data_dir());
        let token = match store.read_token()? {
            Some(token) => token,
            None => bail!("no cached session, run 'handoff login' first"),
        };

        let client = Client::connect(&cfg.server)?;
        let profile = match resolve_profile(&client, &cfg.profile_paths, &token).await {
            Some(profile) => profile,
            None => {
                // The server may simply not expose a profile endpoint, the
                // cache from login time is the next best answer.
                info!("Falling back to the cached profile");
                match store.read_profile()? {
                    Some(profile) => profile,
                    None => bail!("no profile available, try logging in again"),
                }
            }
        };

        println!("{}", serde_json::to_string_pretty(&profile)?);
        Ok(())
    }
}
