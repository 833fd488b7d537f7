use std::env;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use clap::Args;
use console::style;

use crate::client::Client;
use crate::flow::{Credentials, LoginFlow};
use crate::redirect;
use crate::session::FileStore;

use super::{ConfigArgs, RunCommand};

/// Log in to the server and hand the session off to the configured
/// application.
#[derive(Args)]
pub struct LoginArgs {
    /// Username to authenticate as.
    #[arg(short, long)]
    pub username: String,

    /// Password; reads the HANDOFF_PASSWORD environment variable when
    /// omitted.
    #[arg(short, long)]
    pub password: Option<String>,

    /// Additional form fields to send, in 'key=value' format.
    #[arg(short = 'f', long = "field")]
    pub fields: Vec<String>,

    /// Print the handoff URL instead of opening it in the browser.
    #[arg(long)]
    pub print_only: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for LoginArgs {
    async fn run(&self) -> Result<()> {
        let cfg = self.config.load()?;

        let password = match &self.password {
            Some(password) => password.clone(),
            None => env::var("HANDOFF_PASSWORD")
                .context("password not provided, use --password or set HANDOFF_PASSWORD")?,
        };

        let mut creds = Credentials::new(self.username.clone(), password);
        for field in &self.fields {
            let (key, value) = match field.split_once('=') {
                Some(pair) => pair,
                None => bail!("invalid field '{field}', expected 'key=value'"),
            };
            creds = creds.with_field(key, value);
        }

        let client = Client::connect(&cfg.server)?;
        let store = FileStore::new(cfg.get_data_dir());
        let flow = LoginFlow::new(&cfg, &client, &store)?;

        let url = flow.run(creds).await?;

        println!("{}", style(url.as_str()).cyan());
        if !self.print_only {
            redirect::navigate(&url)?;
        }
        Ok(())
    }
}
