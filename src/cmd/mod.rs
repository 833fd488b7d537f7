use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};

use crate::config::Config;

mod config;
mod login;
mod ping;
mod whoami;

#[derive(Parser)]
#[command(author, version, about)]
pub struct App {
    #[command(subcommand)]
    pub commands: Commands,

    /// Log level, one of 'error', 'warn', 'info', 'debug'.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    Login(login::LoginArgs),
    Whoami(whoami::WhoamiArgs),
    Ping(ping::PingArgs),
    Config(config::ShowConfigArgs),
}

impl App {
    pub async fn run(&self) -> Result<()> {
        match &self.commands {
            Commands::Login(args) => args.run().await,
            Commands::Whoami(args) => args.run().await,
            Commands::Ping(args) => args.run().await,
            Commands::Config(args) => args.run().await,
        }
    }
}

#[async_trait]
pub trait RunCommand {
    async fn run(&self) -> Result<()>;
}

/// Config selection flags shared by all subcommands.
#[derive(Args)]
pub struct ConfigArgs {
    /// Path to the config file, defaults to '~/.config/handoff.toml'.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<Config> {
        Config::load(self.config.as_ref())
    }
}
