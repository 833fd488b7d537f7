mod client;
mod cmd;
mod config;
mod dirs;
mod filelock;
mod flow;
mod logs;
mod redirect;
mod session;
mod types;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::cmd::App;

async fn run(app: &App) -> Result<()> {
    logs::init(&app.log_level)?;
    app.run().await
}

#[tokio::main]
async fn main() -> ExitCode {
    let app = App::parse();
    match run(&app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            _ = writeln!(io::stderr(), "Fatal: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
