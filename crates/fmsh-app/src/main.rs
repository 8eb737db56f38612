//! fmsh entry point.
//!
//! Parses the CLI, initialises logging, and hands control to the session
//! read loop. All interactive output goes to stdout; logs go to stderr so
//! they never interleave with the prompt protocol.

mod session;

use anyhow::Result;
use clap::Parser;

use session::Session;

/// Interactive command-line file manager
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Name used in the greeting and farewell messages
    #[arg(long)]
    username: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut session = Session::new(&cli.username);
    session.run().await?;
    Ok(())
}
