use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use voting_scripts::{
    cli::Cli,
    errors::ScriptError,
    utils::{exit_status, setup_client},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    ExitCode::from(exit_status(&run(cli).await))
}

/// Set up the client and run the requested command
async fn run(cli: Cli) -> Result<(), ScriptError> {
    let Cli {
        rpc_url,
        priv_keys,
        command,
    } = cli;

    let client = setup_client(&rpc_url, &priv_keys)?;

    command.run(client).await
}
