//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    client::RpcClient,
    commands::deploy_contracts,
    constants::{
        DEFAULT_CONTRACT_INFO_PATH, DEFAULT_MEMBERSHIP_ARTIFACT, DEFAULT_NUM_CONFIRMATIONS,
        DEFAULT_RPC_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_VOTING_ARTIFACT,
    },
    errors::ScriptError,
};

/// Deploy the membership & voting contracts to an EVM chain
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Private keys of the test accounts, owner first, comma separated.
    ///
    /// If omitted, the accounts managed by the node are used.
    // TODO: Read keys from a keystore instead of the command line
    #[arg(short, long, env = "PKEYS", value_delimiter = ',')]
    pub priv_keys: Vec<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy both contracts, mint memberships to the test accounts, and
    /// write the contract info for the frontend
    Deploy(DeployArgs),
}

impl Command {
    /// Run the command against the given client
    pub async fn run(self, client: RpcClient) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => deploy_contracts(args, client).await.map(|_| ()),
        }
    }
}

/// Deploy the `Membership` contract, then the `Voting` contract pointed at it.
///
/// The first three accounts (the owner and two voters) each receive a
/// membership token, minted by the owner.
#[derive(Args)]
pub struct DeployArgs {
    /// Path to the `Membership` build artifact
    #[arg(long, env = "MEMBERSHIP_ARTIFACT", default_value = DEFAULT_MEMBERSHIP_ARTIFACT)]
    pub membership_artifact: PathBuf,

    /// Path to the `Voting` build artifact
    #[arg(long, env = "VOTING_ARTIFACT", default_value = DEFAULT_VOTING_ARTIFACT)]
    pub voting_artifact: PathBuf,

    /// Path to which the contract info is written
    #[arg(short, long, env = "CONTRACT_INFO_PATH", default_value = DEFAULT_CONTRACT_INFO_PATH)]
    pub output: PathBuf,

    /// Seconds to wait on any single network operation
    #[arg(long, env = "TX_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Number of confirmations to wait for on each transaction
    #[arg(long, env = "TX_CONFIRMATIONS", default_value_t = DEFAULT_NUM_CONFIRMATIONS)]
    pub confirmations: u64,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn test_deploy_defaults() {
        let cli = Cli::try_parse_from(["voting-scripts", "deploy"]).unwrap();

        assert_eq!(cli.rpc_url, "http://127.0.0.1:8545");
        assert!(cli.priv_keys.is_empty());

        let Command::Deploy(args) = cli.command;
        assert_eq!(
            args.membership_artifact,
            PathBuf::from("artifacts/contracts/Membership.sol/Membership.json")
        );
        assert_eq!(
            args.voting_artifact,
            PathBuf::from("artifacts/contracts/Voting.sol/Voting.json")
        );
        assert_eq!(args.output, PathBuf::from("frontend/contractInfo.js"));
        assert_eq!(args.timeout_secs, 120);
        assert_eq!(args.confirmations, 1);
    }

    #[test]
    fn test_comma_separated_keys() {
        let cli = Cli::try_parse_from([
            "voting-scripts",
            "--priv-keys",
            "0xaa,0xbb,0xcc",
            "deploy",
            "-o",
            "out.js",
        ])
        .unwrap();

        assert_eq!(cli.priv_keys, vec!["0xaa", "0xbb", "0xcc"]);
        let Command::Deploy(args) = cli.command;
        assert_eq!(args.output, PathBuf::from("out.js"));
    }
}
