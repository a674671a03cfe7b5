//! Implementations of the deploy scripts

use std::time::Duration;

use tracing::info;

use crate::{
    artifacts::DeploymentArtifacts,
    cli::DeployArgs,
    client::RpcClient,
    deploy::{run_deployment, DeploymentConfig},
    errors::ScriptError,
    types::ContractInfo,
};

/// Deploy both contracts and mint memberships to the test accounts.
///
/// The build artifacts are loaded up front so that a missing artifact fails
/// the run before anything is sent on-chain.
pub async fn deploy_contracts(
    args: DeployArgs,
    client: RpcClient,
) -> Result<ContractInfo, ScriptError> {
    let artifacts = DeploymentArtifacts::load(&args.membership_artifact, &args.voting_artifact)?;
    let client = client.with_confirmations(args.confirmations);
    let config = DeploymentConfig {
        output_path: args.output,
        timeout: Duration::from_secs(args.timeout_secs),
    };

    let contract_info = run_deployment(&client, &client, &artifacts, &config).await?;

    info!(
        membership = %contract_info.membership.address,
        voting = %contract_info.voting.address,
        "Deployment complete"
    );
    Ok(contract_info)
}
