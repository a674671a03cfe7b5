//! The deployment sequence: deploy `Membership`, deploy `Voting` against it,
//! mint membership tokens to the test accounts, then write the contract info
//! for the frontend.
//!
//! Every step waits on the previous one. Failures of on-chain steps abort the
//! sequence without undoing what is already confirmed. Failing to write the
//! contract info is logged but does not fail the deployment.

use std::{path::PathBuf, time::Duration};

use alloy_primitives::{Address, Bytes};
use tracing::{error, info};

use crate::{
    artifacts::DeploymentArtifacts,
    client::{ContractDeployer, SigningProvider},
    contract_info::write_contract_info,
    errors::ScriptError,
    types::{ContractInfo, DeployedContract, DeploymentRecord, TestAccounts},
    utils::{init_code, mint_calldata, voting_constructor_args, with_timeout},
};

/// Parameters of a deployment run
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    /// Where to write the contract info
    pub output_path: PathBuf,
    /// The limit on each network operation
    pub timeout: Duration,
}

/// Run the full deployment sequence, returning the deployed contracts
pub async fn run_deployment<S, D>(
    signers: &S,
    deployer: &D,
    artifacts: &DeploymentArtifacts,
    config: &DeploymentConfig,
) -> Result<ContractInfo, ScriptError>
where
    S: SigningProvider,
    D: ContractDeployer,
{
    let identities =
        with_timeout("fetching identities", config.timeout, signers.identities()).await?;
    let accounts = TestAccounts::from_identities(&identities)?;
    info!(owner = %accounts.owner, "Deploying contracts");

    let membership = deploy_contract(
        deployer,
        accounts.owner,
        DeployedContract::Membership,
        artifacts,
        Bytes::new(),
        config.timeout,
    )
    .await?;

    let voting_args = voting_constructor_args(membership.address)?;
    let voting = deploy_contract(
        deployer,
        accounts.owner,
        DeployedContract::Voting,
        artifacts,
        voting_args,
        config.timeout,
    )
    .await?;

    mint_memberships(deployer, membership.address, &accounts, config.timeout).await?;

    let contract_info = ContractInfo { voting, membership };
    match write_contract_info(&config.output_path, &contract_info) {
        Ok(()) => info!(path = %config.output_path.display(), "Contract info written"),
        Err(e) => error!(error = %e, "Failed to write contract info"),
    }

    Ok(contract_info)
}

/// Deploy a single contract as `owner` and pair its address with its ABI
async fn deploy_contract<D: ContractDeployer>(
    deployer: &D,
    owner: Address,
    contract: DeployedContract,
    artifacts: &DeploymentArtifacts,
    constructor_args: Bytes,
    timeout: Duration,
) -> Result<DeploymentRecord, ScriptError> {
    info!(contract = %contract, "Deploying contract");

    let artifact = artifacts.get(contract);
    let address = with_timeout(
        &format!("deploying {contract}"),
        timeout,
        deployer.deploy(owner, init_code(&artifact.bytecode, &constructor_args)),
    )
    .await?;

    info!(contract = %contract, address = %address, "Contract deployed");
    Ok(DeploymentRecord {
        address,
        abi: artifact.abi.clone(),
    })
}

/// Mint one membership token to each test account, signed by the owner.
///
/// Stops at the first failed mint; mints already confirmed stay in place.
async fn mint_memberships<D: ContractDeployer>(
    deployer: &D,
    membership: Address,
    accounts: &TestAccounts,
    timeout: Duration,
) -> Result<(), ScriptError> {
    info!("Minting membership tokens");

    for (minted, (role, recipient)) in accounts.membership_recipients().into_iter().enumerate() {
        let res = with_timeout(
            &format!("minting to {role}"),
            timeout,
            deployer.send_call(accounts.owner, membership, mint_calldata(recipient)),
        )
        .await;

        match res {
            Ok(tx_hash) => info!(recipient = %recipient, tx_hash = %tx_hash, "Minted to {role}"),
            Err(e) => {
                error!(recipient = %recipient, minted, "Minting to {role} failed, aborting");
                return Err(e);
            }
        }
    }

    info!("Minting complete");
    Ok(())
}
