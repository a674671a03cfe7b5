//! Utilities for the deploy scripts.

use std::{future::Future, str::FromStr, time::Duration};

use alloy::{
    network::EthereumWallet,
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, SolValue};
use tracing::error;

use crate::{
    client::RpcClient,
    constants::{FAILURE_EXIT_STATUS, SUCCESS_EXIT_STATUS},
    errors::ScriptError,
    solidity::mintCall,
};

/// Sets up the RPC client used for deployment.
///
/// If private keys are given, transactions are signed locally by the matching
/// key and the keys' addresses are the available identities. Otherwise the
/// node's own accounts are used.
pub fn setup_client(rpc_url: &str, priv_keys: &[String]) -> Result<RpcClient, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let signers = priv_keys
        .iter()
        .map(|key| PrivateKeySigner::from_str(key.trim()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let signer_addresses: Vec<Address> = signers.iter().map(|s| s.address()).collect();

    let provider = match signers.split_first() {
        None => DynProvider::new(ProviderBuilder::new().connect_http(url)),
        Some((first, rest)) => {
            let mut wallet = EthereumWallet::from(first.clone());
            for signer in rest {
                wallet.register_signer(signer.clone());
            }
            DynProvider::new(ProviderBuilder::new().wallet(wallet).connect_http(url))
        }
    };

    Ok(RpcClient::new(provider, signer_addresses))
}

/// The process exit status for the outcome of a run, logging the error if any.
///
/// A failed write of the contract info does not reach here as an error, so
/// such a run still exits successfully.
pub fn exit_status(res: &Result<(), ScriptError>) -> u8 {
    match res {
        Ok(()) => SUCCESS_EXIT_STATUS,
        Err(e) => {
            error!("{e}");
            FAILURE_EXIT_STATUS
        }
    }
}

/// Await the given operation, failing with a timeout error if it does not
/// complete within `limit`
pub async fn with_timeout<T>(
    operation: &str,
    limit: Duration,
    fut: impl Future<Output = Result<T, ScriptError>>,
) -> Result<T, ScriptError> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| ScriptError::Timeout(format!("{} after {}s", operation, limit.as_secs())))?
}

/// Prepare the constructor arguments of the `Voting` contract
pub fn voting_constructor_args(membership_address: Address) -> Result<Bytes, ScriptError> {
    if membership_address.is_zero() {
        return Err(ScriptError::CalldataConstruction(
            "membership address is the zero address".to_string(),
        ));
    }

    Ok((membership_address,).abi_encode_params().into())
}

/// Prepare calldata for the `Membership` contract's `mint` method
pub fn mint_calldata(recipient: Address) -> Bytes {
    mintCall { to: recipient }.abi_encode().into()
}

/// Concatenate creation bytecode and encoded constructor arguments
pub fn init_code(bytecode: &Bytes, constructor_args: &Bytes) -> Bytes {
    [bytecode.as_ref(), constructor_args.as_ref()].concat().into()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy_primitives::{address, hex, Address, Bytes};

    use super::{
        exit_status, init_code, mint_calldata, setup_client, voting_constructor_args, with_timeout,
    };
    use crate::{client::SigningProvider, errors::ScriptError};

    /// The first default account of a local development node
    const DEV_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    /// The second default account of a local development node
    const DEV_PKEY_2: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    #[tokio::test]
    async fn test_local_keys_are_identities_in_order() {
        let keys = vec![DEV_PKEY.to_string(), DEV_PKEY_2.to_string()];
        let client = setup_client("http://127.0.0.1:8545", &keys).unwrap();

        let identities = client.identities().await.unwrap();
        let addresses: Vec<Address> = identities.iter().map(|i| i.address).collect();

        assert_eq!(
            addresses,
            vec![
                address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
                address!("70997970c51812dc3a010c7d01b50e0d17dc79c8"),
            ]
        );
    }

    #[test]
    fn test_invalid_key_rejected() {
        let err = setup_client("http://127.0.0.1:8545", &["0x1234".to_string()]).err();
        assert!(matches!(err, Some(ScriptError::ClientInitialization(_))));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = setup_client("not a url", &[]).err();
        assert!(matches!(err, Some(ScriptError::ClientInitialization(_))));
    }

    #[test]
    fn test_voting_constructor_args() {
        let membership = address!("5fbdb2315678afecb367f032d93f642f64180aa3");
        let args = voting_constructor_args(membership).unwrap();

        let mut expected = [0u8; 32];
        expected[12..].copy_from_slice(membership.as_slice());
        assert_eq!(args, Bytes::from(expected.to_vec()));
    }

    #[test]
    fn test_voting_constructor_rejects_zero_address() {
        let err = voting_constructor_args(Address::ZERO).unwrap_err();
        assert!(matches!(err, ScriptError::CalldataConstruction(_)));
    }

    #[test]
    fn test_mint_calldata() {
        let recipient = Address::with_last_byte(0xaa);
        let calldata = mint_calldata(recipient);

        // keccak256("mint(address)")[..4]
        assert_eq!(&calldata[..4], &hex!("6a627842"));
        assert_eq!(calldata.len(), 4 + 32);
        assert_eq!(&calldata[16..], recipient.as_slice());
    }

    #[test]
    fn test_init_code_appends_args() {
        let code = init_code(&Bytes::from(vec![0x60, 0x80]), &Bytes::from(vec![0x01]));
        assert_eq!(code, Bytes::from(vec![0x60, 0x80, 0x01]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_expires() {
        let res: Result<(), ScriptError> = with_timeout(
            "waiting on a hung node",
            Duration::from_secs(5),
            std::future::pending(),
        )
        .await;

        match res {
            Err(ScriptError::Timeout(msg)) => assert_eq!(msg, "waiting on a hung node after 5s"),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(())), 0);

        let deploy_err = ScriptError::ContractDeployment("reverted".to_string());
        assert_eq!(exit_status(&Err(deploy_err)), 1);

        let timeout_err = ScriptError::Timeout("deploying Voting after 120s".to_string());
        assert_eq!(exit_status(&Err(timeout_err)), 1);
    }
}
