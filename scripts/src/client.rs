//! The on-chain collaborators of the deployment: the signing provider that
//! hands out test identities, and the service that deploys contracts and
//! submits calls to them.

use alloy::{
    network::TransactionBuilder,
    providers::{DynProvider, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use alloy_primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;
use tracing::debug;

use crate::{constants::DEFAULT_NUM_CONFIRMATIONS, errors::ScriptError, types::Identity};

/// A source of identities able to authorize transactions
#[async_trait]
pub trait SigningProvider: Send + Sync {
    /// The ordered list of available identities
    async fn identities(&self) -> Result<Vec<Identity>, ScriptError>;
}

/// A service that publishes contracts and submits calls to them
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Deploy a contract from its init code (creation bytecode followed by the
    /// ABI-encoded constructor arguments), returning the deployed address once
    /// the deployment is confirmed
    async fn deploy(&self, from: Address, init_code: Bytes) -> Result<Address, ScriptError>;

    /// Submit a state-changing call and wait for it to be confirmed
    async fn send_call(
        &self,
        from: Address,
        to: Address,
        calldata: Bytes,
    ) -> Result<TxHash, ScriptError>;
}

/// A JSON-RPC client acting as both signing provider and deployer
#[derive(Clone)]
pub struct RpcClient {
    /// The underlying provider
    provider: DynProvider,
    /// The addresses of the locally held signers, if any.
    ///
    /// When empty, the node's own accounts are used and the node signs.
    local_signers: Vec<Address>,
    /// The number of confirmations to wait for on each transaction
    confirmations: u64,
}

impl RpcClient {
    /// Create a client over the given provider
    pub fn new(provider: DynProvider, local_signers: Vec<Address>) -> Self {
        Self {
            provider,
            local_signers,
            confirmations: DEFAULT_NUM_CONFIRMATIONS,
        }
    }

    /// Set the number of confirmations to wait for on each transaction
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// Send a transaction and wait for its receipt
    async fn send_and_confirm(
        &self,
        tx: TransactionRequest,
    ) -> Result<TransactionReceipt, String> {
        let pending_tx = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| e.to_string())?;
        debug!(tx_hash = %pending_tx.tx_hash(), "Transaction submitted");

        pending_tx
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| e.to_string())
    }
}

/// Check that the receipt reports a successful transaction
fn ensure_success(receipt: &TransactionReceipt) -> Result<(), String> {
    if receipt.status() {
        Ok(())
    } else {
        Err(format!("transaction {} reverted", receipt.transaction_hash))
    }
}

/// The address of the contract created by a confirmed deployment
fn deployed_address(receipt: &TransactionReceipt) -> Result<Address, ScriptError> {
    ensure_success(receipt).map_err(ScriptError::ContractDeployment)?;

    receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!(
            "no contract address in receipt of {}",
            receipt.transaction_hash
        ))
    })
}

/// The hash of a confirmed, successful call
fn confirmed_call(receipt: &TransactionReceipt) -> Result<TxHash, ScriptError> {
    ensure_success(receipt).map_err(ScriptError::ContractInteraction)?;
    Ok(receipt.transaction_hash)
}

#[async_trait]
impl SigningProvider for RpcClient {
    async fn identities(&self) -> Result<Vec<Identity>, ScriptError> {
        if !self.local_signers.is_empty() {
            return Ok(self.local_signers.iter().copied().map(Identity::from).collect());
        }

        let accounts = self
            .provider
            .get_accounts()
            .await
            .map_err(|e| ScriptError::Provider(e.to_string()))?;

        Ok(accounts.into_iter().map(Identity::from).collect())
    }
}

#[async_trait]
impl ContractDeployer for RpcClient {
    async fn deploy(&self, from: Address, init_code: Bytes) -> Result<Address, ScriptError> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(init_code);

        let receipt = self
            .send_and_confirm(tx)
            .await
            .map_err(ScriptError::ContractDeployment)?;

        deployed_address(&receipt)
    }

    async fn send_call(
        &self,
        from: Address,
        to: Address,
        calldata: Bytes,
    ) -> Result<TxHash, ScriptError> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_input(calldata);

        let receipt = self
            .send_and_confirm(tx)
            .await
            .map_err(ScriptError::ContractInteraction)?;

        confirmed_call(&receipt)
    }
}
