//! Definitions of errors that can occur during the execution of the deploy scripts

use thiserror::Error;

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Error initializing the RPC client or its signers
    #[error("error initializing client: {0}")]
    ClientInitialization(String),
    /// Error fetching identities from the signing provider
    #[error("error fetching identities: {0}")]
    Provider(String),
    /// Error reading or parsing a contract build artifact
    #[error("error parsing artifact: {0}")]
    ArtifactParsing(String),
    /// Error constructing calldata for a constructor or contract method
    #[error("error constructing calldata: {0}")]
    CalldataConstruction(String),
    /// Error deploying a contract
    #[error("error deploying contract: {0}")]
    ContractDeployment(String),
    /// Error calling a contract method
    #[error("error interacting with contract: {0}")]
    ContractInteraction(String),
    /// A network operation did not complete in time
    #[error("timed out {0}")]
    Timeout(String),
    /// Error writing the contract info file for the frontend
    #[error("error writing contract info: {0}")]
    WriteContractInfo(String),
    /// Error serializing the contract info
    #[error("error serializing contract info: {0}")]
    Serde(String),
}
