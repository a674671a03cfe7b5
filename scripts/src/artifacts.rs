//! Loading of the contract build artifacts.
//!
//! Artifacts are read from explicit paths rather than looked up by contract
//! name. Both Hardhat artifacts (`"bytecode": "0x..."`) and Foundry artifacts
//! (`"bytecode": { "object": "0x..." }`) are accepted.

use std::{fs, path::Path};

use alloy::json_abi::JsonAbi;
use alloy_primitives::{hex, Bytes};
use serde_json::Value;
use tracing::debug;

use crate::{
    constants::{ABI_KEY, BYTECODE_KEY, BYTECODE_OBJECT_KEY, MINT_SIGNATURE},
    errors::ScriptError,
    types::{ContractArtifact, DeployedContract},
};

/// The build artifacts of both deployed contracts
#[derive(Debug, Clone)]
pub struct DeploymentArtifacts {
    /// The `Membership` artifact
    pub membership: ContractArtifact,
    /// The `Voting` artifact
    pub voting: ContractArtifact,
}

impl DeploymentArtifacts {
    /// Load and validate both artifacts.
    ///
    /// The membership ABI must expose the minting method called after deployment.
    pub fn load(membership_path: &Path, voting_path: &Path) -> Result<Self, ScriptError> {
        let (membership, membership_abi) = read_artifact(membership_path)?;
        ensure_function(&membership_abi, DeployedContract::Membership, MINT_SIGNATURE)?;
        let voting = load_artifact(voting_path)?;

        Ok(Self { membership, voting })
    }

    /// Get the artifact of the given contract
    pub fn get(&self, contract: DeployedContract) -> &ContractArtifact {
        match contract {
            DeployedContract::Membership => &self.membership,
            DeployedContract::Voting => &self.voting,
        }
    }
}

/// Read a contract artifact from the given path
pub fn load_artifact(path: &Path) -> Result<ContractArtifact, ScriptError> {
    read_artifact(path).map(|(artifact, _)| artifact)
}

/// Read a contract artifact along with its parsed ABI
fn read_artifact(path: &Path) -> Result<(ContractArtifact, JsonAbi), ScriptError> {
    debug!(path = %path.display(), "Loading contract artifact");

    let contents = fs::read_to_string(path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

    parse_artifact(&contents)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))
}

/// Parse the ABI and creation bytecode out of an artifact's JSON
fn parse_artifact(contents: &str) -> Result<(ContractArtifact, JsonAbi), String> {
    let json: Value = serde_json::from_str(contents).map_err(|e| e.to_string())?;

    let abi = json
        .get(ABI_KEY)
        .cloned()
        .ok_or_else(|| "no ABI found in artifact".to_string())?;
    let parsed_abi: JsonAbi =
        serde_json::from_value(abi.clone()).map_err(|e| format!("invalid ABI: {e}"))?;

    let bytecode = extract_bytecode(&json)?;

    Ok((ContractArtifact { abi, bytecode }, parsed_abi))
}

/// Extract the creation bytecode from either artifact layout
fn extract_bytecode(json: &Value) -> Result<Bytes, String> {
    let bytecode = json
        .get(BYTECODE_KEY)
        .and_then(|b| {
            b.as_str()
                .or_else(|| b.get(BYTECODE_OBJECT_KEY).and_then(Value::as_str))
        })
        .ok_or_else(|| "no bytecode found in artifact".to_string())?;

    let hex_str = bytecode.strip_prefix("0x").unwrap_or(bytecode);
    if hex_str.is_empty() {
        return Err("artifact has no deployable bytecode".to_string());
    }
    // Solidity leaves `__$<hash>$__` placeholders where library addresses go
    if hex_str.contains("__") {
        return Err("bytecode contains unlinked library references".to_string());
    }

    hex::decode(hex_str)
        .map(Bytes::from)
        .map_err(|e| format!("invalid bytecode hex: {e}"))
}

/// Check that the artifact's ABI exposes a function with the given signature
fn ensure_function(
    abi: &JsonAbi,
    contract: DeployedContract,
    signature: &str,
) -> Result<(), ScriptError> {
    if abi.functions().any(|f| f.signature() == signature) {
        Ok(())
    } else {
        Err(ScriptError::ArtifactParsing(format!(
            "{contract} ABI does not expose `{signature}`"
        )))
    }
}
