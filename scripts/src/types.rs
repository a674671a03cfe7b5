//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::{Address, Bytes};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{constants::NUM_MEMBERSHIP_RECIPIENTS, errors::ScriptError};

/// The contracts deployed by the scripts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeployedContract {
    /// The membership NFT contract
    Membership,
    /// The voting contract, gated on membership
    Voting,
}

impl Display for DeployedContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployedContract::Membership => write!(f, "Membership"),
            DeployedContract::Voting => write!(f, "Voting"),
        }
    }
}

/// An account made available by the signing provider
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The address of the account
    pub address: Address,
}

impl From<Address> for Identity {
    fn from(address: Address) -> Self {
        Self { address }
    }
}

/// The test accounts used during deployment.
///
/// The owner deploys both contracts and signs every mint.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TestAccounts {
    /// The deployer & owner of the contracts
    pub owner: Address,
    /// The first voter
    pub voter1: Address,
    /// The second voter
    pub voter2: Address,
}

impl TestAccounts {
    /// Take the owner and both voters from the front of the identity list
    pub fn from_identities(identities: &[Identity]) -> Result<Self, ScriptError> {
        match identities {
            [owner, voter1, voter2, ..] => Ok(Self {
                owner: owner.address,
                voter1: voter1.address,
                voter2: voter2.address,
            }),
            _ => Err(ScriptError::Provider(format!(
                "expected at least {} identities, found {}",
                NUM_MEMBERSHIP_RECIPIENTS,
                identities.len()
            ))),
        }
    }

    /// The accounts that receive a membership token, labelled for logging
    pub fn membership_recipients(&self) -> [(&'static str, Address); NUM_MEMBERSHIP_RECIPIENTS] {
        [
            ("owner", self.owner),
            ("voter1", self.voter1),
            ("voter2", self.voter2),
        ]
    }
}

/// The compiled output of a contract
#[derive(Debug, Clone, PartialEq)]
pub struct ContractArtifact {
    /// The contract ABI, exactly as it appears in the artifact
    pub abi: Value,
    /// The creation bytecode of the contract
    pub bytecode: Bytes,
}

/// A deployed contract's address paired with its ABI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentRecord {
    /// The address at which the contract was deployed
    #[serde(serialize_with = "serialize_checksummed")]
    pub address: Address,
    /// The contract ABI
    pub abi: Value,
}

/// The contract info consumed by the frontend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractInfo {
    /// The voting contract deployment
    pub voting: DeploymentRecord,
    /// The membership contract deployment
    pub membership: DeploymentRecord,
}

/// Serializes an address in its EIP-55 checksummed form
fn serialize_checksummed<S: Serializer>(address: &Address, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&address.to_checksum(None))
}
