//! Constants used in the deploy scripts

/// The default RPC URL, that of a local development node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default path of the `Membership` build artifact
pub const DEFAULT_MEMBERSHIP_ARTIFACT: &str = "artifacts/contracts/Membership.sol/Membership.json";

/// The default path of the `Voting` build artifact
pub const DEFAULT_VOTING_ARTIFACT: &str = "artifacts/contracts/Voting.sol/Voting.json";

/// The default path of the contract info file read by the frontend
pub const DEFAULT_CONTRACT_INFO_PATH: &str = "frontend/contractInfo.js";

/// The default number of seconds to wait on a single network operation
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// The default number of confirmations to wait for on each transaction
pub const DEFAULT_NUM_CONFIRMATIONS: u64 = 1;

/// The name under which the contract info is exported to the frontend
pub const CONTRACT_INFO_EXPORT_NAME: &str = "contractInfo";

/// The number of test accounts that receive a membership token
pub const NUM_MEMBERSHIP_RECIPIENTS: usize = 3;

/// The signature of the membership minting method
pub const MINT_SIGNATURE: &str = "mint(address)";

/// The key of the ABI in a build artifact
pub const ABI_KEY: &str = "abi";

/// The key of the creation bytecode in a build artifact
pub const BYTECODE_KEY: &str = "bytecode";

/// The key of the bytecode hex string in a Foundry-style bytecode object
pub const BYTECODE_OBJECT_KEY: &str = "object";

/// The process exit status of a successful run
pub const SUCCESS_EXIT_STATUS: u8 = 0;

/// The process exit status of a run that failed on an operation
pub const FAILURE_EXIT_STATUS: u8 = 1;
