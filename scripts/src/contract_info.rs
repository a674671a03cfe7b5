//! Rendering and writing of the contract info module read by the frontend

use std::{fs, path::Path};

use crate::{constants::CONTRACT_INFO_EXPORT_NAME, errors::ScriptError, types::ContractInfo};

/// Render the contract info as a JS module exporting it as a constant
pub fn render_contract_info(info: &ContractInfo) -> Result<String, ScriptError> {
    let json = serde_json::to_string_pretty(info).map_err(|e| ScriptError::Serde(e.to_string()))?;
    Ok(format!("export const {CONTRACT_INFO_EXPORT_NAME} = {json};\n"))
}

/// Write the contract info to the given path, replacing any previous contents.
///
/// Missing parent directories are not created.
pub fn write_contract_info(path: &Path, info: &ContractInfo) -> Result<(), ScriptError> {
    let data = render_contract_info(info)?;
    fs::write(path, data)
        .map_err(|e| ScriptError::WriteContractInfo(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use alloy_primitives::{address, Address};
    use eyre::Result;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    use super::{render_contract_info, write_contract_info};
    use crate::{
        errors::ScriptError,
        types::{ContractInfo, DeploymentRecord},
    };

    /// Build a contract info with the given addresses
    fn contract_info(voting: Address, membership: Address) -> ContractInfo {
        ContractInfo {
            voting: DeploymentRecord {
                address: voting,
                abi: json!([{ "type": "function", "name": "vote" }]),
            },
            membership: DeploymentRecord {
                address: membership,
                abi: json!([{ "type": "function", "name": "mint" }]),
            },
        }
    }

    #[test]
    fn test_render_contract_info() -> Result<()> {
        let info = contract_info(
            address!("e7f1725e7734ce288f8367e1bb143e90bb3f0512"),
            address!("5fbdb2315678afecb367f032d93f642f64180aa3"),
        );

        let rendered = render_contract_info(&info)?;

        let expected = r#"export const contractInfo = {
  "voting": {
    "address": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
    "abi": [
      {
        "type": "function",
        "name": "vote"
      }
    ]
  },
  "membership": {
    "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
    "abi": [
      {
        "type": "function",
        "name": "mint"
      }
    ]
  }
};
"#;
        assert_eq!(rendered, expected);
        Ok(())
    }

    #[test]
    fn test_write_overwrites_previous_contents() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("contractInfo.js");
        fs::write(&path, "stale contents that are much longer than nothing")?;

        let info = contract_info(Address::with_last_byte(2), Address::with_last_byte(1));
        write_contract_info(&path, &info)?;

        let written = fs::read_to_string(&path)?;
        assert_eq!(written, render_contract_info(&info)?);

        let json = written
            .trim_start_matches("export const contractInfo = ")
            .trim_end_matches(";\n");
        let parsed: Value = serde_json::from_str(json)?;
        assert_eq!(
            parsed["membership"]["address"],
            Address::with_last_byte(1).to_checksum(None)
        );
        Ok(())
    }

    #[test]
    fn test_write_into_missing_directory() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("frontend").join("contractInfo.js");

        let info = contract_info(Address::with_last_byte(2), Address::with_last_byte(1));
        let err = write_contract_info(&path, &info).unwrap_err();

        assert!(matches!(err, ScriptError::WriteContractInfo(_)));
        assert!(!path.exists());
        Ok(())
    }
}
