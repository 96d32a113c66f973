//! Fixed deployment parameters
//!
//! The defaults describe the SmokeSignal contract. Every field can be
//! overridden so the orchestrator stays parameterizable.

use std::path::PathBuf;

use alloy::primitives::{address, Address};

use crate::args::ConstructorArgs;

pub const DEFAULT_CONTRACT_NAME: &str = "SmokeSignal_zkSync";
pub const DEFAULT_FULLY_QUALIFIED_NAME: &str = "contracts/SmokeSignal.sol:SmokeSignal_zkSync";
pub const DEFAULT_DONATION_ADDRESS: Address = address!("959192eb0F3D33531711E596A66A7ee574e18A79");
pub const DEFAULT_SOLC_VERSIONS: &[&str] = &["0.8.17", "0.6.12"];
pub const DEFAULT_ZKSOLC_VERSION: &str = "latest";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts-zk";
pub const DEFAULT_SOURCE_PATH: &str = "contracts/SmokeSignal.sol";

/// Compiler versions reported to the block explorer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerSettings {
    pub zksolc_version: String,
    pub solc_version: String,
}

/// Parameters of the single deployment performed by a run
#[derive(Debug, Clone, PartialEq)]
pub struct DeployConfig {
    /// Name the artifact is looked up by
    pub contract_name: String,
    /// `path/Source.sol:ContractName`, as required by the explorer
    pub fully_qualified_name: String,
    /// Sole constructor argument
    pub donation_address: Address,
    /// Solidity compilers, primary first
    pub solc_versions: Vec<String>,
    pub zksolc_version: String,
    pub artifacts_dir: PathBuf,
    pub source_path: PathBuf,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            contract_name: DEFAULT_CONTRACT_NAME.to_string(),
            fully_qualified_name: DEFAULT_FULLY_QUALIFIED_NAME.to_string(),
            donation_address: DEFAULT_DONATION_ADDRESS,
            solc_versions: DEFAULT_SOLC_VERSIONS.iter().map(|v| v.to_string()).collect(),
            zksolc_version: DEFAULT_ZKSOLC_VERSION.to_string(),
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
        }
    }
}

impl DeployConfig {
    pub fn constructor_args(&self) -> ConstructorArgs {
        ConstructorArgs::donation(self.donation_address)
    }

    /// Compiler settings for verification, using the primary solc version
    pub fn compiler_settings(&self) -> CompilerSettings {
        CompilerSettings {
            zksolc_version: self.zksolc_version.clone(),
            solc_version: self
                .solc_versions
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_SOLC_VERSIONS[0].to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeployConfig::default();

        assert_eq!(config.contract_name, "SmokeSignal_zkSync");
        assert_eq!(
            config.fully_qualified_name,
            "contracts/SmokeSignal.sol:SmokeSignal_zkSync"
        );
        assert_eq!(config.solc_versions, vec!["0.8.17", "0.6.12"]);
        assert_eq!(
            config.constructor_args(),
            ConstructorArgs::donation(DEFAULT_DONATION_ADDRESS)
        );
    }

    #[test]
    fn test_compiler_settings_uses_primary_solc() {
        let settings = DeployConfig::default().compiler_settings();
        assert_eq!(settings.solc_version, "0.8.17");
        assert_eq!(settings.zksolc_version, "latest");
    }

    #[test]
    fn test_compiler_settings_without_solc_versions() {
        let config = DeployConfig {
            solc_versions: Vec::new(),
            ..DeployConfig::default()
        };
        assert_eq!(config.compiler_settings().solc_version, "0.8.17");
    }
}
