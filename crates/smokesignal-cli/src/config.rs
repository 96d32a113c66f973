use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use clap::Args;
use color_eyre::eyre::{eyre, Result};
use serde::Deserialize;
use smokesignal_core::{DeployConfig, NetworkConfig, NetworkTarget, RuntimeMode};

const DEFAULT_CONFIG_FILE: &str = "smokesignal.toml";

/// Options shared by every command, read once at process entry
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Runtime mode; exactly `test` targets the local zkSync and L1 nodes
    #[arg(long, global = true, env = "NODE_ENV")]
    pub mode: Option<String>,

    /// Public network to use outside of test mode
    #[arg(long, global = true, default_value_t = NetworkTarget::Testnet)]
    pub target: NetworkTarget,

    /// Path to the deployment config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub mode: RuntimeMode,
    pub network: NetworkConfig,
    pub deploy: DeployConfig,
}

impl Settings {
    pub fn resolve(&self) -> Result<RunContext> {
        let mode = RuntimeMode::from_value(self.mode.as_deref());
        let network = NetworkConfig::resolve(&mode, self.target);

        let deploy = match &self.config {
            Some(path) => ConfigFile::load_from(path)?.into_deploy_config()?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                ConfigFile::load_from(Path::new(DEFAULT_CONFIG_FILE))?.into_deploy_config()?
            }
            None => DeployConfig::default(),
        };

        tracing::debug!(%mode, rpc_url = %network.rpc_url, "Resolved run configuration");

        Ok(RunContext {
            mode,
            network,
            deploy,
        })
    }
}

/// Deployment config file structure (smokesignal.toml)
///
/// Every field is optional; missing fields keep the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub contract: ContractSection,
    #[serde(default)]
    pub compilers: CompilerSection,
    #[serde(default)]
    pub paths: PathsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractSection {
    pub name: Option<String>,
    pub fully_qualified_name: Option<String>,
    pub donation_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerSection {
    pub solc: Option<Vec<String>>,
    pub zksolc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    pub artifacts: Option<String>,
    pub source: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre!("Could not read config file {}: {}", path.display(), e))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: ConfigFile = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply overrides on top of the defaults, resolving environment variables
    pub fn into_deploy_config(self) -> Result<DeployConfig> {
        let mut config = DeployConfig::default();

        if let Some(name) = self.contract.name {
            config.contract_name = resolve_env_var(&name)?;
        }
        if let Some(fqn) = self.contract.fully_qualified_name {
            let fqn = resolve_env_var(&fqn)?;
            if !fqn.contains(':') {
                return Err(eyre!(
                    "Contract name '{}' must be fully qualified (path/Source.sol:ContractName)",
                    fqn
                ));
            }
            config.fully_qualified_name = fqn;
        }
        if let Some(address) = self.contract.donation_address {
            let address = resolve_env_var(&address)?;
            config.donation_address = address
                .parse::<Address>()
                .map_err(|e| eyre!("Invalid donation address '{}': {}", address, e))?;
        }
        if let Some(solc) = self.compilers.solc {
            if solc.is_empty() {
                return Err(eyre!("At least one solc compiler version is required"));
            }
            config.solc_versions = solc
                .iter()
                .map(|version| resolve_env_var(version))
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(zksolc) = self.compilers.zksolc {
            config.zksolc_version = resolve_env_var(&zksolc)?;
        }
        if let Some(artifacts) = self.paths.artifacts {
            config.artifacts_dir = PathBuf::from(resolve_env_var(&artifacts)?);
        }
        if let Some(source) = self.paths.source {
            config.source_path = PathBuf::from(resolve_env_var(&source)?);
        }

        Ok(config)
    }
}

/// Resolve environment variable references in a string
/// Supports ${VAR_NAME} syntax
fn resolve_env_var(value: &str) -> Result<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).map_err(|_| eyre!("Environment variable '{}' not set", var_name))
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smokesignal_core::config::DEFAULT_DONATION_ADDRESS;

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config = ConfigFile::parse("").unwrap().into_deploy_config().unwrap();
        assert_eq!(config, DeployConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[contract]
name = "Beacon"
fully_qualified_name = "contracts/Beacon.sol:Beacon"
donation_address = "0x1111111111111111111111111111111111111111"

[compilers]
solc = ["0.8.20"]
zksolc = "1.3.13"

[paths]
artifacts = "build/artifacts-zk"
source = "contracts/Beacon.sol"
"#;

        let config = ConfigFile::parse(toml_content)
            .unwrap()
            .into_deploy_config()
            .unwrap();

        assert_eq!(config.contract_name, "Beacon");
        assert_eq!(config.fully_qualified_name, "contracts/Beacon.sol:Beacon");
        assert_eq!(
            config.donation_address.to_string(),
            "0x1111111111111111111111111111111111111111"
        );
        assert_eq!(config.solc_versions, vec!["0.8.20"]);
        assert_eq!(config.zksolc_version, "1.3.13");
        assert_eq!(config.artifacts_dir, PathBuf::from("build/artifacts-zk"));
        assert_eq!(config.source_path, PathBuf::from("contracts/Beacon.sol"));
    }

    #[test]
    fn test_partial_config() {
        let toml_content = r#"
[compilers]
zksolc = "1.3.10"
"#;

        let config = ConfigFile::parse(toml_content)
            .unwrap()
            .into_deploy_config()
            .unwrap();

        assert_eq!(config.zksolc_version, "1.3.10");
        assert_eq!(config.donation_address, DEFAULT_DONATION_ADDRESS);
        assert_eq!(config.contract_name, "SmokeSignal_zkSync");
    }

    #[test]
    fn test_donation_address_from_env() {
        std::env::set_var("SMOKESIGNAL_TEST_DONATION", "0x2222222222222222222222222222222222222222");

        let toml_content = r#"
[contract]
donation_address = "${SMOKESIGNAL_TEST_DONATION}"
"#;

        let config = ConfigFile::parse(toml_content)
            .unwrap()
            .into_deploy_config()
            .unwrap();

        assert_eq!(
            config.donation_address.to_string(),
            "0x2222222222222222222222222222222222222222"
        );

        std::env::remove_var("SMOKESIGNAL_TEST_DONATION");
    }

    #[test]
    fn test_invalid_donation_address() {
        let toml_content = r#"
[contract]
donation_address = "0x1234"
"#;

        let result = ConfigFile::parse(toml_content)
            .unwrap()
            .into_deploy_config();

        assert!(result.is_err());
    }

    #[test]
    fn test_unqualified_contract_name_rejected() {
        let toml_content = r#"
[contract]
fully_qualified_name = "SmokeSignal_zkSync"
"#;

        let result = ConfigFile::parse(toml_content)
            .unwrap()
            .into_deploy_config();

        assert!(result.is_err());
    }

    #[test]
    fn test_empty_solc_list_rejected() {
        let result = ConfigFile::parse("[compilers]\nsolc = []\n")
            .unwrap()
            .into_deploy_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_solc_versions_from_env() {
        std::env::set_var("SMOKESIGNAL_TEST_SOLC", "0.8.19");

        let toml_content = r#"
[compilers]
solc = ["${SMOKESIGNAL_TEST_SOLC}", "0.6.12"]
"#;

        let config = ConfigFile::parse(toml_content)
            .unwrap()
            .into_deploy_config()
            .unwrap();

        assert_eq!(config.solc_versions, vec!["0.8.19", "0.6.12"]);
        assert_eq!(config.compiler_settings().solc_version, "0.8.19");

        std::env::remove_var("SMOKESIGNAL_TEST_SOLC");
    }

    #[test]
    fn test_solc_version_missing_env_var() {
        let toml_content = r#"
[compilers]
solc = ["${SMOKESIGNAL_TEST_UNSET_SOLC}"]
"#;

        let result = ConfigFile::parse(toml_content)
            .unwrap()
            .into_deploy_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(ConfigFile::parse("[contract]\nnmae = \"typo\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigFile::load_from(Path::new("/nonexistent/smokesignal.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_env_var() {
        std::env::set_var("SMOKESIGNAL_TEST_VAR", "resolved_value");

        let result = resolve_env_var("${SMOKESIGNAL_TEST_VAR}").unwrap();
        assert_eq!(result, "resolved_value");

        std::env::remove_var("SMOKESIGNAL_TEST_VAR");
    }

    #[test]
    fn test_resolve_env_var_literal() {
        let result = resolve_env_var("contracts/SmokeSignal.sol").unwrap();
        assert_eq!(result, "contracts/SmokeSignal.sol");
    }

    #[test]
    fn test_resolve_env_var_missing() {
        assert!(resolve_env_var("${NONEXISTENT_VAR_99999}").is_err());
    }

    #[test]
    fn test_settings_resolve_test_mode() {
        let settings = Settings {
            mode: Some("test".to_string()),
            target: NetworkTarget::Mainnet,
            config: None,
        };

        let ctx = settings.resolve().unwrap();

        assert!(ctx.mode.is_test());
        assert_eq!(ctx.network.rpc_url, "http://localhost:3050");
    }

    #[test]
    fn test_settings_resolve_missing_explicit_config() {
        let settings = Settings {
            mode: None,
            target: NetworkTarget::Testnet,
            config: Some(PathBuf::from("/nonexistent/smokesignal.toml")),
        };

        assert!(settings.resolve().is_err());
    }
}
