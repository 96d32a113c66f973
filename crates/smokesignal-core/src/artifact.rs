//! Compiled contract artifacts
//!
//! Two on-disk formats are understood:
//!
//! - zksolc/Hardhat artifacts, where `bytecode` is a hex string and
//!   `contractName`, `sourceName` and `factoryDeps` are present
//! - Foundry artifacts, where `bytecode` is an object with an `object` field

use std::collections::BTreeMap;

use alloy::json_abi::JsonAbi;
use serde::Deserialize;

use crate::bytecode::Bytecode;
use crate::error::{Error, Result};

/// Compiled bytecode and interface of a single contract
#[derive(Debug, Clone, PartialEq)]
pub struct ContractArtifact {
    pub contract_name: String,
    pub source_name: Option<String>,
    pub abi: JsonAbi,
    pub bytecode: Bytecode,
    /// Bytecode hash to contract name for contracts this one can deploy
    pub factory_deps: BTreeMap<String, String>,
    /// Bytecode of every contract in `factory_deps`, transitively
    ///
    /// Filled in by the artifact store; a freshly parsed artifact has none.
    pub dependencies: Vec<Bytecode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    #[serde(default)]
    contract_name: Option<String>,
    #[serde(default)]
    source_name: Option<String>,
    abi: JsonAbi,
    bytecode: RawBytecode,
    #[serde(default)]
    factory_deps: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl RawBytecode {
    fn as_hex(&self) -> &str {
        match self {
            RawBytecode::Hex(hex) => hex,
            RawBytecode::Object { object } => object,
        }
    }
}

impl ContractArtifact {
    /// Parse an artifact file, falling back to `name` when the file does not
    /// carry a contract name
    pub fn from_json(name: &str, json: &str) -> Result<Self> {
        let raw: RawArtifact = serde_json::from_str(json)
            .map_err(|e| Error::InvalidArtifact(format!("{}: {}", name, e)))?;

        let bytecode = Bytecode::from_hex(raw.bytecode.as_hex())
            .map_err(|e| Error::InvalidArtifact(format!("{}: {}", name, e)))?;

        if bytecode.is_empty() {
            return Err(Error::InvalidArtifact(format!(
                "Artifact '{}' has no bytecode (may be an interface or abstract contract)",
                name
            )));
        }

        Ok(Self {
            contract_name: raw.contract_name.unwrap_or_else(|| name.to_string()),
            source_name: raw.source_name,
            abi: raw.abi,
            bytecode,
            factory_deps: raw.factory_deps,
            dependencies: Vec::new(),
        })
    }

    /// Contract names of the factory dependencies
    ///
    /// Entries are `path/Source.sol:Contract`; only the contract part is
    /// returned, since that is how artifacts are looked up.
    pub fn dependency_names(&self) -> Vec<String> {
        self.factory_deps
            .values()
            .map(|fqn| fqn.rsplit(':').next().unwrap_or(fqn).to_string())
            .collect()
    }

    /// Whether every factory dependency has been resolved to bytecode
    pub fn dependencies_resolved(&self) -> bool {
        self.dependencies.len() >= self.factory_deps.len()
    }
}
